//! Tensor networks.
//!
//! A [`TensorNetwork`] is one output tensor (id 0) plus a set of input
//! factors (ids >= 1) whose contracted product equals the output. The
//! planner consumes this type: it needs deterministic iteration, pairwise
//! merging into fresh intermediates, deep copies, and the pairwise
//! contraction cost model.
//!
//! # Cost model
//!
//! [`contraction_cost`] prices a pairwise contraction as the product of the
//! dimension extents of the union of the two tensors' index labels - the
//! classic dense FLOP estimate. The result is nonnegative and symmetric in
//! its arguments.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::tensor::{Leg, Tensor};
use crate::types::IndexLabel;

/// Errors raised while assembling a tensor network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// A factor id was used twice.
    #[error("tensor id {0} already present in the network")]
    DuplicateTensor(u32),
    /// A referenced factor id does not exist.
    #[error("tensor id {0} not found in the network")]
    UnknownTensor(u32),
    /// Id 0 always denotes the network output.
    #[error("tensor id 0 is reserved for the network output")]
    ReservedOutputId,
}

/// FLOP estimate for pairwise contraction of two tensors.
///
/// The cost is the product of the extents of all distinct index labels
/// across both tensors (shared labels counted once). Symmetry assumes a
/// well-formed network: both ends of a shared index agree on its extent.
///
/// # Examples
///
/// ```
/// use tenrun_core::{contraction_cost, Leg, Tensor};
///
/// let a = Tensor::new("a", [Leg::new(0, 10), Leg::new(1, 20)]);
/// let b = Tensor::new("b", [Leg::new(1, 20), Leg::new(2, 30)]);
/// // union of labels {0, 1, 2} => 10 * 20 * 30
/// assert_eq!(contraction_cost(&a, &b), 6000.0);
/// ```
pub fn contraction_cost(a: &Tensor, b: &Tensor) -> f64 {
    let exclusive: f64 = b
        .legs()
        .iter()
        .filter(|leg| !a.has_label(leg.label))
        .map(|leg| leg.extent as f64)
        .product();
    a.volume() * exclusive
}

/// A tensor network: output at id 0, input factors at ids >= 1.
///
/// Iteration is deterministic (ascending id order). Deep copies via
/// [`Clone`] are cheap enough for branch-and-prune searches over candidate
/// contraction orders.
#[derive(Debug, Clone)]
pub struct TensorNetwork {
    tensors: BTreeMap<u32, Tensor>,
}

impl TensorNetwork {
    /// Create a network holding only its output tensor.
    pub fn new(output: Tensor) -> Self {
        let mut tensors = BTreeMap::new();
        tensors.insert(0, output);
        Self { tensors }
    }

    /// Add an input factor under the given nonzero id.
    pub fn add_factor(&mut self, id: u32, tensor: Tensor) -> Result<(), NetworkError> {
        if id == 0 {
            return Err(NetworkError::ReservedOutputId);
        }
        if self.tensors.contains_key(&id) {
            return Err(NetworkError::DuplicateTensor(id));
        }
        self.tensors.insert(id, tensor);
        Ok(())
    }

    /// The output tensor (id 0).
    pub fn output(&self) -> &Tensor {
        &self.tensors[&0]
    }

    /// Tensor under the given id, if present.
    pub fn tensor(&self, id: u32) -> Option<&Tensor> {
        self.tensors.get(&id)
    }

    /// Number of input factors (the output at id 0 is not counted).
    pub fn num_tensors(&self) -> usize {
        self.tensors.len() - 1
    }

    /// Ids of the input factors, ascending.
    pub fn factor_ids(&self) -> Vec<u32> {
        self.tensors.keys().copied().filter(|&id| id != 0).collect()
    }

    /// Iterate over all `(id, tensor)` pairs, output included, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Tensor)> {
        self.tensors.iter().map(|(&id, t)| (id, t))
    }

    /// Fuse factors `i` and `j` into a fresh intermediate under `new_id`.
    ///
    /// Shared index labels are contracted away; the intermediate keeps the
    /// remaining legs of both factors, sorted by label. Returns `false`
    /// when the merge is ill-formed: `i` or `j` missing or equal, either
    /// referring to the output, or `new_id` already taken.
    pub fn merge_tensors(&mut self, i: u32, j: u32, new_id: u32) -> bool {
        if i == 0 || j == 0 || i == j || new_id == 0 || self.tensors.contains_key(&new_id) {
            return false;
        }
        if !self.tensors.contains_key(&i) || !self.tensors.contains_key(&j) {
            return false;
        }
        let a = self.tensors.remove(&i).unwrap();
        let b = self.tensors.remove(&j).unwrap();
        let mut legs: Vec<Leg> = Vec::with_capacity(a.rank() + b.rank());
        legs.extend(a.legs().iter().filter(|l| !b.has_label(l.label)));
        legs.extend(b.legs().iter().filter(|l| !a.has_label(l.label)));
        legs.sort_by_key(|l: &Leg| l.label);
        let merged = Tensor::new(format!("_x{new_id}"), legs);
        self.tensors.insert(new_id, merged);
        true
    }

    /// Pairwise contraction cost between the factors under ids `i` and `j`.
    pub fn cost_between(&self, i: u32, j: u32) -> Result<f64, NetworkError> {
        let a = self.tensor(i).ok_or(NetworkError::UnknownTensor(i))?;
        let b = self.tensor(j).ok_or(NetworkError::UnknownTensor(j))?;
        Ok(contraction_cost(a, b))
    }

    /// All index labels currently present on the input factors.
    pub fn open_labels(&self) -> Vec<IndexLabel> {
        let mut labels: Vec<IndexLabel> = self
            .tensors
            .iter()
            .filter(|(&id, _)| id != 0)
            .flat_map(|(_, t)| t.legs().iter().map(|l| l.label))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}
