//! Tensor operands.
//!
//! A [`Tensor`] is the minimal operand the runtime needs: a name, a list of
//! labeled legs (one per mode, each with a symbolic index label and a
//! dimension extent), and a stable identity derived from both. The runtime
//! never touches tensor data; storage belongs to the numeric backends.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::types::{Extent, IndexLabel, TensorId};

/// One tensor mode: a symbolic index label plus its dimension extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leg {
    /// Symbolic index label; equal labels on two tensors mark a connection.
    pub label: IndexLabel,
    /// Dimension extent of this mode.
    pub extent: Extent,
}

impl Leg {
    /// Create a leg with the given label and extent.
    pub fn new(label: IndexLabel, extent: Extent) -> Self {
        Self { label, extent }
    }
}

/// A named tensor operand with labeled legs.
///
/// Construction fixes the identity: [`Tensor::id`] is a hash over the name
/// and the ordered leg list, computed once.
///
/// # Examples
///
/// ```
/// use tenrun_core::{Leg, Tensor};
///
/// let t = Tensor::new("psi", [Leg::new(0, 2), Leg::new(1, 8)]);
/// assert_eq!(t.rank(), 2);
/// assert_eq!(t.volume(), 16.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tensor {
    name: String,
    legs: SmallVec<[Leg; 6]>,
    id: TensorId,
}

impl Tensor {
    /// Create a tensor with the given name and legs.
    ///
    /// # Panics
    ///
    /// Panics if any leg has a zero extent.
    pub fn new(name: impl Into<String>, legs: impl IntoIterator<Item = Leg>) -> Self {
        let name = name.into();
        let legs: SmallVec<[Leg; 6]> = legs.into_iter().collect();
        assert!(
            legs.iter().all(|l| l.extent > 0),
            "tensor {name}: zero-extent leg"
        );
        let id = compute_id(&name, &legs);
        Self { name, legs, id }
    }

    /// Create a rank-0 (scalar) tensor.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, [])
    }

    /// Tensor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered leg list.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of modes.
    pub fn rank(&self) -> usize {
        self.legs.len()
    }

    /// Stable identity of this tensor.
    pub fn id(&self) -> TensorId {
        self.id
    }

    /// Total number of elements, as a float to survive large extents.
    pub fn volume(&self) -> f64 {
        self.legs.iter().map(|l| l.extent as f64).product()
    }

    /// True if any leg carries the given label.
    pub fn has_label(&self, label: IndexLabel) -> bool {
        self.legs.iter().any(|l| l.label == label)
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.legs == other.legs
    }
}

impl Eq for Tensor {}

impl Hash for Tensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (n, leg) in self.legs.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", leg.label, leg.extent)?;
        }
        write!(f, ")")
    }
}

fn compute_id(name: &str, legs: &[Leg]) -> TensorId {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    for leg in legs {
        leg.label.hash(&mut hasher);
        leg.extent.hash(&mut hasher);
    }
    TensorId(hasher.finish())
}
