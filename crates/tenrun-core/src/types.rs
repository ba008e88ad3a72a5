//! Fundamental identifier types shared across the TenRun stack.
//!
//! - [`TensorId`] - stable 64-bit identity of a tensor operand
//! - [`IndexLabel`] - symbolic label of a tensor mode (einsum-style index)
//! - [`Extent`] - dimension extent of a tensor mode

use std::fmt;

/// Symbolic label of a tensor mode.
///
/// Two tensor legs carrying the same label are understood to be connected
/// (contracted over) when both tensors participate in a pairwise contraction.
pub type IndexLabel = u32;

/// Dimension extent of a tensor mode.
pub type Extent = u64;

/// Stable 64-bit identity of a tensor operand.
///
/// Derived from the tensor's name and mode structure; two tensors with the
/// same name, labels, and extents share the same identity. The runtime keys
/// all hazard bookkeeping on this value and never dereferences tensor data.
///
/// # Examples
///
/// ```
/// use tenrun_core::{Leg, Tensor};
///
/// let a = Tensor::new("a", [Leg::new(0, 16), Leg::new(1, 32)]);
/// let b = Tensor::new("a", [Leg::new(0, 16), Leg::new(1, 32)]);
/// assert_eq!(a.id(), b.id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorId(pub u64);

impl fmt::Display for TensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
