//! # tenrun-core
//!
//! Core value types for the TenRun tensor runtime.
//!
//! This crate defines what the rest of the stack computes *about*, without
//! owning any tensor data:
//!
//! - [`Tensor`] - named operand with labeled legs and a stable identity
//! - [`TensorOperation`] - opcode + operands + scalar prefactors + pattern
//! - [`TensorNetwork`] - output plus input factors, with pairwise merging
//!   and the contraction cost model the planner searches over
//!
//! ## Quick Start
//!
//! ```
//! use tenrun_core::{contraction_cost, Leg, Tensor, TensorNetwork};
//!
//! let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 2), Leg::new(2, 2)]));
//! net.add_factor(1, Tensor::new("a", [Leg::new(0, 2), Leg::new(1, 4)]))?;
//! net.add_factor(2, Tensor::new("b", [Leg::new(1, 4), Leg::new(2, 2)]))?;
//!
//! assert_eq!(net.num_tensors(), 2);
//! assert_eq!(net.cost_between(1, 2)?, 16.0);
//! # Ok::<(), tenrun_core::NetworkError>(())
//! ```

pub mod network;
pub mod operation;
mod property_tests;
pub mod tensor;
pub mod types;

pub use network::{contraction_cost, NetworkError, TensorNetwork};
pub use operation::{OpCode, TensorOperation};
pub use tensor::{Leg, Tensor};
pub use types::{Extent, IndexLabel, TensorId};

pub use num_complex::Complex64;
