//! # tenrun-planner
//!
//! Contraction-sequence optimization for TenRun tensor networks.
//!
//! Execution cost of a tensor network is a strong function of the order in
//! which its factors are pairwise contracted. This crate searches for a
//! cheap order before any operation is emitted:
//!
//! - [`BeamSearchOptimizer`] - bounded-beam best-first search; the beam
//!   width (`num_walkers`) trades planning time for schedule quality
//! - [`AppearanceOrderOptimizer`] - zero-effort baseline contracting
//!   factors in id order
//! - [`ContractionPlanner`] - the strategy trait both implement
//!
//! ## Quick Start
//!
//! ```
//! use tenrun_core::{Leg, Tensor, TensorNetwork};
//! use tenrun_planner::{BeamSearchOptimizer, ContractionPlanner};
//!
//! // out(a,c) = a(a,b) * b(b,c)
//! let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 8), Leg::new(2, 8)]));
//! net.add_factor(1, Tensor::new("a", [Leg::new(0, 8), Leg::new(1, 16)])).unwrap();
//! net.add_factor(2, Tensor::new("b", [Leg::new(1, 16), Leg::new(2, 8)])).unwrap();
//!
//! let planner = BeamSearchOptimizer::with_num_walkers(8);
//! let mut next_id = 4u32;
//! let (schedule, flops) = planner.determine_sequence(&net, &mut || {
//!     let id = next_id;
//!     next_id += 1;
//!     id
//! });
//!
//! assert_eq!(schedule.len(), 1);
//! assert_eq!(flops, 1024.0);
//! ```

pub mod api;
pub mod beam;
pub mod naive;

pub use api::{ContractionPlanner, ContractionSequence, ContrTriple};
pub use beam::{BeamSearchOptimizer, DEFAULT_NUM_WALKERS};
pub use naive::AppearanceOrderOptimizer;
