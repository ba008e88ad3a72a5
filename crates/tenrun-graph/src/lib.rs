//! # tenrun-graph
//!
//! Dependency DAG of tensor operations with data-hazard tracking.
//!
//! This crate provides:
//! - [`TensorGraph`] - an append-only DAG under a single coarse mutex:
//!   operation insertion with automatic hazard-edge derivation, dependency
//!   queries, neighbor listing, Dijkstra shortest paths, and retirement
//! - [`ExecState`] - the per-tensor read/write epoch tracker the graph
//!   consults to turn RAW/WAR/WAW hazards into edges
//! - [`TensorOpNode`] - per-vertex record combining the shared operation
//!   handle with an atomic scheduling state
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tenrun_core::{Leg, OpCode, Tensor, TensorOperation};
//! use tenrun_graph::TensorGraph;
//!
//! let dag = TensorGraph::new();
//! let x = Arc::new(Tensor::new("x", [Leg::new(0, 8)]));
//! let y = Arc::new(Tensor::new("y", [Leg::new(0, 8)]));
//!
//! let a = dag.add_operation(Arc::new(TensorOperation::new(OpCode::Create, vec![x.clone()])));
//! let b = dag.add_operation(Arc::new(TensorOperation::new(
//!     OpCode::Add,
//!     vec![y, x], // y += x reads what a wrote
//! )));
//!
//! assert!(dag.dependency_exists(b, a));
//! assert_eq!(dag.num_nodes(), 2);
//! ```

pub mod dag;
pub mod exec_state;
pub mod node;

pub use dag::TensorGraph;
pub use exec_state::ExecState;
pub use node::{NodeState, TensorOpNode};

/// Vertex id within one graph: dense, contiguous, assigned in insertion
/// order starting at 0, never reused within the graph's lifetime.
pub type VertexId = usize;
