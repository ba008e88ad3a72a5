//! # tenrun-exec
//!
//! Executor facades for the TenRun tensor-operation graph.
//!
//! This crate provides:
//! - [`NodeExecutor`] - runs one tensor operation on a compute backend
//! - [`GraphExecutor`] - drives a whole graph: poll ready vertices,
//!   dispatch, retire
//! - [`EagerGraphExecutor`] - dispatches as soon as a vertex becomes ready
//! - [`LazyGraphExecutor`] - defers dispatch until the sync point, then
//!   drains a precomputed schedule
//! - [`LoggingNodeExecutor`] - the arithmetic-free stand-in backend
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tenrun_core::{Leg, OpCode, Tensor, TensorOperation};
//! use tenrun_exec::{EagerGraphExecutor, GraphExecutor, LoggingNodeExecutor};
//! use tenrun_graph::TensorGraph;
//!
//! let dag = TensorGraph::new();
//! let x = Arc::new(Tensor::new("x", [Leg::new(0, 8)]));
//! dag.add_operation(Arc::new(TensorOperation::new(OpCode::Create, vec![x.clone()])));
//! dag.add_operation(Arc::new(TensorOperation::new(OpCode::Transform, vec![x])));
//!
//! let backend = LoggingNodeExecutor::new();
//! let retired = EagerGraphExecutor::new().execute(&dag, &backend)?;
//! assert_eq!(retired, 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod eager;
pub mod executor;
pub mod lazy;

pub use eager::EagerGraphExecutor;
pub use executor::{GraphExecutor, LoggingNodeExecutor, NodeExecutor};
pub use lazy::LazyGraphExecutor;
