//! # TenRun - Tensor-Network Runtime Execution Core
//!
//! Client code submits tensor operations that reference named operands; the
//! runtime arranges them into a dependency graph, schedules them respecting
//! data hazards, and drives a pluggable executor. A contraction-sequence
//! planner pre-optimizes the order in which a tensor network's factors are
//! pairwise contracted, because execution cost is a strong function of that
//! order.
//!
//! This is the **meta crate** re-exporting all TenRun components.
//!
//! ## Components
//!
//! ### Core types ([`core`])
//!
//! Tensors with labeled legs, tensor operations, and the tensor-network
//! value type with its contraction cost model.
//!
//! ### Dependency graph ([`graph`])
//!
//! The append-only DAG of tensor operations with read/write hazard
//! tracking, dependency queries, and shortest paths.
//!
//! ### Planner ([`planner`])
//!
//! Bounded-beam contraction-sequence optimization.
//!
//! ### Executors ([`exec`])
//!
//! Eager and lazy graph drivers over a pluggable node-executor backend.
//!
//! ## Quick Start
//!
//! Plan a contraction order, submit the resulting operations, execute:
//!
//! ```
//! use std::sync::Arc;
//! use tenrun::prelude::*;
//!
//! // out(a,c) = m1(a,b) * m2(b,c)
//! let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 4), Leg::new(2, 4)]));
//! net.add_factor(1, Tensor::new("m1", [Leg::new(0, 4), Leg::new(1, 8)]))?;
//! net.add_factor(2, Tensor::new("m2", [Leg::new(1, 8), Leg::new(2, 4)]))?;
//!
//! // 1. plan the pairwise contraction schedule
//! let planner = BeamSearchOptimizer::with_num_walkers(8);
//! let mut next_id = 100u32;
//! let (schedule, flops) = planner.determine_sequence(&net, &mut || {
//!     let id = next_id;
//!     next_id += 1;
//!     id
//! });
//! assert_eq!(schedule.len(), 1);
//! assert!(flops > 0.0);
//!
//! // 2. submit one operation per triple
//! let dag = TensorGraph::new();
//! for triple in &schedule {
//!     let result = Arc::new(net.output().clone());
//!     let left = Arc::new(net.tensor(triple.left_id).unwrap().clone());
//!     let right = Arc::new(net.tensor(triple.right_id).unwrap().clone());
//!     dag.add_operation(Arc::new(TensorOperation::new(
//!         OpCode::Contract,
//!         vec![result, left, right],
//!     )));
//! }
//!
//! // 3. drive the graph on a backend
//! let backend = LoggingNodeExecutor::new();
//! let retired = EagerGraphExecutor::new().execute(&dag, &backend)?;
//! assert_eq!(retired, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use tenrun_core as core;
pub use tenrun_exec as exec;
pub use tenrun_graph as graph;
pub use tenrun_planner as planner;

/// Convenient access to the whole stack.
pub mod prelude {
    pub use tenrun_core::{
        contraction_cost, Complex64, Extent, IndexLabel, Leg, NetworkError, OpCode, Tensor,
        TensorId, TensorNetwork, TensorOperation,
    };
    pub use tenrun_exec::{
        EagerGraphExecutor, GraphExecutor, LazyGraphExecutor, LoggingNodeExecutor, NodeExecutor,
    };
    pub use tenrun_graph::{ExecState, NodeState, TensorGraph, TensorOpNode, VertexId};
    pub use tenrun_planner::{
        AppearanceOrderOptimizer, BeamSearchOptimizer, ContractionPlanner, ContractionSequence,
        ContrTriple, DEFAULT_NUM_WALKERS,
    };
}
