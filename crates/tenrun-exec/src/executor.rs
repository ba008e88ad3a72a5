//! Executor interfaces.
//!
//! The graph is consumed through two pluggable facades: a [`NodeExecutor`]
//! runs one tensor operation to completion on a node-local compute backend;
//! a [`GraphExecutor`] drives a whole graph, dispatching vertices whose
//! dependees have retired and retiring them on success. The numeric
//! backends themselves live outside this crate.

use anyhow::Result;
use parking_lot::Mutex;

use tenrun_core::TensorOperation;
use tenrun_graph::TensorGraph;

/// Executes a single tensor operation, synchronously from the graph's view.
pub trait NodeExecutor: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Run the operation to completion.
    fn execute(&self, op: &TensorOperation) -> Result<()>;
}

/// Drives a tensor-operation graph to completion.
///
/// On successful completion of a vertex the executor must retire it through
/// [`TensorGraph::retire_node`], releasing its hazard records. A failed
/// vertex and everything after it stay unretired; the error is reported
/// upward.
pub trait GraphExecutor: Send + Sync {
    /// Executor name for diagnostics.
    fn name(&self) -> &str;

    /// Execute every unretired vertex, returning how many were retired.
    fn execute(&self, dag: &TensorGraph, node_executor: &dyn NodeExecutor) -> Result<usize>;
}

/// A node executor that performs no arithmetic.
///
/// Records each dispatched operation (rendered to its stable one-line form)
/// and logs it; the stand-in backend for tests and examples.
#[derive(Debug, Default)]
pub struct LoggingNodeExecutor {
    dispatched: Mutex<Vec<String>>,
}

impl LoggingNodeExecutor {
    /// Create an executor with an empty dispatch record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The operations dispatched so far, in dispatch order.
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched.lock().clone()
    }
}

impl NodeExecutor for LoggingNodeExecutor {
    fn name(&self) -> &str {
        "logging"
    }

    fn execute(&self, op: &TensorOperation) -> Result<()> {
        log::debug!("executing {op}");
        self.dispatched.lock().push(op.to_string());
        Ok(())
    }
}
