//! Eager graph execution.

use anyhow::{bail, Context, Result};

use tenrun_graph::{NodeState, TensorGraph};

use crate::executor::{GraphExecutor, NodeExecutor};

/// Dispatches every vertex as soon as its dependees have retired.
///
/// Scans the graph in vertex-id order, repeatedly: a vertex whose direct
/// dependees are all completed is dispatched to the node executor and
/// retired on success. Vertices appended concurrently are picked up by
/// later scans.
#[derive(Debug, Clone, Default)]
pub struct EagerGraphExecutor;

impl EagerGraphExecutor {
    /// Create the executor.
    pub fn new() -> Self {
        Self
    }
}

impl GraphExecutor for EagerGraphExecutor {
    fn name(&self) -> &str {
        "eager"
    }

    fn execute(&self, dag: &TensorGraph, node_executor: &dyn NodeExecutor) -> Result<usize> {
        let mut retired = 0usize;
        loop {
            let total = dag.num_nodes();
            let remaining = (0..total)
                .filter(|&v| !dag.node_properties(v).is_completed())
                .count();
            if remaining == 0 {
                break;
            }
            let mut progressed = false;
            for v in 0..total {
                let node = dag.node_properties(v);
                if node.state() != NodeState::Submitted {
                    continue;
                }
                let ready = dag
                    .neighbor_list(v)
                    .iter()
                    .all(|&d| dag.node_properties(d).is_completed());
                if !ready {
                    continue;
                }
                node.set_state(NodeState::Executing);
                log::debug!("dispatching node {v} on {}", node_executor.name());
                node_executor
                    .execute(node.operation())
                    .with_context(|| format!("node {v} ({}) failed", node.operation()))?;
                dag.retire_node(v);
                retired += 1;
                progressed = true;
            }
            if !progressed {
                bail!("no dispatchable vertex among {remaining} remaining");
            }
        }
        log::debug!("eager execution retired {retired} nodes");
        Ok(retired)
    }
}
