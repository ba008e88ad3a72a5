//! Lazy graph execution.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use anyhow::{bail, ensure, Result};

use tenrun_graph::{NodeState, TensorGraph, VertexId};

use crate::executor::{GraphExecutor, NodeExecutor};

/// Defers all dispatch to the sync point.
///
/// [`execute`](GraphExecutor::execute) is the sync: it first derives one
/// complete dependency-respecting schedule for every unretired vertex
/// (smallest ready vertex id first, so the order is deterministic), then
/// dispatches the whole schedule in a single drain.
#[derive(Debug, Clone, Default)]
pub struct LazyGraphExecutor;

impl LazyGraphExecutor {
    /// Create the executor.
    pub fn new() -> Self {
        Self
    }
}

/// Kahn-style schedule over the dependee edges of all unretired vertices.
fn schedule(dag: &TensorGraph) -> Result<Vec<VertexId>> {
    let total = dag.num_nodes();
    let mut dependents: Vec<Vec<VertexId>> = vec![Vec::new(); total];
    let mut pending = vec![0usize; total];
    let mut unretired = 0usize;

    for v in 0..total {
        if dag.node_properties(v).is_completed() {
            continue;
        }
        unretired += 1;
        for d in dag.neighbor_list(v) {
            if !dag.node_properties(d).is_completed() {
                pending[v] += 1;
                dependents[d].push(v);
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<VertexId>> = (0..total)
        .filter(|&v| pending[v] == 0 && !dag.node_properties(v).is_completed())
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(unretired);
    while let Some(Reverse(v)) = ready.pop() {
        order.push(v);
        for &w in &dependents[v] {
            pending[w] -= 1;
            if pending[w] == 0 {
                ready.push(Reverse(w));
            }
        }
    }
    ensure!(
        order.len() == unretired,
        "schedule covers {} of {unretired} unretired vertices",
        order.len()
    );
    Ok(order)
}

impl GraphExecutor for LazyGraphExecutor {
    fn name(&self) -> &str {
        "lazy"
    }

    fn execute(&self, dag: &TensorGraph, node_executor: &dyn NodeExecutor) -> Result<usize> {
        let order = schedule(dag)?;
        log::debug!("lazy sync: draining {} nodes", order.len());
        let mut retired = 0usize;
        for v in order {
            let node = dag.node_properties(v);
            if node.state() != NodeState::Submitted {
                bail!("node {v} already in flight");
            }
            node.set_state(NodeState::Executing);
            node_executor.execute(node.operation())?;
            dag.retire_node(v);
            retired += 1;
        }
        Ok(retired)
    }
}
