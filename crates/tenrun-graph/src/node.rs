//! DAG node records.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tenrun_core::TensorOperation;

use crate::VertexId;

/// Execution state of a DAG node, owned by the scheduler above the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeState {
    /// Inserted into the graph, not yet dispatched.
    Submitted = 0,
    /// Dispatched to a node executor.
    Executing = 1,
    /// Finished and retired; its hazard records have been released.
    Completed = 2,
}

impl NodeState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => NodeState::Submitted,
            1 => NodeState::Executing,
            _ => NodeState::Completed,
        }
    }
}

/// A vertex record: the operation plus scheduling bookkeeping.
///
/// One-to-one with a graph vertex. The operation handle is shared with the
/// submitting client; the state flag is atomic so the scheduler can advance
/// it without holding the graph lock.
pub struct TensorOpNode {
    operation: Arc<TensorOperation>,
    id: VertexId,
    state: AtomicU8,
}

impl TensorOpNode {
    /// Wrap an operation for insertion under the given vertex id.
    pub fn new(operation: Arc<TensorOperation>, id: VertexId) -> Self {
        Self {
            operation,
            id,
            state: AtomicU8::new(NodeState::Submitted as u8),
        }
    }

    /// The wrapped operation.
    pub fn operation(&self) -> &Arc<TensorOperation> {
        &self.operation
    }

    /// Vertex id assigned at insertion.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Current execution state.
    pub fn state(&self) -> NodeState {
        NodeState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Advance the execution state.
    pub fn set_state(&self, state: NodeState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// True once the node has been retired.
    pub fn is_completed(&self) -> bool {
        self.state() == NodeState::Completed
    }
}

impl fmt::Debug for TensorOpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorOpNode")
            .field("id", &self.id)
            .field("operation", &format_args!("{}", self.operation))
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenrun_core::{Leg, OpCode, Tensor};

    fn noop() -> Arc<TensorOperation> {
        let t = Arc::new(Tensor::new("t", [Leg::new(0, 2)]));
        Arc::new(TensorOperation::new(OpCode::Noop, vec![t]))
    }

    #[test]
    fn test_new_node_is_submitted() {
        let node = TensorOpNode::new(noop(), 3);
        assert_eq!(node.id(), 3);
        assert_eq!(node.state(), NodeState::Submitted);
        assert!(!node.is_completed());
    }

    #[test]
    fn test_state_transitions() {
        let node = TensorOpNode::new(noop(), 0);
        node.set_state(NodeState::Executing);
        assert_eq!(node.state(), NodeState::Executing);
        node.set_state(NodeState::Completed);
        assert!(node.is_completed());
    }
}
