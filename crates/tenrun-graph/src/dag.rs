//! The tensor-operation dependency graph.
//!
//! An append-only DAG: vertices carry [`TensorOpNode`] records, directed
//! edges mean "dependent may not start until dependee has completed". Edges
//! are derived from data hazards at insertion time by consulting the
//! [`ExecState`] tracker, so the graph is acyclic by construction - every
//! edge points from a newly inserted vertex to an already-existing one.
//!
//! The whole graph is guarded by a single coarse mutex; every public
//! operation acquires it on entry through a scoped guard and no public
//! operation invokes another under its own lock. Concurrent insertions are
//! linearizable; vertex ids equal the serialization order.

use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use tenrun_core::TensorOperation;

use crate::exec_state::ExecState;
use crate::node::{NodeState, TensorOpNode};
use crate::VertexId;

#[derive(Debug, Clone, Copy)]
struct Edge {
    target: VertexId,
    weight: f64,
}

#[derive(Default)]
struct DagInner {
    nodes: Vec<Arc<TensorOpNode>>,
    /// Out-adjacency per vertex, in edge-insertion order.
    edges: Vec<Vec<Edge>>,
    num_edges: usize,
    exec_state: ExecState,
}

impl DagInner {
    fn add_edge(&mut self, dependent: VertexId, dependee: VertexId, weight: f64) {
        if self.edges[dependent].iter().any(|e| e.target == dependee) {
            return; // hazard-derived edges may repeat; keep the first
        }
        self.edges[dependent].push(Edge {
            target: dependee,
            weight,
        });
        self.num_edges += 1;
    }
}

/// Append-only directed acyclic graph of tensor operations.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenrun_core::{Leg, OpCode, Tensor, TensorOperation};
/// use tenrun_graph::TensorGraph;
///
/// let dag = TensorGraph::new();
/// let x = Arc::new(Tensor::new("x", [Leg::new(0, 4)]));
///
/// let a = dag.add_operation(Arc::new(TensorOperation::new(OpCode::Create, vec![x.clone()])));
/// let b = dag.add_operation(Arc::new(TensorOperation::new(OpCode::Transform, vec![x])));
///
/// // b overwrites x after a wrote it: write-after-write ordering
/// assert!(dag.dependency_exists(b, a));
/// ```
#[derive(Default)]
pub struct TensorGraph {
    inner: Mutex<DagInner>,
}

impl TensorGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new operation, deriving its hazard edges, and return the
    /// vertex id assigned to it.
    ///
    /// Ordering edges are inserted against the prior use of every operand:
    /// the output tensor orders against its live writer and every
    /// outstanding reader (write-after-write, write-after-read); each input
    /// tensor orders against its live writer (read-after-write). An
    /// operation whose output aliases one of its inputs never receives a
    /// self-edge.
    pub fn add_operation(&self, op: Arc<TensorOperation>) -> VertexId {
        let mut g = self.inner.lock();
        let vid = g.nodes.len();
        g.nodes.push(Arc::new(TensorOpNode::new(op.clone(), vid)));
        g.edges.push(Vec::new());

        // Output operand: order against the writer and all readers.
        let output = op.operand(0).id();
        let mut prior: SmallVec<[VertexId; 8]> = SmallVec::new();
        prior.extend(g.exec_state.tensor_writer(output));
        if let Some((nodes, epoch)) = g.exec_state.tensor_epoch_nodes(output) {
            if epoch >= 0 {
                prior.extend(nodes.iter().copied());
            }
        }
        for dependee in prior {
            if dependee != vid {
                g.add_edge(vid, dependee, 1.0);
            }
        }
        g.exec_state.register_tensor_write(output, vid);

        // Input operands: order against the live writer only.
        for pos in 1..op.num_operands() {
            let tensor = op.operand(pos).id();
            if let Some(writer) = g.exec_state.tensor_writer(tensor) {
                if writer != vid {
                    g.add_edge(vid, writer, 1.0);
                }
            }
            g.exec_state.register_tensor_read(tensor, vid);
        }
        log::trace!("inserted node {vid}: {op}");
        vid
    }

    /// Insert a directed edge marking `dependent` as depending on
    /// `dependee`, with the default unit weight. Duplicate insertions keep
    /// the existing edge.
    ///
    /// # Panics
    ///
    /// Panics if either vertex id is out of range.
    pub fn add_dependency(&self, dependent: VertexId, dependee: VertexId) {
        self.add_weighted_dependency(dependent, dependee, 1.0);
    }

    /// [`add_dependency`](Self::add_dependency) with an explicit nonnegative
    /// edge weight, consumed only by the shortest-path facility.
    pub fn add_weighted_dependency(&self, dependent: VertexId, dependee: VertexId, weight: f64) {
        assert!(weight >= 0.0, "edge weight must be nonnegative");
        let mut g = self.inner.lock();
        let n = g.nodes.len();
        assert!(dependent < n, "vertex id {dependent} out of range ({n} nodes)");
        assert!(dependee < n, "vertex id {dependee} out of range ({n} nodes)");
        g.add_edge(dependent, dependee, weight);
    }

    /// True iff a direct edge from `a` to `b` exists (not transitive).
    pub fn dependency_exists(&self, a: VertexId, b: VertexId) -> bool {
        let g = self.inner.lock();
        g.edges
            .get(a)
            .is_some_and(|out| out.iter().any(|e| e.target == b))
    }

    /// The node record of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn node_properties(&self, vertex: VertexId) -> Arc<TensorOpNode> {
        let g = self.inner.lock();
        let n = g.nodes.len();
        assert!(vertex < n, "vertex id {vertex} out of range ({n} nodes)");
        g.nodes[vertex].clone()
    }

    /// Out-degree of a vertex: the number of its direct dependees.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn node_degree(&self, vertex: VertexId) -> usize {
        let g = self.inner.lock();
        let n = g.nodes.len();
        assert!(vertex < n, "vertex id {vertex} out of range ({n} nodes)");
        g.edges[vertex].len()
    }

    /// Total number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    /// Total number of dependency edges.
    pub fn num_dependencies(&self) -> usize {
        self.inner.lock().num_edges
    }

    /// Direct dependees of a vertex, in edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn neighbor_list(&self, vertex: VertexId) -> Vec<VertexId> {
        let g = self.inner.lock();
        let n = g.nodes.len();
        assert!(vertex < n, "vertex id {vertex} out of range ({n} nodes)");
        g.edges[vertex].iter().map(|e| e.target).collect()
    }

    /// Single-source shortest paths (Dijkstra) over the edge weights.
    ///
    /// Returns one entry per vertex in id order: the minimum total weight
    /// from `start` (unreachable vertices hold `f64::INFINITY`) and the
    /// predecessor on a shortest path (the vertex itself for `start` and
    /// for unreachable vertices). When several shortest paths exist, the
    /// smaller predecessor id wins.
    ///
    /// Runs under the graph lock; long for large graphs.
    ///
    /// # Panics
    ///
    /// Panics if `start` is out of range (in particular, on an empty graph).
    pub fn compute_shortest_path(&self, start: VertexId) -> (Vec<f64>, Vec<VertexId>) {
        let g = self.inner.lock();
        let n = g.nodes.len();
        assert!(start < n, "vertex id {start} out of range ({n} nodes)");

        let mut dist = vec![f64::INFINITY; n];
        let mut pred: Vec<VertexId> = (0..n).collect();
        let mut settled = vec![false; n];
        dist[start] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(MinDist {
            dist: 0.0,
            vertex: start,
        });
        while let Some(MinDist { dist: d, vertex: u }) = heap.pop() {
            if settled[u] {
                continue;
            }
            settled[u] = true;
            for edge in &g.edges[u] {
                let v = edge.target;
                let nd = d + edge.weight;
                if nd < dist[v] {
                    dist[v] = nd;
                    pred[v] = u;
                    heap.push(MinDist { dist: nd, vertex: v });
                } else if nd == dist[v] && u < pred[v] {
                    pred[v] = u;
                }
            }
        }
        (dist, pred)
    }

    /// Release the hazard records of a completed vertex and mark it done.
    ///
    /// Required of any graph executor on successful completion: the vertex
    /// is removed from the reader sets of its inputs and, if still current,
    /// from the writer slot of its output. Edges are kept - other vertices
    /// may still reference this one.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn retire_node(&self, vertex: VertexId) {
        let mut g = self.inner.lock();
        let n = g.nodes.len();
        assert!(vertex < n, "vertex id {vertex} out of range ({n} nodes)");
        let node = g.nodes[vertex].clone();
        let op = node.operation();
        for pos in 1..op.num_operands() {
            let tensor = op.operand(pos).id();
            g.exec_state.deregister_tensor_read(tensor, vertex);
        }
        g.exec_state.deregister_tensor_write(op.operand(0).id(), vertex);
        node.set_state(NodeState::Completed);
        log::trace!("retired node {vertex}");
    }

    /// Remove every vertex and edge and drop all hazard state.
    pub fn clear(&self) {
        let mut g = self.inner.lock();
        g.nodes.clear();
        g.edges.clear();
        g.num_edges = 0;
        g.exec_state.clear();
    }

    /// Log the DAG listing at info level.
    pub fn print(&self) {
        log::info!("{self}");
    }
}

impl fmt::Display for TensorGraph {
    /// One line per vertex: its id, operation, and direct dependees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.inner.lock();
        writeln!(f, "dag: {} nodes, {} dependencies", g.nodes.len(), g.num_edges)?;
        for (vid, out) in g.edges.iter().enumerate() {
            write!(f, "node {vid} {}: depends on [", g.nodes[vid].operation())?;
            for (n, edge) in out.iter().enumerate() {
                if n > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", edge.target)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Min-heap entry: the smallest tentative distance pops first; equal
/// distances pop in ascending vertex order for determinism.
#[derive(Debug, Clone, Copy)]
struct MinDist {
    dist: f64,
    vertex: VertexId,
}

impl Ord for MinDist {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for MinDist {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MinDist {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for MinDist {}
