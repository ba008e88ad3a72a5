//! Per-tensor execution state: the data-hazard tracker.
//!
//! For each live tensor the tracker records the node that last wrote it and
//! the set of nodes that have read it since (and are not yet retired). The
//! graph consults these records on every insertion to derive the ordering
//! edges a new operation must respect:
//!
//! - a new **writer** depends on the prior writer and on every outstanding
//!   reader (write-after-write, write-after-read);
//! - a new **reader** depends on the live writer only (read-after-write);
//!   readers never order against readers.
//!
//! The epoch view ([`ExecState::tensor_epoch_nodes`]) reports the tensor's
//! most recent use: a write epoch (tag −1, single producer) until the first
//! read arrives, then a read epoch (tag = number of outstanding readers).

use std::collections::HashMap;

use crate::VertexId;
use tenrun_core::TensorId;

/// Epoch tag marking a write epoch.
const WRITE_EPOCH: i64 = -1;

#[derive(Debug, Default)]
struct TensorUse {
    writer: Option<VertexId>,
    readers: Vec<VertexId>,
}

impl TensorUse {
    fn is_empty(&self) -> bool {
        self.writer.is_none() && self.readers.is_empty()
    }
}

/// Tracker of the last writer and outstanding readers of every live tensor.
#[derive(Debug, Default)]
pub struct ExecState {
    tensors: HashMap<TensorId, TensorUse>,
}

impl ExecState {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch nodes and tag for a tensor, or `None` if untracked.
    ///
    /// While no read has followed the last write, the tensor is in its
    /// write epoch: the slice holds the single writer and the tag is −1.
    /// Once readers are outstanding, the tensor is in a read epoch: the
    /// slice holds the readers (in registration order) and the tag counts
    /// them.
    pub fn tensor_epoch_nodes(&self, tensor: TensorId) -> Option<(&[VertexId], i64)> {
        let entry = self.tensors.get(&tensor)?;
        if entry.readers.is_empty() {
            entry
                .writer
                .as_ref()
                .map(|w| (std::slice::from_ref(w), WRITE_EPOCH))
        } else {
            Some((entry.readers.as_slice(), entry.readers.len() as i64))
        }
    }

    /// The node that last wrote the tensor, if still unretired.
    ///
    /// Unlike the epoch view, the writer stays visible while readers
    /// accumulate, so every subsequent reader can order against it.
    pub fn tensor_writer(&self, tensor: TensorId) -> Option<VertexId> {
        self.tensors.get(&tensor).and_then(|entry| entry.writer)
    }

    /// Register `node` as the new writer of `tensor`, opening a write epoch.
    ///
    /// The prior writer and all outstanding readers are dropped; the caller
    /// must have derived its ordering edges from them first.
    pub fn register_tensor_write(&mut self, tensor: TensorId, node: VertexId) {
        let entry = self.tensors.entry(tensor).or_default();
        entry.writer = Some(node);
        entry.readers.clear();
    }

    /// Register `node` as a reader of `tensor`.
    ///
    /// Returns the number of outstanding readers after registration.
    pub fn register_tensor_read(&mut self, tensor: TensorId, node: VertexId) -> i64 {
        let entry = self.tensors.entry(tensor).or_default();
        entry.readers.push(node);
        entry.readers.len() as i64
    }

    /// Drop a retired reader from a tensor's reader set.
    ///
    /// No-op when the node is not among the readers (a later write already
    /// superseded the record). The tensor entry vanishes once neither a
    /// writer nor readers remain.
    pub fn deregister_tensor_read(&mut self, tensor: TensorId, node: VertexId) {
        if let Some(entry) = self.tensors.get_mut(&tensor) {
            if let Some(pos) = entry.readers.iter().position(|&n| n == node) {
                entry.readers.remove(pos);
            }
            if entry.is_empty() {
                self.tensors.remove(&tensor);
            }
        }
    }

    /// Drop a retired writer from a tensor's writer slot.
    ///
    /// No-op unless `node` is still the current writer (a later write
    /// already superseded the record).
    pub fn deregister_tensor_write(&mut self, tensor: TensorId, node: VertexId) {
        if let Some(entry) = self.tensors.get_mut(&tensor) {
            if entry.writer == Some(node) {
                entry.writer = None;
            }
            if entry.is_empty() {
                self.tensors.remove(&tensor);
            }
        }
    }

    /// Number of tensors currently tracked.
    pub fn num_tracked(&self) -> usize {
        self.tensors.len()
    }

    /// Drop all state.
    pub fn clear(&mut self) {
        self.tensors.clear();
    }
}
