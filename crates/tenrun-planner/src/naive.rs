//! Appearance-order contraction scheduling.
//!
//! The simplest possible strategy: contract the two lowest-numbered
//! factors, then repeat. Useful as a baseline when comparing planners and
//! as a stand-in where planning time must be zero.

use tenrun_core::TensorNetwork;

use crate::api::{ContractionPlanner, ContractionSequence, ContrTriple};

/// Contracts factors pairwise in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct AppearanceOrderOptimizer;

impl AppearanceOrderOptimizer {
    /// Create the optimizer.
    pub fn new() -> Self {
        Self
    }
}

impl ContractionPlanner for AppearanceOrderOptimizer {
    fn determine_sequence(
        &self,
        network: &TensorNetwork,
        next_intermediate_id: &mut dyn FnMut() -> u32,
    ) -> (ContractionSequence, f64) {
        let mut net = network.clone();
        let mut sequence = Vec::new();
        let mut total_cost = 0.0;

        while net.num_tensors() >= 2 {
            let ids = net.factor_ids();
            let (i, j) = (ids[0], ids[1]);
            let Ok(step_cost) = net.cost_between(i, j) else {
                break;
            };
            let last = net.num_tensors() == 2;
            let new_id = next_intermediate_id();
            if !net.merge_tensors(i, j, new_id) {
                break;
            }
            total_cost += step_cost;
            sequence.push(ContrTriple {
                result_id: if last { 0 } else { new_id },
                left_id: i,
                right_id: j,
            });
        }
        (sequence, total_cost)
    }
}
