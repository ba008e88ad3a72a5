//! Bounded-beam contraction-sequence search.
//!
//! # Algorithm
//!
//! A *path* is a partially contracted network together with the triples
//! that produced it and their cumulative FLOP cost. Starting from the
//! input network, each pass extends every surviving path by one pairwise
//! contraction:
//!
//! 1. Draw one fresh intermediate id from the caller's generator.
//! 2. For every path and every unordered pair of remaining factors, price
//!    the pair with the network cost routine, clone the network, merge the
//!    pair, and append the new triple.
//! 3. Push each child into a worst-on-top priority queue; when the queue
//!    exceeds the beam width, pop the most expensive entry, so the queue
//!    always keeps the cheapest `num_walkers` paths.
//! 4. Drain the queue into the next beam. The final pass drains to the
//!    single cheapest path instead; its last triple targets the network
//!    output (id 0).
//!
//! A network with *n* factors is scheduled in exactly *n* − 1 passes, so
//! the search visits O(n³ · num_walkers) pair extensions overall, each
//! paying one network clone.
//!
//! Ties on cumulative cost are broken toward the earlier-inserted
//! candidate, which makes the search deterministic for a fixed input and
//! generator.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tenrun_core::TensorNetwork;

use crate::api::{ContractionPlanner, ContractionSequence, ContrTriple};

/// Default beam width.
pub const DEFAULT_NUM_WALKERS: usize = 1024;

/// One candidate contraction path.
#[derive(Debug, Clone)]
struct Candidate {
    cost: f64,
    /// Insertion sequence number; earlier candidates win cost ties.
    seq_no: u64,
    network: TensorNetwork,
    sequence: ContractionSequence,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.seq_no.cmp(&other.seq_no))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Heuristic contraction-sequence optimizer with a bounded beam.
///
/// Larger beams explore more candidate schedules and find cheaper ones at
/// the price of planning time; a beam of one degenerates to greedy search.
///
/// # Examples
///
/// ```
/// use tenrun_core::{Leg, Tensor, TensorNetwork};
/// use tenrun_planner::{BeamSearchOptimizer, ContractionPlanner};
///
/// let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 2), Leg::new(2, 2)]));
/// net.add_factor(1, Tensor::new("a", [Leg::new(0, 2), Leg::new(1, 4)])).unwrap();
/// net.add_factor(2, Tensor::new("b", [Leg::new(1, 4), Leg::new(2, 2)])).unwrap();
///
/// let planner = BeamSearchOptimizer::with_num_walkers(4);
/// let mut next_id = 100u32;
/// let (seq, cost) = planner.determine_sequence(&net, &mut || {
///     let id = next_id;
///     next_id += 1;
///     id
/// });
/// assert_eq!(seq.len(), 1);
/// assert_eq!(seq[0].result_id, 0);
/// assert_eq!(cost, 16.0);
/// ```
#[derive(Debug, Clone)]
pub struct BeamSearchOptimizer {
    num_walkers: usize,
}

impl BeamSearchOptimizer {
    /// Create an optimizer with the default beam width.
    pub fn new() -> Self {
        Self {
            num_walkers: DEFAULT_NUM_WALKERS,
        }
    }

    /// Create an optimizer with an explicit beam width.
    ///
    /// # Panics
    ///
    /// Panics if `num_walkers` is zero.
    pub fn with_num_walkers(num_walkers: usize) -> Self {
        assert!(num_walkers >= 1, "beam width must be positive");
        Self { num_walkers }
    }

    /// Current beam width.
    pub fn num_walkers(&self) -> usize {
        self.num_walkers
    }

    /// Change the beam width.
    ///
    /// # Panics
    ///
    /// Panics if `num_walkers` is zero.
    pub fn reset_num_walkers(&mut self, num_walkers: usize) {
        assert!(num_walkers >= 1, "beam width must be positive");
        self.num_walkers = num_walkers;
    }
}

impl Default for BeamSearchOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractionPlanner for BeamSearchOptimizer {
    fn determine_sequence(
        &self,
        network: &TensorNetwork,
        next_intermediate_id: &mut dyn FnMut() -> u32,
    ) -> (ContractionSequence, f64) {
        let num_factors = network.num_tensors();
        if num_factors < 2 {
            return (Vec::new(), 0.0);
        }
        let num_contractions = num_factors - 1;

        let mut beam = vec![Candidate {
            cost: 0.0,
            seq_no: 0,
            network: network.clone(),
            sequence: Vec::new(),
        }];
        let mut seq_no: u64 = 0;

        for pass in 0..num_contractions {
            let last_pass = pass + 1 == num_contractions;
            let intermediate_id = next_intermediate_id();
            let mut queue: BinaryHeap<Candidate> = BinaryHeap::new();
            let mut num_children = 0usize;

            for parent in &beam {
                let ids = parent.network.factor_ids();
                for (pos, &i) in ids.iter().enumerate() {
                    for &j in &ids[pos + 1..] {
                        let Ok(step_cost) = parent.network.cost_between(i, j) else {
                            continue;
                        };
                        let mut child_network = parent.network.clone();
                        if !child_network.merge_tensors(i, j, intermediate_id) {
                            continue;
                        }
                        let mut sequence = parent.sequence.clone();
                        sequence.push(ContrTriple {
                            result_id: if last_pass { 0 } else { intermediate_id },
                            left_id: i,
                            right_id: j,
                        });
                        seq_no += 1;
                        queue.push(Candidate {
                            cost: parent.cost + step_cost,
                            seq_no,
                            network: child_network,
                            sequence,
                        });
                        if queue.len() > self.num_walkers {
                            queue.pop(); // shed the most expensive path
                        }
                        num_children += 1;
                    }
                }
            }

            log::debug!(
                "pass {pass}: {num_children} candidates considered, {} retained",
                queue.len()
            );

            let drained = queue.into_sorted_vec();
            if last_pass {
                return match drained.into_iter().next() {
                    Some(best) => {
                        log::debug!("best contraction sequence costs {:.3e} flops", best.cost);
                        (best.sequence, best.cost)
                    }
                    None => (Vec::new(), 0.0),
                };
            }
            beam = drained;
        }
        unreachable!("final pass returns directly")
    }
}
