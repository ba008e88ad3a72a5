//! Integration tests for contraction-sequence planning.
//!
//! Schedules are checked by replaying them against a copy of the network:
//! every referenced factor must be present at its step and every merge
//! must succeed, ending in a single remaining factor.

use tenrun_core::{Leg, Tensor, TensorNetwork};
use tenrun_planner::{
    AppearanceOrderOptimizer, BeamSearchOptimizer, ContractionPlanner, ContrTriple,
};

fn counter_from(start: u32) -> impl FnMut() -> u32 {
    let mut next = start;
    move || {
        let id = next;
        next += 1;
        id
    }
}

/// Linear chain of `n` factors with uniform extent 2.
fn chain(n: u32) -> TensorNetwork {
    let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 2), Leg::new(n, 2)]));
    for k in 0..n {
        net.add_factor(
            k + 1,
            Tensor::new(format!("t{}", k + 1), [Leg::new(k, 2), Leg::new(k + 1, 2)]),
        )
        .unwrap();
    }
    net
}

/// Replay a schedule on a copy of the network, checking step validity.
fn replay(network: &TensorNetwork, schedule: &[ContrTriple]) {
    let mut net = network.clone();
    for (step, triple) in schedule.iter().enumerate() {
        assert!(
            net.tensor(triple.left_id).is_some(),
            "step {step}: left factor {} missing",
            triple.left_id
        );
        assert!(
            net.tensor(triple.right_id).is_some(),
            "step {step}: right factor {} missing",
            triple.right_id
        );
        let last = step + 1 == schedule.len();
        assert_eq!(triple.result_id == 0, last, "only the last step targets 0");
        // replay merges under a shadow id so the reserved output stays away
        let merge_id = if last { u32::MAX } else { triple.result_id };
        assert!(net.merge_tensors(triple.left_id, triple.right_id, merge_id));
    }
    if !schedule.is_empty() {
        assert_eq!(net.num_tensors(), 1);
    }
}

#[test]
fn four_factor_chain_plans_cheapest_schedule() {
    let net = chain(4);
    let planner = BeamSearchOptimizer::with_num_walkers(4);
    let (schedule, cost) = planner.determine_sequence(&net, &mut counter_from(100));

    assert_eq!(schedule.len(), 3);
    assert_eq!(cost, 24.0);
    assert_eq!(schedule[0].result_id, 100);
    assert_eq!(schedule[1].result_id, 101);
    assert_eq!(schedule[2].result_id, 0);
    replay(&net, &schedule);
}

#[test]
fn narrow_beam_pays_for_myopia() {
    // a(a,b) - b(b,c) - c(c,d) with extents 2, 3, 100, 3: the cheapest
    // first pair (a,b) leads into an expensive second contraction.
    let mut net = TensorNetwork::new(Tensor::new("out", [Leg::new(0, 2), Leg::new(3, 3)]));
    net.add_factor(1, Tensor::new("a", [Leg::new(0, 2), Leg::new(1, 3)]))
        .unwrap();
    net.add_factor(2, Tensor::new("b", [Leg::new(1, 3), Leg::new(2, 100)]))
        .unwrap();
    net.add_factor(3, Tensor::new("c", [Leg::new(2, 100), Leg::new(3, 3)]))
        .unwrap();

    let (_, narrow) = BeamSearchOptimizer::with_num_walkers(1)
        .determine_sequence(&net, &mut counter_from(10));
    let (schedule, wide) = BeamSearchOptimizer::with_num_walkers(16)
        .determine_sequence(&net, &mut counter_from(10));

    assert!(wide < narrow, "wide beam {wide} must beat narrow beam {narrow}");
    replay(&net, &schedule);
}

#[test]
fn beam_never_loses_to_the_appearance_baseline() {
    let net = chain(5);
    let (_, baseline) =
        AppearanceOrderOptimizer::new().determine_sequence(&net, &mut counter_from(10));
    let (_, planned) = BeamSearchOptimizer::with_num_walkers(16)
        .determine_sequence(&net, &mut counter_from(10));
    assert!(planned <= baseline);
}

#[test]
fn identical_runs_produce_identical_schedules() {
    let net = chain(6);
    let planner = BeamSearchOptimizer::with_num_walkers(8);
    let first = planner.determine_sequence(&net, &mut counter_from(100));
    let second = planner.determine_sequence(&net, &mut counter_from(100));
    assert_eq!(first, second);
}

#[test]
fn schedules_replay_cleanly_across_sizes() {
    for n in 2..=7u32 {
        let net = chain(n);
        let planner = BeamSearchOptimizer::with_num_walkers(4);
        let (schedule, cost) = planner.determine_sequence(&net, &mut counter_from(1000));
        assert_eq!(schedule.len(), (n - 1) as usize);
        assert!(cost > 0.0);
        replay(&net, &schedule);

        // every non-zero result id is unique
        let mut ids: Vec<u32> = schedule
            .iter()
            .map(|t| t.result_id)
            .filter(|&id| id != 0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), schedule.len() - 1);
    }
}
