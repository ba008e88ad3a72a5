//! Property-based tests for the tensor-network value type.
//!
//! Uses proptest to verify the cost model and merge semantics across
//! randomly generated factors.

#[cfg(test)]
mod tests {
    use crate::{contraction_cost, Leg, Tensor, TensorNetwork};
    use proptest::prelude::*;

    // One extent per index label, as in any well-formed network: both ends
    // of a contracted index must agree on its dimension.
    const EXTENTS: [u64; 8] = [2, 3, 4, 5, 7, 2, 3, 5];

    // Strategy for a factor's legs: labels from a small alphabet so random
    // pairs actually share indices.
    fn legs_strategy() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0u32..8, 1..=4)
    }

    fn build_tensor(name: &str, labels: Vec<u32>) -> Tensor {
        let mut seen = Vec::new();
        let legs: Vec<Leg> = labels
            .into_iter()
            .filter(|label| {
                if seen.contains(label) {
                    false
                } else {
                    seen.push(*label);
                    true
                }
            })
            .map(|label| Leg::new(label, EXTENTS[label as usize]))
            .collect();
        Tensor::new(name, legs)
    }

    #[test]
    fn test_proptest_smoke() {
        let t = build_tensor("t", vec![0, 1]);
        assert_eq!(t.volume(), 6.0);
    }

    proptest! {
        #[test]
        fn prop_cost_symmetric_and_nonnegative(
            a in legs_strategy(),
            b in legs_strategy(),
        ) {
            let a = build_tensor("a", a);
            let b = build_tensor("b", b);
            let ab = contraction_cost(&a, &b);
            let ba = contraction_cost(&b, &a);
            prop_assert!(ab >= 0.0);
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn prop_cost_bounded_by_volumes(
            a in legs_strategy(),
            b in legs_strategy(),
        ) {
            let a = build_tensor("a", a);
            let b = build_tensor("b", b);
            let cost = contraction_cost(&a, &b);
            // disjoint labels give the full outer product; shared labels
            // only ever shrink it
            prop_assert!(cost <= a.volume() * b.volume());
            prop_assert!(cost >= a.volume().max(b.volume()));
        }

        #[test]
        fn prop_merge_shrinks_network_by_one(
            a in legs_strategy(),
            b in legs_strategy(),
            c in legs_strategy(),
        ) {
            let mut net = TensorNetwork::new(Tensor::scalar("out"));
            net.add_factor(1, build_tensor("a", a)).unwrap();
            net.add_factor(2, build_tensor("b", b)).unwrap();
            net.add_factor(3, build_tensor("c", c)).unwrap();

            prop_assert!(net.merge_tensors(1, 2, 4));
            prop_assert_eq!(net.num_tensors(), 2);
            prop_assert!(net.tensor(4).is_some());
        }

        #[test]
        fn prop_merged_tensor_drops_shared_labels(
            a in legs_strategy(),
            b in legs_strategy(),
        ) {
            let a = build_tensor("a", a);
            let b = build_tensor("b", b);
            let shared: Vec<u32> = a
                .legs()
                .iter()
                .map(|l| l.label)
                .filter(|&label| b.has_label(label))
                .collect();

            let mut net = TensorNetwork::new(Tensor::scalar("out"));
            net.add_factor(1, a).unwrap();
            net.add_factor(2, b).unwrap();
            prop_assert!(net.merge_tensors(1, 2, 3));

            let merged = net.tensor(3).unwrap();
            for label in shared {
                prop_assert!(!merged.has_label(label));
            }
            // labels come out sorted
            let labels: Vec<u32> = merged.legs().iter().map(|l| l.label).collect();
            let mut sorted = labels.clone();
            sorted.sort_unstable();
            prop_assert_eq!(labels, sorted);
        }
    }
}
