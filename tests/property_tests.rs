//! Property-based tests for overlap components.
//!
//! These tests verify invariants that should hold regardless of input:
//! - Sketching is deterministic and order-insensitive
//! - Sketch entries only ever decrease
//! - The optimizer always returns a feasible split
//! - Query results never contain keys that were not inserted

use proptest::prelude::*;

use overlap::{BandedLshIndex, LshParams, MinHashSketch};

fn sketch_of(k: usize, values: &[String]) -> MinHashSketch {
    MinHashSketch::from_values(k, values.iter().map(|v| v.as_bytes())).unwrap()
}

mod sketch_props {
    use super::*;

    fn arb_values() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z0-9]{1,12}", 1..40)
    }

    fn values_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        arb_values().prop_flat_map(|values| {
            let original = values.clone();
            Just(values)
                .prop_shuffle()
                .prop_map(move |shuffled| (original.clone(), shuffled))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn sketch_ignores_insertion_order(
            (values, shuffled) in values_and_permutation(),
        ) {
            let s1 = sketch_of(64, &values);
            let s2 = sketch_of(64, &shuffled);
            prop_assert_eq!(s1.hash_values(), s2.hash_values());
        }

        #[test]
        fn update_never_increases_entries(
            values in arb_values(),
            extra in "[a-z0-9]{1,12}",
        ) {
            let mut sketch = sketch_of(64, &values);
            let before = sketch.hash_values().to_vec();
            sketch.update(extra.as_bytes());
            for (new, old) in sketch.hash_values().iter().zip(before.iter()) {
                prop_assert!(new <= old);
            }
        }

        #[test]
        fn estimate_is_in_unit_interval_and_symmetric(
            a in arb_values(),
            b in arb_values(),
        ) {
            let sa = sketch_of(64, &a);
            let sb = sketch_of(64, &b);
            let ab = sa.estimate_jaccard(&sb).unwrap();
            let ba = sb.estimate_jaccard(&sa).unwrap();
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn self_estimate_is_one(values in arb_values()) {
            let sketch = sketch_of(64, &values);
            prop_assert_eq!(sketch.estimate_jaccard(&sketch).unwrap(), 1.0);
        }

        #[test]
        fn merge_commutes(a in arb_values(), b in arb_values()) {
            let sa = sketch_of(64, &a);
            let sb = sketch_of(64, &b);

            let mut left = sa.clone();
            left.merge(&sb).unwrap();
            let mut right = sb.clone();
            right.merge(&sa).unwrap();

            prop_assert_eq!(left.hash_values(), right.hash_values());
        }
    }
}

mod optimizer_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn optimal_split_is_feasible(
            threshold in 0.0f64..=1.0,
            k in 1usize..=64,
            fp_weight in 0.0f64..=1.0,
        ) {
            let params = LshParams::optimal(threshold, k, fp_weight, 1.0 - fp_weight).unwrap();
            prop_assert!(params.bands >= 1);
            prop_assert!(params.rows >= 1);
            prop_assert!(params.bands * params.rows <= k);
        }

        #[test]
        fn collision_probability_is_a_probability(
            x in 0.0f64..=1.0,
            bands in 1usize..=64,
            rows in 1usize..=64,
        ) {
            let p = LshParams { bands, rows }.collision_probability(x);
            prop_assert!((0.0..=1.0).contains(&p), "S({}) = {} out of range", x, p);
        }
    }
}

mod index_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn query_returns_only_inserted_keys(
            corpus in prop::collection::vec(
                prop::collection::vec("[a-z]{1,8}", 1..15),
                1..20,
            ),
        ) {
            let mut index = BandedLshIndex::from_threshold(0.5, 64).unwrap();
            let sketches: Vec<MinHashSketch> =
                corpus.iter().map(|values| sketch_of(64, values)).collect();
            for (i, sketch) in sketches.iter().enumerate() {
                index.insert(i, sketch).unwrap();
            }

            for (i, sketch) in sketches.iter().enumerate() {
                let candidates = index.query(sketch).unwrap();
                // Self-match is guaranteed, and nothing foreign appears.
                prop_assert!(candidates.contains(&i));
                prop_assert!(candidates.iter().all(|&c| c < corpus.len()));
            }
        }
    }
}
