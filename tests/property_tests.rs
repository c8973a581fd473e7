// Property tests over every algorithm: sortedness, finalized-set growth,
// index bounds, terminal state and replayability. Small inputs are collected
// whole; inputs up to 1000 elements are checked while streaming.

use proptest::prelude::*;
use sortty::{run_seeded, AlgorithmId, Snapshot, StepKind};
use std::collections::HashSet;

fn drain(algorithm: AlgorithmId, input: &[i64], seed: u64) -> Vec<Snapshot> {
    run_seeded(algorithm, input, seed)
        .expect("input should be accepted")
        .collect()
}

/// Inputs each algorithm accepts: negatives only where supported
fn input_for(algorithm: AlgorithmId) -> BoxedStrategy<Vec<i64>> {
    let values = if algorithm.supports_negatives() {
        -50i64..50
    } else {
        0i64..100
    };
    prop::collection::vec(values, 0..40).boxed()
}

fn any_case() -> impl Strategy<Value = (AlgorithmId, Vec<i64>)> {
    prop::sample::select(AlgorithmId::ALL.to_vec())
        .prop_flat_map(|algorithm| (Just(algorithm), input_for(algorithm)))
}

/// Up to 1000 elements: random, few distinct values, ascending or descending
fn large_input_for(algorithm: AlgorithmId) -> BoxedStrategy<Vec<i64>> {
    let (low, high) = if algorithm.supports_negatives() {
        (-500i64, 500i64)
    } else {
        (0i64, 1000i64)
    };
    prop_oneof![
        prop::collection::vec(low..high, 0..=1000),
        prop::collection::vec(0i64..4, 0..=1000),
        (0usize..=1000).prop_map(move |n| (0..n as i64).map(|v| v + low).collect()),
        (0usize..=1000).prop_map(move |n| (0..n as i64).rev().map(|v| v + low).collect()),
    ]
    .boxed()
}

/// Bogo sort is left to the small cases; a thousand-element shuffle loop
/// only proves it gives up
fn any_large_case() -> impl Strategy<Value = (AlgorithmId, Vec<i64>)> {
    let algorithms: Vec<_> = AlgorithmId::ALL
        .into_iter()
        .filter(|&a| a != AlgorithmId::Bogo)
        .collect();
    prop::sample::select(algorithms)
        .prop_flat_map(|algorithm| (Just(algorithm), large_input_for(algorithm)))
}

fn sorted_copy(input: &[i64]) -> Vec<i64> {
    let mut expected = input.to_vec();
    expected.sort_unstable();
    expected
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_final_array_is_sorted_permutation((algorithm, input) in any_case(), seed in any::<u64>()) {
        let snaps = drain(algorithm, &input, seed);
        let last = snaps.last();

        if input.is_empty() {
            prop_assert!(snaps.len() <= 1);
            return Ok(());
        }

        let last = last.expect("non-empty input emits at least one snapshot");
        let mut final_values = last.array.clone();
        final_values.sort_unstable();
        prop_assert_eq!(final_values, sorted_copy(&input));

        // Bogo sort may give up; everything else must end sorted
        if last.kind() == Some(StepKind::Success) {
            prop_assert_eq!(&last.array, &sorted_copy(&input));
        } else {
            prop_assert_eq!(algorithm, AlgorithmId::Bogo);
            prop_assert!(last.description().starts_with("Gave up"));
        }
    }

    #[test]
    fn prop_sorted_indices_only_grow((algorithm, input) in any_case(), seed in any::<u64>()) {
        let mut previous: HashSet<usize> = HashSet::new();
        for snapshot in run_seeded(algorithm, &input, seed).unwrap() {
            let current: HashSet<usize> = snapshot.sorted_indices.iter().copied().collect();
            prop_assert_eq!(current.len(), snapshot.sorted_indices.len(), "duplicate finalized index");
            prop_assert!(
                previous.is_subset(&current),
                "{} dropped finalized indices at '{}'",
                algorithm,
                snapshot.description()
            );
            previous = current;
        }
    }

    #[test]
    fn prop_indices_in_bounds((algorithm, input) in any_case(), seed in any::<u64>()) {
        let n = input.len();
        for snapshot in run_seeded(algorithm, &input, seed).unwrap() {
            prop_assert_eq!(snapshot.array.len(), n);
            prop_assert!(snapshot.active_indices.iter().all(|&i| i < n));
            prop_assert!(snapshot.sorted_indices.iter().all(|&i| i < n));
            if let Some(pivot) = snapshot.pivot_index {
                prop_assert!(pivot < n);
            }
            prop_assert!(snapshot.metadata.is_some());
        }
    }

    #[test]
    fn prop_terminal_snapshot_is_complete((algorithm, input) in any_case(), seed in any::<u64>()) {
        prop_assume!(!input.is_empty());
        let last = drain(algorithm, &input, seed).pop().unwrap();
        prop_assume!(last.kind() == Some(StepKind::Success));

        let mut indices = last.sorted_indices.clone();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..input.len()).collect::<Vec<_>>());
        prop_assert_eq!(last.description(), "Array is sorted");
    }

    #[test]
    fn prop_same_seed_same_sequence((algorithm, input) in any_case(), seed in any::<u64>()) {
        let first = drain(algorithm, &input, seed);
        let second = drain(algorithm, &input, seed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_deterministic_algorithms_ignore_seed(
        (algorithm, input) in any_case(),
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        prop_assume!(algorithm.is_deterministic());
        prop_assert_eq!(drain(algorithm, &input, a), drain(algorithm, &input, b));
    }

    #[test]
    fn prop_mutations_follow_compares_for_exchange_sorts(input in prop::collection::vec(-50i64..50, 2..30)) {
        // In pure exchange sorts every swap is announced by a compare of the same pair
        for algorithm in [AlgorithmId::Bubble, AlgorithmId::Cocktail, AlgorithmId::Gnome, AlgorithmId::OddEven] {
            let snaps = drain(algorithm, &input, 0);
            for pair in snaps.windows(2) {
                if pair[1].kind() == Some(StepKind::Swap) {
                    prop_assert_eq!(pair[0].kind(), Some(StepKind::Compare));
                    let mut before = pair[0].active_indices.clone();
                    let mut after = pair[1].active_indices.clone();
                    before.sort_unstable();
                    after.sort_unstable();
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_large_inputs_stream_valid_steps((algorithm, input) in any_large_case(), seed in any::<u64>()) {
        let n = input.len();
        let mut finalized: Vec<usize> = Vec::new();
        let mut last = None;

        for snapshot in run_seeded(algorithm, &input, seed).unwrap() {
            prop_assert_eq!(snapshot.array.len(), n);
            prop_assert!(snapshot.active_indices.iter().all(|&i| i < n));
            prop_assert!(snapshot.sorted_indices.iter().all(|&i| i < n));
            prop_assert!(snapshot.pivot_index.map_or(true, |p| p < n));

            // The finalized set only appends, so each step extends the last
            prop_assert!(
                snapshot.sorted_indices.starts_with(&finalized),
                "{} dropped finalized indices at '{}'",
                algorithm,
                snapshot.description()
            );
            finalized.clone_from(&snapshot.sorted_indices);
            last = Some(snapshot);
        }

        if n == 0 {
            return Ok(());
        }
        let last = last.expect("non-empty input emits at least one snapshot");
        prop_assert_eq!(last.kind(), Some(StepKind::Success));
        prop_assert_eq!(&last.array, &sorted_copy(&input));
        prop_assert_eq!(finalized.len(), n);
    }
}
