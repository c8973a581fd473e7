// Integration tests for the snapshot engine: concrete scenarios per algorithm

use sortty::driver::Player;
use sortty::{run, run_seeded, AlgorithmId, Snapshot, SortError, StepKind};

fn drain(algorithm: AlgorithmId, input: &[i64]) -> Vec<Snapshot> {
    run(algorithm, input)
        .unwrap_or_else(|e| panic!("{} rejected {:?}: {}", algorithm, input, e))
        .collect()
}

#[test]
fn test_bubble_sort_scenario() {
    let snaps = drain(AlgorithmId::Bubble, &[5, 1, 4, 2, 8]);

    let first_swap = snaps
        .iter()
        .position(|s| s.kind() == Some(StepKind::Swap))
        .unwrap();
    assert!(snaps[..first_swap]
        .iter()
        .any(|s| s.active_indices == vec![0, 1] && s.kind() == Some(StepKind::Compare)));
    assert_eq!(snaps.last().unwrap().array, vec![1, 2, 4, 5, 8]);
}

#[test]
fn test_counting_sort_with_negatives() {
    let snaps = drain(AlgorithmId::Counting, &[-2, -2, 0, 3]);
    let last = snaps.last().unwrap();

    assert_eq!(last.array, vec![-2, -2, 0, 3]);
    let meta = last.metadata.as_ref().unwrap();
    assert_eq!(meta.min, Some(-2));
    assert_eq!(meta.max, Some(3));
    assert_eq!(last.auxiliary_array.as_ref().unwrap().len(), 6);

    // Every step carries the table and the range
    assert!(snaps.iter().all(|s| s.auxiliary_array.is_some()));
    assert!(snaps
        .iter()
        .all(|s| s.metadata.as_ref().and_then(|m| m.min) == Some(-2)));
}

#[test]
fn test_bucket_sort_scatters_and_gathers() {
    let snaps = drain(AlgorithmId::Bucket, &[29, 25, 3, 49, 9, 37, 21, 43]);

    assert!(snaps.iter().any(|s| s.kind() == Some(StepKind::Scatter)));
    assert!(snaps.iter().any(|s| s.kind() == Some(StepKind::Gather)));
    assert_eq!(
        snaps.last().unwrap().array,
        vec![3, 9, 21, 25, 29, 37, 43, 49]
    );
}

#[test]
fn test_quick_sort_pivots_recorded_once() {
    let snaps = drain(AlgorithmId::Quick, &[10, 7, 8, 9, 1, 5]);
    let last = snaps.last().unwrap();

    assert_eq!(last.array, vec![1, 5, 7, 8, 9, 10]);
    let mut sorted = last.sorted_indices.clone();
    let len = sorted.len();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), len);
    assert_eq!(sorted, (0..6).collect::<Vec<_>>());

    // The first placed pivot is 5, which lands at index 1
    let placed = snaps
        .iter()
        .find(|s| s.description().starts_with("Pivot 5 placed"))
        .unwrap();
    assert_eq!(placed.pivot_index, Some(1));
    let finalized = snaps
        .iter()
        .find(|s| s.description() == "5 is in its final position")
        .unwrap();
    assert!(finalized.is_sorted_index(1));
}

#[test]
fn test_bogo_sort_two_elements() {
    let last = run_seeded(AlgorithmId::Bogo, &[1, 2], 42)
        .unwrap()
        .last()
        .unwrap();
    assert_eq!(last.array, vec![1, 2]);
    assert_eq!(last.kind(), Some(StepKind::Success));

    let last = run_seeded(AlgorithmId::Bogo, &[2, 1], 42)
        .unwrap()
        .last()
        .unwrap();
    assert_eq!(last.array, vec![1, 2]);
    assert_eq!(last.kind(), Some(StepKind::Success));
}

#[test]
fn test_empty_and_single_inputs() {
    for algorithm in AlgorithmId::ALL {
        let empty = drain(algorithm, &[]);
        assert!(empty.len() <= 1, "{} emitted {} snapshots", algorithm, empty.len());

        let single = drain(algorithm, &[7]);
        assert_eq!(single.len(), 1, "{}", algorithm);
        assert_eq!(single[0].sorted_indices, vec![0]);
        assert_eq!(single[0].kind(), Some(StepKind::Success));
    }

    let counting = drain(AlgorithmId::Counting, &[-4]);
    assert_eq!(counting[0].auxiliary_array, Some(vec![1]));
    assert_eq!(counting[0].metadata.as_ref().unwrap().min, Some(-4));
}

#[test]
fn test_merge_is_left_biased_on_ties() {
    // Two halves [3, 5] and [5, 7]: the left 5 must be written first
    let snaps = drain(AlgorithmId::Merge, &[3, 5, 5, 7]);
    let writes: Vec<_> = snaps
        .iter()
        .filter(|s| s.description().starts_with("Placed"))
        .map(|s| s.description().to_string())
        .collect();

    // The last four writes belong to the top-level merge
    assert_eq!(
        writes[writes.len() - 4..],
        [
            "Placed 3 from the left half at index 0",
            "Placed 5 from the left half at index 1",
            "Placed 5 from the right half at index 2",
            "Placed 7 from the right half at index 3",
        ]
    );
}

/// "Placed" narration for one value, in write order
fn placements_of(snaps: &[Snapshot], value: i64) -> Vec<String> {
    let prefix = format!("Placed {} ", value);
    snaps
        .iter()
        .map(|s| s.description())
        .filter(|d| d.starts_with(&prefix))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_tim_sort_keeps_ties_in_order_across_run_boundary() {
    // Runs are [0, 32) and [32, 40); 50 sits in both, the left copy first
    let mut input: Vec<i64> = (1..=31).rev().collect();
    input.insert(0, 50);
    input.extend([50, 66, 65, 64, 63, 62, 61, 60]);
    assert_eq!(input.len(), 40);

    let snaps = drain(AlgorithmId::Tim, &input);
    assert_eq!(
        placements_of(&snaps, 50),
        [
            "Placed 50 from the left half at index 31",
            "Placed 50 from the right half at index 32",
        ]
    );

    let mut expected = input.clone();
    expected.sort_unstable();
    assert_eq!(snaps.last().unwrap().array, expected);
}

#[test]
fn test_tim_sort_keeps_ties_in_order_in_wide_merges() {
    // One 500 in each of the first three runs. The width-32 pass merges runs
    // one and two, then three and four; the width-64 merge sees two on the left
    let mut input: Vec<i64> = (0..100).rev().collect();
    for i in [10, 40, 70] {
        input[i] = 500;
    }

    let snaps = drain(AlgorithmId::Tim, &input);
    assert_eq!(
        placements_of(&snaps, 500),
        [
            "Placed 500 from the left half at index 62",
            "Placed 500 from the right half at index 63",
            "Placed 500 from the left half at index 99",
            "Placed 500 from the left half at index 97",
            "Placed 500 from the left half at index 98",
            "Placed 500 from the right half at index 99",
        ]
    );
}

#[test]
fn test_radix_and_bucket_reject_negatives() {
    for algorithm in [AlgorithmId::Radix, AlgorithmId::Bucket, AlgorithmId::Sleep] {
        let err = run(algorithm, &[4, -1, 2]).unwrap_err();
        assert_eq!(
            err,
            SortError::NegativeValue {
                algorithm: algorithm.name(),
                value: -1,
                index: 1,
            }
        );
    }
}

#[test]
fn test_intro_sort_uses_insertion_leaves() {
    let input: Vec<i64> = (0..40).map(|i| (i * 37) % 41).collect();
    let snaps = drain(AlgorithmId::Intro, &input);

    assert!(snaps
        .iter()
        .any(|s| s.description().starts_with("Range ") && s.description().ends_with("is sorted")));
    let mut expected = input.clone();
    expected.sort_unstable();
    assert_eq!(snaps.last().unwrap().array, expected);
}

#[test]
fn test_dual_pivot_sorts_with_duplicates() {
    let input = [4, 1, 4, 9, 1, 4, 0, 9, 4];
    let last = drain(AlgorithmId::DualPivot, &input).pop().unwrap();
    assert_eq!(last.array, vec![0, 1, 1, 4, 4, 4, 4, 9, 9]);
}

#[test]
fn test_sleep_sort_large_values_stay_cheap() {
    let snaps = drain(AlgorithmId::Sleep, &[1_000_000_000, 3, 70_000]);
    assert!(snaps.len() < 10);
    assert_eq!(snaps.last().unwrap().array, vec![3, 70_000, 1_000_000_000]);
}

#[test]
fn test_player_matches_direct_run() {
    let input = vec![9, 3, 7, 1, 8];
    let direct: Vec<_> = run_seeded(AlgorithmId::Heap, &input, 0).unwrap().collect();

    let mut player = Player::new(AlgorithmId::Heap, input, 0).unwrap();
    let mut played = Vec::new();
    while player.step_forward().is_ok() {
        played.push(player.current().unwrap().clone());
    }

    assert_eq!(played, direct);
    assert!(player.is_finished());
}

#[test]
fn test_snapshots_serialize_camel_case() {
    let snaps = drain(AlgorithmId::Counting, &[2, 1]);
    let json = serde_json::to_value(&snaps[0]).unwrap();

    assert!(json.get("activeIndices").is_some());
    assert!(json.get("sortedIndices").is_some());
    assert!(json.get("auxiliaryArray").is_some());
    assert_eq!(json["metadata"]["type"], "scatter");
    assert_eq!(json["metadata"]["min"], 1);
}
