//! Distribution sorts: counting, bucket and radix sort
//!
//! These work through side buffers the array never sees, so the visible
//! array only changes in their write-back phases. The side structure rides
//! along in `auxiliary_array`:
//! - counting sort: the count table, with `min`/`max` in the metadata
//! - bucket sort: bucket sizes while scattering, the current bucket afterwards
//! - radix sort: the ten digit counts of the current pass

use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};
use crate::snapshot::{Snapshot, StepKind};

/// Number of buckets used by bucket sort
pub const BUCKET_COUNT: usize = 10;

/// Bucket sort never scales below this maximum
pub const BUCKET_MIN_MAX: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountingPhase {
    Tally,
    Prefix,
    Place,
    WriteBack,
    Finish,
}

/// Stable counting sort over `min..=max`, negatives included
pub struct CountingSort {
    min: i64,
    max: i64,
    counts: Vec<i64>,
    output: Vec<i64>,
    cursor: usize,
    phase: CountingPhase,
}

impl CountingSort {
    pub fn new(array: &[i64]) -> Self {
        let min = array.iter().copied().min().unwrap_or(0);
        let max = array.iter().copied().max().unwrap_or(0);
        CountingSort {
            min,
            max,
            counts: vec![0; (max - min + 1) as usize],
            output: vec![0; array.len()],
            cursor: 0,
            phase: CountingPhase::Tally,
        }
    }

    fn slot(&self, value: i64) -> usize {
        (value - self.min) as usize
    }

    fn decorate(&self, snapshot: Snapshot) -> Snapshot {
        snapshot
            .with_auxiliary(self.counts.clone())
            .with_range(self.min, self.max)
    }
}

impl Frame for CountingSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let n = ws.len();
        loop {
            match self.phase {
                CountingPhase::Tally => {
                    if self.cursor >= n {
                        self.phase = CountingPhase::Prefix;
                        continue;
                    }
                    let i = self.cursor;
                    let value = ws.at(i);
                    let slot = self.slot(value);
                    self.counts[slot] += 1;
                    self.cursor += 1;
                    let description =
                        format!("Counted {}: count is now {}", value, self.counts[slot]);
                    return Flow::Emit(
                        self.decorate(ws.snapshot(StepKind::Scatter, vec![i], description)),
                    );
                }
                CountingPhase::Prefix => {
                    for slot in 1..self.counts.len() {
                        self.counts[slot] += self.counts[slot - 1];
                    }
                    self.cursor = n;
                    self.phase = CountingPhase::Place;
                    return Flow::Emit(self.decorate(ws.info(
                        Vec::new(),
                        "Prefix sums: each count now marks the end of its value's output slots",
                    )));
                }
                CountingPhase::Place => {
                    if self.cursor == 0 {
                        self.phase = CountingPhase::WriteBack;
                        continue;
                    }
                    // Walk backwards so equal values keep their order
                    self.cursor -= 1;
                    let i = self.cursor;
                    let value = ws.at(i);
                    let slot = self.slot(value);
                    let target = (self.counts[slot] - 1) as usize;
                    self.output[target] = value;
                    self.counts[slot] -= 1;
                    let description = format!("Placed {} into output slot {}", value, target);
                    return Flow::Emit(
                        self.decorate(ws.snapshot(StepKind::Move, vec![i], description)),
                    );
                }
                CountingPhase::WriteBack => {
                    if self.cursor >= n {
                        self.phase = CountingPhase::Finish;
                        continue;
                    }
                    let i = self.cursor;
                    ws.array[i] = self.output[i];
                    ws.sorted.insert(i);
                    self.cursor += 1;
                    let description = format!("Wrote {} back to index {}", ws.at(i), i);
                    return Flow::Emit(self.decorate(
                        ws.snapshot(StepKind::Gather, vec![i], description)
                            .with_pivot(i),
                    ));
                }
                CountingPhase::Finish => {
                    let snapshot = ws.finish();
                    return Flow::Finish(self.decorate(snapshot));
                }
            }
        }
    }
}

/// Bucket for `value` when values are scaled against `max`
pub fn bucket_index(value: i64, max: i64) -> usize {
    (value as i128 * BUCKET_COUNT as i128 / (max as i128 + 1)) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketPhase {
    Scatter,
    NextBucket,
    Compare,
    Resolve,
    Gather,
    Finish,
}

/// Bucket sort: scatter into ten buckets, insertion-sort each, gather back
pub struct BucketSort {
    max: i64,
    buckets: Vec<Vec<i64>>,
    cursor: usize,
    bucket: usize,
    /// Key being inserted within the current bucket
    key: usize,
    j: usize,
    phase: BucketPhase,
}

impl BucketSort {
    pub fn new(array: &[i64]) -> Self {
        let max = array
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(BUCKET_MIN_MAX);
        BucketSort {
            max,
            buckets: vec![Vec::new(); BUCKET_COUNT],
            cursor: 0,
            bucket: 0,
            key: 1,
            j: 1,
            phase: BucketPhase::Scatter,
        }
    }

    fn sizes(&self) -> Vec<i64> {
        self.buckets.iter().map(|b| b.len() as i64).collect()
    }

    fn current(&self) -> Vec<i64> {
        self.buckets[self.bucket].clone()
    }
}

impl Frame for BucketSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let n = ws.len();
        loop {
            match self.phase {
                BucketPhase::Scatter => {
                    if self.cursor >= n {
                        self.bucket = 0;
                        self.phase = BucketPhase::NextBucket;
                        continue;
                    }
                    let i = self.cursor;
                    let value = ws.at(i);
                    let b = bucket_index(value, self.max);
                    self.buckets[b].push(value);
                    self.cursor += 1;
                    return Flow::Emit(
                        ws.snapshot(
                            StepKind::Scatter,
                            vec![i],
                            format!("Dropped {} into bucket {}", value, b),
                        )
                        .with_auxiliary(self.sizes()),
                    );
                }
                BucketPhase::NextBucket => {
                    while self.bucket < BUCKET_COUNT && self.buckets[self.bucket].is_empty() {
                        self.bucket += 1;
                    }
                    if self.bucket >= BUCKET_COUNT {
                        self.bucket = 0;
                        self.cursor = 0;
                        self.j = 0;
                        self.phase = BucketPhase::Gather;
                        continue;
                    }
                    self.key = 1;
                    self.j = 1;
                    self.phase = BucketPhase::Compare;
                    return Flow::Emit(
                        ws.info(
                            Vec::new(),
                            format!(
                                "Sorting bucket {} ({} item(s))",
                                self.bucket,
                                self.buckets[self.bucket].len()
                            ),
                        )
                        .with_auxiliary(self.current()),
                    );
                }
                BucketPhase::Compare => {
                    let len = self.buckets[self.bucket].len();
                    if self.key >= len {
                        self.bucket += 1;
                        self.phase = BucketPhase::NextBucket;
                        continue;
                    }
                    if self.j == 0 {
                        self.key += 1;
                        self.j = self.key;
                        continue;
                    }
                    let items = &self.buckets[self.bucket];
                    let description = format!(
                        "Comparing {} and {} in bucket {}",
                        items[self.j],
                        items[self.j - 1],
                        self.bucket
                    );
                    self.phase = BucketPhase::Resolve;
                    return Flow::Emit(
                        ws.snapshot(StepKind::Compare, Vec::new(), description)
                            .with_auxiliary(self.current()),
                    );
                }
                BucketPhase::Resolve => {
                    let j = self.j;
                    let items = &mut self.buckets[self.bucket];
                    self.phase = BucketPhase::Compare;
                    if items[j - 1] > items[j] {
                        items.swap(j - 1, j);
                        let moved = items[j];
                        self.j -= 1;
                        return Flow::Emit(
                            ws.snapshot(
                                StepKind::Move,
                                Vec::new(),
                                format!("Shifted {} right within bucket {}", moved, self.bucket),
                            )
                            .with_auxiliary(self.current()),
                        );
                    }
                    self.key += 1;
                    self.j = self.key;
                }
                BucketPhase::Gather => {
                    while self.bucket < BUCKET_COUNT && self.j >= self.buckets[self.bucket].len() {
                        self.bucket += 1;
                        self.j = 0;
                    }
                    if self.bucket >= BUCKET_COUNT {
                        self.phase = BucketPhase::Finish;
                        continue;
                    }
                    let idx = self.cursor;
                    let value = self.buckets[self.bucket][self.j];
                    ws.array[idx] = value;
                    ws.sorted.insert(idx);
                    self.cursor += 1;
                    self.j += 1;
                    return Flow::Emit(
                        ws.snapshot(
                            StepKind::Gather,
                            vec![idx],
                            format!(
                                "Gathered {} from bucket {} into index {}",
                                value, self.bucket, idx
                            ),
                        )
                        .with_pivot(idx)
                        .with_auxiliary(self.current()),
                    );
                }
                BucketPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

/// Number of decimal digits in `max` (zero for zero)
pub fn decimal_digits(max: i64) -> usize {
    let mut digits = 0;
    let mut rest = max;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RadixPhase {
    StartPass,
    Count,
    Distribute,
    WriteBack,
    Finish,
}

/// LSD radix sort, one stable counting pass per decimal digit
pub struct RadixSort {
    passes: usize,
    pass: usize,
    exp: i64,
    counts: Vec<i64>,
    output: Vec<i64>,
    cursor: usize,
    phase: RadixPhase,
}

impl RadixSort {
    pub fn new(array: &[i64]) -> Self {
        let max = array.iter().copied().max().unwrap_or(0);
        RadixSort {
            passes: decimal_digits(max),
            pass: 0,
            exp: 1,
            counts: vec![0; 10],
            output: vec![0; array.len()],
            cursor: 0,
            phase: RadixPhase::StartPass,
        }
    }

    fn digit(&self, value: i64) -> usize {
        ((value / self.exp) % 10) as usize
    }

    fn is_last_pass(&self) -> bool {
        self.pass + 1 == self.passes
    }
}

impl Frame for RadixSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let n = ws.len();
        loop {
            match self.phase {
                RadixPhase::StartPass => {
                    if self.pass >= self.passes {
                        self.phase = RadixPhase::Finish;
                        continue;
                    }
                    self.counts.iter_mut().for_each(|c| *c = 0);
                    self.cursor = 0;
                    self.phase = RadixPhase::Count;
                }
                RadixPhase::Count => {
                    if self.cursor >= n {
                        self.phase = RadixPhase::Distribute;
                        continue;
                    }
                    let i = self.cursor;
                    let value = ws.at(i);
                    let digit = self.digit(value);
                    self.counts[digit] += 1;
                    self.cursor += 1;
                    return Flow::Emit(
                        ws.snapshot(
                            StepKind::Scatter,
                            vec![i],
                            format!("Digit {} of {} at place {}", digit, value, self.exp),
                        )
                        .with_auxiliary(self.counts.clone()),
                    );
                }
                RadixPhase::Distribute => {
                    let tally = self.counts.clone();
                    for d in 1..10 {
                        self.counts[d] += self.counts[d - 1];
                    }
                    for i in (0..n).rev() {
                        let digit = self.digit(ws.at(i));
                        self.counts[digit] -= 1;
                        self.output[self.counts[digit] as usize] = ws.at(i);
                    }
                    self.counts = tally;
                    self.cursor = 0;
                    self.phase = RadixPhase::WriteBack;
                    return Flow::Emit(
                        ws.info(
                            Vec::new(),
                            format!("Distributed by the digit at place {}", self.exp),
                        )
                        .with_auxiliary(self.counts.clone()),
                    );
                }
                RadixPhase::WriteBack => {
                    if self.cursor >= n {
                        self.pass += 1;
                        if self.pass < self.passes {
                            self.exp *= 10;
                        }
                        self.phase = RadixPhase::StartPass;
                        continue;
                    }
                    let i = self.cursor;
                    ws.array[i] = self.output[i];
                    if self.is_last_pass() {
                        ws.sorted.insert(i);
                    }
                    self.cursor += 1;
                    return Flow::Emit(
                        ws.snapshot(
                            StepKind::Gather,
                            vec![i],
                            format!("Wrote {} back to index {}", ws.at(i), i),
                        )
                        .with_auxiliary(self.counts.clone()),
                    );
                }
                RadixPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmId;
    use crate::engine::run;

    #[test]
    fn test_bucket_index_stays_in_range() {
        assert_eq!(bucket_index(0, 100), 0);
        assert_eq!(bucket_index(29, 100), 2);
        assert_eq!(bucket_index(100, 100), 9);
        assert_eq!(bucket_index(i64::MAX, i64::MAX), 9);
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 0);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(170), 3);
        assert_eq!(decimal_digits(i64::MAX), 19);
    }

    #[test]
    fn test_radix_marks_only_on_last_pass() {
        let snaps: Vec<_> = run(AlgorithmId::Radix, &[170, 45, 75, 90, 802, 24, 2, 66])
            .unwrap()
            .collect();
        let first_marked = snaps
            .iter()
            .position(|s| !s.sorted_indices.is_empty())
            .unwrap();

        // Everything before the first mark belongs to earlier passes or the
        // counting half of the last one
        assert!(snaps[first_marked].description().starts_with("Wrote"));
        assert_eq!(snaps[first_marked].sorted_indices, vec![0]);
        assert_eq!(snaps[first_marked].array[0], 2);
        assert_eq!(
            snaps.last().unwrap().array,
            vec![2, 24, 45, 66, 75, 90, 170, 802]
        );
    }

    #[test]
    fn test_radix_with_all_zeros_only_settles() {
        let snaps: Vec<_> = run(AlgorithmId::Radix, &[0, 0, 0]).unwrap().collect();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].kind(), Some(StepKind::Success));
    }

    #[test]
    fn test_counting_sort_keeps_equal_values_stable_in_count_table() {
        let last = run(AlgorithmId::Counting, &[3, -1, 3, 0]).unwrap().last().unwrap();
        assert_eq!(last.array, vec![-1, 0, 3, 3]);
        // After placement each count holds the first output slot for its value
        assert_eq!(last.auxiliary_array.unwrap(), vec![0, 1, 2, 2, 2]);
    }
}
