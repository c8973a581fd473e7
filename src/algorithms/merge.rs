//! Merge-family sorts: top-down merge sort and a simplified tim sort
//!
//! Both hand the actual merging to [`RangeMerge`], which reports the write
//! cursor as the pivot index and marks each fully merged range.

use super::shared::{Marking, RangeInsertion, RangeMerge};
use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};

/// Fixed run length for tim sort
pub const TIM_RUN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitPhase {
    Left,
    Right,
    Merge,
    Done,
}

/// One activation of the recursive split over `[low, high]`
struct MergeRange {
    low: usize,
    mid: usize,
    high: usize,
    phase: SplitPhase,
}

impl MergeRange {
    fn new(low: usize, high: usize) -> Self {
        MergeRange {
            low,
            mid: low + (high - low) / 2,
            high,
            phase: SplitPhase::Left,
        }
    }
}

impl Frame for MergeRange {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.low >= self.high {
            return Flow::Return;
        }
        match self.phase {
            SplitPhase::Left => {
                self.phase = SplitPhase::Right;
                Flow::Call(Box::new(MergeRange::new(self.low, self.mid)))
            }
            SplitPhase::Right => {
                self.phase = SplitPhase::Merge;
                Flow::Call(Box::new(MergeRange::new(self.mid + 1, self.high)))
            }
            SplitPhase::Merge => {
                self.phase = SplitPhase::Done;
                Flow::Call(Box::new(RangeMerge::new(ws, self.low, self.mid, self.high, true)))
            }
            SplitPhase::Done => Flow::Return,
        }
    }
}

/// Top-down merge sort
pub struct MergeSort {
    n: usize,
    started: bool,
}

impl MergeSort {
    pub fn new(n: usize) -> Self {
        MergeSort { n, started: false }
    }
}

impl Frame for MergeSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(MergeRange::new(0, self.n - 1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimPhase {
    Runs,
    Merges,
    Finish,
}

/// Tim sort without galloping: insertion-sort fixed runs, then merge passes
/// of doubling width
pub struct TimSort {
    n: usize,
    /// Start of the next run during `Runs`, left edge of the next pair during `Merges`
    cursor: usize,
    width: usize,
    phase: TimPhase,
}

impl TimSort {
    pub fn new(n: usize) -> Self {
        TimSort {
            n,
            cursor: 0,
            width: TIM_RUN,
            phase: TimPhase::Runs,
        }
    }
}

impl Frame for TimSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                TimPhase::Runs => {
                    if self.cursor >= self.n {
                        self.cursor = 0;
                        self.phase = TimPhase::Merges;
                        continue;
                    }
                    let low = self.cursor;
                    let high = (low + TIM_RUN - 1).min(self.n - 1);
                    self.cursor += TIM_RUN;
                    // A run is only final when it is the whole array
                    let marking = if low == 0 && high == self.n - 1 {
                        Marking::WholeRange
                    } else {
                        Marking::Untracked
                    };
                    return Flow::Call(Box::new(RangeInsertion::new(low, high, marking)));
                }
                TimPhase::Merges => {
                    if self.width >= self.n {
                        self.phase = TimPhase::Finish;
                        continue;
                    }
                    if self.cursor >= self.n {
                        self.cursor = 0;
                        self.width *= 2;
                        continue;
                    }
                    let left = self.cursor;
                    let mid = left + self.width - 1;
                    let right = (left + 2 * self.width - 1).min(self.n - 1);
                    self.cursor += 2 * self.width;
                    if mid < right {
                        return Flow::Call(Box::new(RangeMerge::new(ws, left, mid, right, true)));
                    }
                }
                TimPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::AlgorithmId;
    use crate::engine::run;

    #[test]
    fn test_merge_sort_marks_merged_ranges() {
        let snaps: Vec<_> = run(AlgorithmId::Merge, &[4, 3, 2, 1]).unwrap().collect();

        // The first merge covers [0, 1] and marks it on its final write
        let first_marked = snaps
            .iter()
            .find(|s| !s.sorted_indices.is_empty())
            .unwrap();
        let mut marked = first_marked.sorted_indices.clone();
        marked.sort_unstable();
        assert_eq!(marked, vec![0, 1]);
        assert_eq!(first_marked.array[..2], [3, 4]);
    }

    #[test]
    fn test_tim_sort_crosses_run_boundary() {
        let input: Vec<i64> = (0..70).rev().collect();
        let last = run(AlgorithmId::Tim, &input).unwrap().last().unwrap();
        let expected: Vec<i64> = (0..70).collect();
        assert_eq!(last.array, expected);
    }
}
