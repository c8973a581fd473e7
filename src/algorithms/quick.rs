//! Partition-based sorts
//!
//! - [`QuickSort`]: Lomuto partition around the last element
//! - [`DualPivotSort`]: three-way partition around the first and last elements
//! - [`IntroSort`]: quick sort that drops to insertion sort below
//!   [`INTRO_THRESHOLD`] elements and to heap sort past its depth limit
//!
//! A pivot is finalized as soon as it lands, and a range of one element is
//! finalized when the recursion reaches it. The recursion is a stack of
//! range frames; each frame remembers which child it is waiting on.

use super::shared::{Marking, Partition, RangeHeap, RangeInsertion};
use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};
use crate::snapshot::{Snapshot, StepKind};

/// Ranges at most this many elements apart are insertion-sorted by intro sort
pub const INTRO_THRESHOLD: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangePhase {
    Partition,
    Placed,
    Left,
    Right,
    Done,
}

/// One activation of quick sort over `[low, high]`
struct QuickRange {
    low: usize,
    high: usize,
    pivot: usize,
    phase: RangePhase,
}

impl QuickRange {
    fn new(low: usize, high: usize) -> Self {
        QuickRange {
            low,
            high,
            pivot: low,
            phase: RangePhase::Partition,
        }
    }
}

/// Finalize a one-element range and announce it
fn settle_singleton(ws: &mut Workspace, index: usize) -> Flow {
    ws.sorted.insert(index);
    Flow::Finish(ws.info(
        vec![index],
        format!("{} is alone in its range and already in place", ws.at(index)),
    ))
}

impl Frame for QuickRange {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                RangePhase::Partition => {
                    if self.low == self.high {
                        return settle_singleton(ws, self.low);
                    }
                    self.phase = RangePhase::Placed;
                    return Flow::Call(Box::new(Partition::new(self.low, self.high)));
                }
                RangePhase::Placed => {
                    let Some((pivot, _)) = ws.take_return() else {
                        return Flow::Return;
                    };
                    self.pivot = pivot;
                    ws.sorted.insert(pivot);
                    self.phase = RangePhase::Left;
                    return Flow::Emit(ws.info(
                        vec![pivot],
                        format!("{} is in its final position", ws.at(pivot)),
                    ));
                }
                RangePhase::Left => {
                    self.phase = RangePhase::Right;
                    if self.pivot > self.low {
                        return Flow::Call(Box::new(QuickRange::new(self.low, self.pivot - 1)));
                    }
                }
                RangePhase::Right => {
                    self.phase = RangePhase::Done;
                    if self.pivot < self.high {
                        return Flow::Call(Box::new(QuickRange::new(self.pivot + 1, self.high)));
                    }
                }
                RangePhase::Done => return Flow::Return,
            }
        }
    }
}

/// Quick sort with Lomuto partitioning
pub struct QuickSort {
    n: usize,
    started: bool,
}

impl QuickSort {
    pub fn new(n: usize) -> Self {
        QuickSort { n, started: false }
    }
}

impl Frame for QuickSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(QuickRange::new(0, self.n - 1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DualPhase {
    Order,
    Announce,
    Scan,
    Classify,
    ScanRight,
    ResolveRight,
    SwapRight,
    Recheck,
    PlaceLeft,
    PlaceRight,
}

/// Three-way partition of `[low, high]` around `array[low] <= array[high]`
///
/// Leaves the final pivot slots `(lp, rp)` in the return register.
struct DualPartition {
    low: usize,
    high: usize,
    lp: i64,
    rp: i64,
    /// Next slot for an element below the left pivot
    less: usize,
    k: usize,
    /// Next slot (from the right) for an element at or above the right pivot
    great: usize,
    phase: DualPhase,
}

impl DualPartition {
    fn new(low: usize, high: usize) -> Self {
        DualPartition {
            low,
            high,
            lp: 0,
            rp: 0,
            less: low + 1,
            k: low + 1,
            great: high - 1,
            phase: DualPhase::Order,
        }
    }

    fn with_pivot(&self, snapshot: Snapshot) -> Flow {
        Flow::Emit(snapshot.with_pivot(self.low))
    }
}

impl Frame for DualPartition {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let (low, high) = (self.low, self.high);
        loop {
            match self.phase {
                DualPhase::Order => {
                    self.phase = DualPhase::Announce;
                    if ws.at(low) > ws.at(high) {
                        ws.swap(low, high);
                        return Flow::Emit(ws.swapped(low, high));
                    }
                }
                DualPhase::Announce => {
                    self.lp = ws.at(low);
                    self.rp = ws.at(high);
                    self.phase = DualPhase::Scan;
                    return self.with_pivot(ws.info(
                        vec![low, high],
                        format!("Pivots are {} and {}", self.lp, self.rp),
                    ));
                }
                DualPhase::Scan => {
                    if self.k > self.great {
                        self.phase = DualPhase::PlaceLeft;
                        continue;
                    }
                    self.phase = DualPhase::Classify;
                    return self.with_pivot(ws.snapshot(
                        StepKind::Compare,
                        vec![self.k, self.less, self.great],
                        format!(
                            "Classifying {} against pivots {} and {}",
                            ws.at(self.k),
                            self.lp,
                            self.rp
                        ),
                    ));
                }
                DualPhase::Classify => {
                    let k = self.k;
                    if ws.at(k) < self.lp {
                        let less = self.less;
                        self.less += 1;
                        self.k += 1;
                        self.phase = DualPhase::Scan;
                        if less != k {
                            ws.swap(k, less);
                            return self.with_pivot(ws.swapped(less, k));
                        }
                    } else if ws.at(k) >= self.rp {
                        self.phase = DualPhase::ScanRight;
                    } else {
                        self.k += 1;
                        self.phase = DualPhase::Scan;
                    }
                }
                DualPhase::ScanRight => {
                    if self.k < self.great {
                        self.phase = DualPhase::ResolveRight;
                        return self.with_pivot(ws.compare(self.great, high));
                    }
                    self.phase = DualPhase::SwapRight;
                }
                DualPhase::ResolveRight => {
                    if ws.at(self.great) > self.rp {
                        self.great -= 1;
                        self.phase = DualPhase::ScanRight;
                    } else {
                        self.phase = DualPhase::SwapRight;
                    }
                }
                DualPhase::SwapRight => {
                    let (k, great) = (self.k, self.great);
                    self.great -= 1;
                    self.phase = DualPhase::Recheck;
                    if k != great {
                        ws.swap(k, great);
                        return self.with_pivot(ws.swapped(great, k));
                    }
                }
                DualPhase::Recheck => {
                    let k = self.k;
                    self.k += 1;
                    self.phase = DualPhase::Scan;
                    if ws.at(k) < self.lp {
                        let less = self.less;
                        self.less += 1;
                        if less != k {
                            ws.swap(k, less);
                            return self.with_pivot(ws.swapped(less, k));
                        }
                    }
                }
                DualPhase::PlaceLeft => {
                    self.less -= 1;
                    self.great += 1;
                    let lp = self.less;
                    ws.swap(low, lp);
                    self.phase = DualPhase::PlaceRight;
                    return Flow::Emit(
                        ws.snapshot(
                            StepKind::Swap,
                            vec![lp, low],
                            format!("Left pivot {} placed at index {}", ws.at(lp), lp),
                        )
                        .with_pivot(lp),
                    );
                }
                DualPhase::PlaceRight => {
                    let (lp, rp) = (self.less, self.great);
                    ws.swap(high, rp);
                    ws.set_return(lp, rp);
                    return Flow::Finish(
                        ws.snapshot(
                            StepKind::Swap,
                            vec![rp, high],
                            format!("Right pivot {} placed at index {}", ws.at(rp), rp),
                        )
                        .with_pivot(rp),
                    );
                }
            }
        }
    }
}

/// One activation of dual-pivot quick sort over `[low, high]`
struct DualRange {
    low: usize,
    high: usize,
    lp: usize,
    rp: usize,
    phase: RangePhase,
    /// Which of the three sub-ranges to recurse into next
    child: u8,
}

impl DualRange {
    fn new(low: usize, high: usize) -> Self {
        DualRange {
            low,
            high,
            lp: low,
            rp: high,
            phase: RangePhase::Partition,
            child: 0,
        }
    }
}

impl Frame for DualRange {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                RangePhase::Partition => {
                    if self.low == self.high {
                        return settle_singleton(ws, self.low);
                    }
                    self.phase = RangePhase::Placed;
                    return Flow::Call(Box::new(DualPartition::new(self.low, self.high)));
                }
                RangePhase::Placed => {
                    let Some((lp, rp)) = ws.take_return() else {
                        return Flow::Return;
                    };
                    self.lp = lp;
                    self.rp = rp;
                    ws.sorted.insert(lp);
                    ws.sorted.insert(rp);
                    self.phase = RangePhase::Left;
                    return Flow::Emit(ws.info(
                        vec![lp, rp],
                        format!(
                            "Pivots {} and {} are in their final positions",
                            ws.at(lp),
                            ws.at(rp)
                        ),
                    ));
                }
                RangePhase::Left | RangePhase::Right => {
                    let range = match self.child {
                        0 => (self.lp > self.low).then(|| (self.low, self.lp - 1)),
                        1 => (self.rp > self.lp + 1).then(|| (self.lp + 1, self.rp - 1)),
                        2 => (self.rp < self.high).then(|| (self.rp + 1, self.high)),
                        _ => {
                            self.phase = RangePhase::Done;
                            continue;
                        }
                    };
                    self.child += 1;
                    if let Some((low, high)) = range {
                        return Flow::Call(Box::new(DualRange::new(low, high)));
                    }
                }
                RangePhase::Done => return Flow::Return,
            }
        }
    }
}

/// Dual-pivot quick sort
pub struct DualPivotSort {
    n: usize,
    started: bool,
}

impl DualPivotSort {
    pub fn new(n: usize) -> Self {
        DualPivotSort { n, started: false }
    }
}

impl Frame for DualPivotSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(DualRange::new(0, self.n - 1)))
    }
}

/// One activation of intro sort over `[low, high]` with its remaining depth
struct IntroRange {
    low: usize,
    high: usize,
    depth: usize,
    pivot: usize,
    phase: RangePhase,
}

impl IntroRange {
    fn new(low: usize, high: usize, depth: usize) -> Self {
        IntroRange {
            low,
            high,
            depth,
            pivot: low,
            phase: RangePhase::Partition,
        }
    }
}

impl Frame for IntroRange {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                RangePhase::Partition => {
                    self.phase = RangePhase::Done;
                    if self.high - self.low < INTRO_THRESHOLD {
                        return Flow::Call(Box::new(RangeInsertion::new(
                            self.low,
                            self.high,
                            Marking::WholeRange,
                        )));
                    }
                    if self.depth == 0 {
                        return Flow::Call(Box::new(RangeHeap::new(self.low, self.high, true)));
                    }
                    self.phase = RangePhase::Placed;
                    return Flow::Call(Box::new(Partition::new(self.low, self.high)));
                }
                RangePhase::Placed => {
                    let Some((pivot, _)) = ws.take_return() else {
                        return Flow::Return;
                    };
                    self.pivot = pivot;
                    ws.sorted.insert(pivot);
                    self.phase = RangePhase::Left;
                    return Flow::Emit(ws.info(
                        vec![pivot],
                        format!("{} is in its final position", ws.at(pivot)),
                    ));
                }
                RangePhase::Left => {
                    self.phase = RangePhase::Right;
                    if self.pivot > self.low {
                        return Flow::Call(Box::new(IntroRange::new(
                            self.low,
                            self.pivot - 1,
                            self.depth - 1,
                        )));
                    }
                }
                RangePhase::Right => {
                    self.phase = RangePhase::Done;
                    if self.pivot < self.high {
                        return Flow::Call(Box::new(IntroRange::new(
                            self.pivot + 1,
                            self.high,
                            self.depth - 1,
                        )));
                    }
                }
                RangePhase::Done => return Flow::Return,
            }
        }
    }
}

/// Depth limit `2 * floor(log2(n))`
pub fn intro_depth_limit(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        2 * n.ilog2() as usize
    }
}

/// Intro sort: quick sort guarded by insertion and heap sort fallbacks
pub struct IntroSort {
    n: usize,
    started: bool,
}

impl IntroSort {
    pub fn new(n: usize) -> Self {
        IntroSort { n, started: false }
    }
}

impl Frame for IntroSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(IntroRange::new(
            0,
            self.n - 1,
            intro_depth_limit(self.n),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmId;
    use crate::engine::run;

    #[test]
    fn test_depth_limit() {
        assert_eq!(intro_depth_limit(1), 0);
        assert_eq!(intro_depth_limit(16), 8);
        assert_eq!(intro_depth_limit(1000), 18);
    }

    #[test]
    fn test_dual_pivot_with_duplicates_and_pairs() {
        for input in [vec![2, 1], vec![3, 3, 3], vec![5, 1, 5, 1, 5], vec![9, 2, 7, 2, 9, 0]] {
            let last = run(AlgorithmId::DualPivot, &input).unwrap().last().unwrap();
            let mut expected = input.clone();
            expected.sort_unstable();
            assert_eq!(last.array, expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_intro_sort_falls_back_to_heap_on_sorted_input() {
        // Lomuto on sorted input peels one element per level, exhausting the depth limit
        let input: Vec<i64> = (0..200).collect();
        let snaps: Vec<_> = run(AlgorithmId::Intro, &input).unwrap().collect();

        assert!(snaps.iter().any(|s| s.description().starts_with("Heap over")));
        assert_eq!(snaps.last().unwrap().array, input);
    }
}
