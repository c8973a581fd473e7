//! Routines reused by several algorithms
//!
//! - [`sorted_suffix`]: finalized-suffix heuristic for sorts without a
//!   natural boundary (comb, odd-even)
//! - [`RangeInsertion`]: insertion sort over `[low, high]` (insertion, intro, tim)
//! - [`RangeHeap`]: heap sort over `[low, high]` (heap, intro)
//! - [`RangeMerge`]: stable merge of `[low, mid]` and `[mid + 1, high]` (merge, tim)
//! - [`Partition`]: Lomuto partition around `array[high]` (quick, intro)

use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};
use crate::snapshot::StepKind;

/// Maximal suffix whose elements are each `>=` everything to their left and
/// `<=` everything to their right, listed from the last index backwards.
pub fn sorted_suffix(array: &[i64]) -> Vec<usize> {
    let n = array.len();

    // max_left[i] is the max of array[..i]; min_right[i] the min of array[i + 1..]
    let mut max_left = vec![i64::MIN; n];
    let mut running = i64::MIN;
    for (i, &value) in array.iter().enumerate() {
        max_left[i] = running;
        running = running.max(value);
    }

    let mut min_right = vec![i64::MAX; n];
    let mut running = i64::MAX;
    for i in (0..n).rev() {
        min_right[i] = running;
        running = running.min(array[i]);
    }

    (0..n)
        .rev()
        .take_while(|&i| array[i] >= max_left[i] && array[i] <= min_right[i])
        .collect()
}

/// How a range-scoped insertion sort reports finalized indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marking {
    /// Leave the finalized set alone
    Untracked,
    /// Grow the self-sorted prefix `low..=i` as each key settles
    Prefix,
    /// Mark the whole range once it is sorted
    WholeRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionPhase {
    NextKey,
    Compare,
    Resolve,
    Settle,
    Done,
}

/// Insertion sort over `[low, high]`, shifting the key down one swap at a time
pub(crate) struct RangeInsertion {
    low: usize,
    high: usize,
    i: usize,
    j: usize,
    marking: Marking,
    phase: InsertionPhase,
}

impl RangeInsertion {
    pub(crate) fn new(low: usize, high: usize, marking: Marking) -> Self {
        RangeInsertion {
            low,
            high,
            i: low + 1,
            j: low,
            marking,
            phase: InsertionPhase::NextKey,
        }
    }
}

impl Frame for RangeInsertion {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                InsertionPhase::NextKey => {
                    if self.i > self.high {
                        self.phase = InsertionPhase::Done;
                        continue;
                    }
                    if self.marking == Marking::Prefix {
                        ws.sorted.insert_range(self.low, self.i - 1);
                    }
                    self.j = self.i;
                    self.phase = InsertionPhase::Compare;
                }
                InsertionPhase::Compare => {
                    if self.j == self.low {
                        self.phase = InsertionPhase::Settle;
                        continue;
                    }
                    self.phase = InsertionPhase::Resolve;
                    return Flow::Emit(ws.compare(self.j, self.j - 1));
                }
                InsertionPhase::Resolve => {
                    let j = self.j;
                    if ws.at(j - 1) > ws.at(j) {
                        ws.swap(j - 1, j);
                        self.j -= 1;
                        self.phase = InsertionPhase::Compare;
                        return Flow::Emit(ws.snapshot(
                            StepKind::Move,
                            vec![j - 1, j],
                            format!("Shifted {} right to index {}", ws.at(j), j),
                        ));
                    }
                    self.phase = InsertionPhase::Settle;
                }
                InsertionPhase::Settle => {
                    if self.marking == Marking::Prefix {
                        ws.sorted.insert_range(self.low, self.i);
                    }
                    let slot = self.j;
                    self.i += 1;
                    self.phase = InsertionPhase::NextKey;
                    return Flow::Emit(ws.info(
                        vec![slot],
                        format!("Inserted {} at index {}", ws.at(slot), slot),
                    ));
                }
                InsertionPhase::Done => {
                    if self.marking != Marking::WholeRange {
                        return Flow::Return;
                    }
                    ws.sorted.insert_range(self.low, self.high);
                    return Flow::Finish(ws.info(
                        Vec::new(),
                        format!("Range {}..={} is sorted", self.low, self.high),
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiftPhase {
    CompareLeft,
    ResolveLeft,
    ResolveRight,
    Exchange,
}

/// Sift-down of one heap node, iterative so a single frame suffices
#[derive(Debug, Clone, Copy)]
struct Sift {
    root: usize,
    size: usize,
    largest: usize,
    phase: SiftPhase,
}

impl Sift {
    fn new(root: usize, size: usize) -> Self {
        Sift {
            root,
            size,
            largest: root,
            phase: SiftPhase::CompareLeft,
        }
    }

    /// Advance the sift-down over the heap stored at `off`; `None` once settled
    fn step(&mut self, ws: &mut Workspace, off: usize) -> Option<Flow> {
        loop {
            match self.phase {
                SiftPhase::CompareLeft => {
                    let left = 2 * self.root + 1;
                    if left >= self.size {
                        return None;
                    }
                    self.largest = self.root;
                    self.phase = SiftPhase::ResolveLeft;
                    return Some(Flow::Emit(ws.compare(off + left, off + self.root)));
                }
                SiftPhase::ResolveLeft => {
                    let left = 2 * self.root + 1;
                    if ws.at(off + left) > ws.at(off + self.largest) {
                        self.largest = left;
                    }
                    let right = left + 1;
                    if right < self.size {
                        self.phase = SiftPhase::ResolveRight;
                        return Some(Flow::Emit(ws.compare(off + right, off + self.largest)));
                    }
                    self.phase = SiftPhase::Exchange;
                }
                SiftPhase::ResolveRight => {
                    let right = 2 * self.root + 2;
                    if ws.at(off + right) > ws.at(off + self.largest) {
                        self.largest = right;
                    }
                    self.phase = SiftPhase::Exchange;
                }
                SiftPhase::Exchange => {
                    if self.largest == self.root {
                        return None;
                    }
                    let (parent, child) = (off + self.root, off + self.largest);
                    ws.swap(parent, child);
                    self.root = self.largest;
                    self.phase = SiftPhase::CompareLeft;
                    return Some(Flow::Emit(ws.swapped(child, parent)));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeapPhase {
    Build,
    Extract,
    Done,
}

/// Max-heap sort over `[low, high]`, offsets relative to `low`
pub(crate) struct RangeHeap {
    low: usize,
    size: usize,
    /// Next node to heapify during build, next tail slot during extraction
    cursor: usize,
    sift: Option<Sift>,
    finalize: bool,
    phase: HeapPhase,
}

impl RangeHeap {
    pub(crate) fn new(low: usize, high: usize, finalize: bool) -> Self {
        let size = high - low + 1;
        RangeHeap {
            low,
            size,
            cursor: size / 2,
            sift: None,
            finalize,
            phase: HeapPhase::Build,
        }
    }
}

impl Frame for RangeHeap {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            if let Some(sift) = self.sift.as_mut() {
                match sift.step(ws, self.low) {
                    Some(flow) => return flow,
                    None => self.sift = None,
                }
            }
            match self.phase {
                HeapPhase::Build => {
                    if self.cursor == 0 {
                        self.cursor = self.size - 1;
                        self.phase = HeapPhase::Extract;
                        continue;
                    }
                    self.cursor -= 1;
                    self.sift = Some(Sift::new(self.cursor, self.size));
                }
                HeapPhase::Extract => {
                    if self.cursor == 0 {
                        self.phase = HeapPhase::Done;
                        continue;
                    }
                    let tail = self.low + self.cursor;
                    ws.swap(self.low, tail);
                    if self.finalize {
                        ws.sorted.insert(tail);
                    }
                    self.sift = Some(Sift::new(0, self.cursor));
                    self.cursor -= 1;
                    return Flow::Emit(ws.snapshot(
                        StepKind::Swap,
                        vec![tail, self.low],
                        format!("Moved max {} to index {}", ws.at(tail), tail),
                    ));
                }
                HeapPhase::Done => {
                    if !self.finalize {
                        return Flow::Return;
                    }
                    ws.sorted.insert(self.low);
                    return Flow::Finish(ws.info(
                        vec![self.low],
                        format!(
                            "Heap over {}..={} fully extracted",
                            self.low,
                            self.low + self.size - 1
                        ),
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergePhase {
    Compare,
    Take,
    Drain,
}

/// Stable merge of `[low, mid]` and `[mid + 1, high]` through temporary copies
///
/// The write cursor is reported as the pivot index. With `finalize` set the
/// merged range is marked on the final write.
pub(crate) struct RangeMerge {
    low: usize,
    high: usize,
    left: Vec<i64>,
    right: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
    finalize: bool,
    phase: MergePhase,
}

impl RangeMerge {
    pub(crate) fn new(ws: &Workspace, low: usize, mid: usize, high: usize, finalize: bool) -> Self {
        RangeMerge {
            low,
            high,
            left: ws.array[low..=mid].to_vec(),
            right: ws.array[mid + 1..=high].to_vec(),
            i: 0,
            j: 0,
            k: low,
            finalize,
            phase: MergePhase::Compare,
        }
    }

    fn write(&mut self, ws: &mut Workspace, value: i64, from_left: bool) -> Flow {
        let k = self.k;
        ws.array[k] = value;
        self.k += 1;

        let side = if from_left { "left" } else { "right" };
        let description = format!("Placed {} from the {} half at index {}", value, side, k);
        if k == self.high {
            if self.finalize {
                ws.sorted.insert_range(self.low, self.high);
            }
            return Flow::Finish(ws.snapshot(StepKind::Move, vec![k], description).with_pivot(k));
        }
        Flow::Emit(ws.snapshot(StepKind::Move, vec![k], description).with_pivot(k))
    }
}

impl Frame for RangeMerge {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        match self.phase {
            MergePhase::Compare => {
                if self.i < self.left.len() && self.j < self.right.len() {
                    self.phase = MergePhase::Take;
                    let description = format!(
                        "Comparing {} (left) with {} (right)",
                        self.left[self.i], self.right[self.j]
                    );
                    return Flow::Emit(
                        ws.snapshot(StepKind::Compare, vec![self.k], description)
                            .with_pivot(self.k),
                    );
                }
                self.phase = MergePhase::Drain;
                self.resume(ws)
            }
            MergePhase::Take => {
                self.phase = MergePhase::Compare;
                // Ties prefer the left half, which keeps the merge stable
                if self.left[self.i] <= self.right[self.j] {
                    let value = self.left[self.i];
                    self.i += 1;
                    self.write(ws, value, true)
                } else {
                    let value = self.right[self.j];
                    self.j += 1;
                    self.write(ws, value, false)
                }
            }
            MergePhase::Drain => {
                if self.i < self.left.len() {
                    let value = self.left[self.i];
                    self.i += 1;
                    self.write(ws, value, true)
                } else if self.j < self.right.len() {
                    let value = self.right[self.j];
                    self.j += 1;
                    self.write(ws, value, false)
                } else {
                    Flow::Return
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartitionPhase {
    Announce,
    Compare,
    Resolve,
    Place,
}

/// Lomuto partition of `[low, high]` around `array[high]`
///
/// Leaves the pivot's final index in the workspace return register.
pub(crate) struct Partition {
    high: usize,
    pivot: i64,
    /// Next slot for an element smaller than the pivot
    store: usize,
    j: usize,
    phase: PartitionPhase,
}

impl Partition {
    pub(crate) fn new(low: usize, high: usize) -> Self {
        Partition {
            high,
            pivot: 0,
            store: low,
            j: low,
            phase: PartitionPhase::Announce,
        }
    }
}

impl Frame for Partition {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let high = self.high;
        loop {
            match self.phase {
                PartitionPhase::Announce => {
                    self.pivot = ws.at(high);
                    self.phase = PartitionPhase::Compare;
                    return Flow::Emit(
                        ws.info(vec![high], format!("Pivot is {}", self.pivot))
                            .with_pivot(high),
                    );
                }
                PartitionPhase::Compare => {
                    if self.j >= high {
                        self.phase = PartitionPhase::Place;
                        continue;
                    }
                    self.phase = PartitionPhase::Resolve;
                    return Flow::Emit(ws.compare(self.j, high).with_pivot(high));
                }
                PartitionPhase::Resolve => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = PartitionPhase::Compare;
                    if ws.at(j) < self.pivot {
                        let store = self.store;
                        self.store += 1;
                        if store != j {
                            ws.swap(store, j);
                            return Flow::Emit(ws.swapped(store, j).with_pivot(high));
                        }
                    }
                }
                PartitionPhase::Place => {
                    let store = self.store;
                    ws.swap(store, high);
                    ws.set_return(store, store);
                    return Flow::Finish(
                        ws.snapshot(
                            StepKind::Swap,
                            vec![store, high],
                            format!("Pivot {} placed at index {}", self.pivot, store),
                        )
                        .with_pivot(store),
                    );
                }
            }
        }
    }
}
