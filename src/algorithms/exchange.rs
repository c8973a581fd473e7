//! Iterative exchange sorts
//!
//! None of these recurse, so each is a single root frame whose loop cursors
//! live in fields. Bubble, cocktail and selection sort finalize a boundary
//! index per pass; insertion and gnome sort show their self-sorted prefix;
//! comb and odd-even sort have no natural boundary and fold the
//! [`sorted_suffix`] heuristic into the finalized set before every compare.

use super::shared::{sorted_suffix, Marking, RangeInsertion};
use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassPhase {
    StartPass,
    Compare,
    Resolve,
    EndPass,
    Finish,
}

/// Bubble sort with early exit on a pass without swaps
pub struct Bubble {
    n: usize,
    pass: usize,
    j: usize,
    swapped: bool,
    phase: PassPhase,
}

impl Bubble {
    pub fn new(n: usize) -> Self {
        Bubble {
            n,
            pass: 0,
            j: 0,
            swapped: false,
            phase: PassPhase::StartPass,
        }
    }
}

impl Frame for Bubble {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                PassPhase::StartPass => {
                    if self.pass >= self.n {
                        self.phase = PassPhase::Finish;
                        continue;
                    }
                    self.swapped = false;
                    self.j = 0;
                    self.phase = PassPhase::Compare;
                }
                PassPhase::Compare => {
                    if self.j + 1 >= self.n - self.pass {
                        self.phase = PassPhase::EndPass;
                        continue;
                    }
                    self.phase = PassPhase::Resolve;
                    return Flow::Emit(ws.compare(self.j, self.j + 1));
                }
                PassPhase::Resolve => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = PassPhase::Compare;
                    if ws.at(j) > ws.at(j + 1) {
                        ws.swap(j, j + 1);
                        self.swapped = true;
                        return Flow::Emit(ws.swapped(j, j + 1));
                    }
                }
                PassPhase::EndPass => {
                    ws.sorted.insert(self.n - self.pass - 1);
                    self.pass += 1;
                    self.phase = if self.swapped {
                        PassPhase::StartPass
                    } else {
                        PassPhase::Finish
                    };
                }
                PassPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionPhase {
    StartPass,
    Compare,
    Resolve,
    Place,
    Finish,
}

/// Selection sort; the running minimum is the second active index
pub struct Selection {
    n: usize,
    i: usize,
    j: usize,
    min_idx: usize,
    phase: SelectionPhase,
}

impl Selection {
    pub fn new(n: usize) -> Self {
        Selection {
            n,
            i: 0,
            j: 0,
            min_idx: 0,
            phase: SelectionPhase::StartPass,
        }
    }
}

impl Frame for Selection {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                SelectionPhase::StartPass => {
                    if self.i >= self.n {
                        self.phase = SelectionPhase::Finish;
                        continue;
                    }
                    self.min_idx = self.i;
                    self.j = self.i + 1;
                    self.phase = SelectionPhase::Compare;
                }
                SelectionPhase::Compare => {
                    if self.j >= self.n {
                        self.phase = SelectionPhase::Place;
                        continue;
                    }
                    self.phase = SelectionPhase::Resolve;
                    let mut snapshot = ws.compare(self.j, self.min_idx);
                    if self.i != self.min_idx {
                        snapshot.active_indices.push(self.i);
                    }
                    return Flow::Emit(snapshot);
                }
                SelectionPhase::Resolve => {
                    if ws.at(self.j) < ws.at(self.min_idx) {
                        self.min_idx = self.j;
                    }
                    self.j += 1;
                    self.phase = SelectionPhase::Compare;
                }
                SelectionPhase::Place => {
                    let (i, min_idx) = (self.i, self.min_idx);
                    self.i += 1;
                    self.phase = SelectionPhase::StartPass;
                    if min_idx != i {
                        ws.swap(i, min_idx);
                        ws.sorted.insert(i);
                        return Flow::Emit(ws.swapped(i, min_idx));
                    }
                    ws.sorted.insert(i);
                }
                SelectionPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

/// Insertion sort over the whole array, growing a sorted prefix
pub struct Insertion {
    n: usize,
    started: bool,
}

impl Insertion {
    pub fn new(n: usize) -> Self {
        Insertion { n, started: false }
    }
}

impl Frame for Insertion {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(RangeInsertion::new(0, self.n - 1, Marking::Prefix)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GnomePhase {
    Compare,
    Resolve,
    Finish,
}

/// Gnome sort: one cursor that steps back after every swap
///
/// The finalized set is the high-water mark of the cursor, i.e. the prefix
/// that has been sorted relative to itself at least once.
pub struct Gnome {
    n: usize,
    index: usize,
    phase: GnomePhase,
}

impl Gnome {
    pub fn new(n: usize) -> Self {
        Gnome {
            n,
            index: 0,
            phase: GnomePhase::Compare,
        }
    }
}

impl Frame for Gnome {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                GnomePhase::Compare => {
                    if self.index == 0 {
                        self.index = 1;
                    }
                    if self.index >= self.n {
                        self.phase = GnomePhase::Finish;
                        continue;
                    }
                    ws.sorted.insert_range(0, self.index - 1);
                    self.phase = GnomePhase::Resolve;
                    return Flow::Emit(ws.compare(self.index, self.index - 1));
                }
                GnomePhase::Resolve => {
                    let index = self.index;
                    self.phase = GnomePhase::Compare;
                    if ws.at(index) >= ws.at(index - 1) {
                        self.index += 1;
                    } else {
                        ws.swap(index, index - 1);
                        self.index -= 1;
                        return Flow::Emit(ws.swapped(index, index - 1));
                    }
                }
                GnomePhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Cocktail shaker sort: alternating passes that finalize both ends
pub struct Cocktail {
    start: usize,
    end: usize,
    /// Lower index of the pair on forward passes, upper index on backward passes
    cursor: usize,
    swapped: bool,
    direction: Direction,
    phase: PassPhase,
}

impl Cocktail {
    pub fn new(n: usize) -> Self {
        Cocktail {
            start: 0,
            end: n,
            cursor: 0,
            swapped: false,
            direction: Direction::Forward,
            phase: PassPhase::StartPass,
        }
    }

    /// The adjacent pair under the cursor, if the pass has one left
    fn pair(&self) -> Option<(usize, usize)> {
        match self.direction {
            Direction::Forward if self.cursor + 1 < self.end => {
                Some((self.cursor, self.cursor + 1))
            }
            Direction::Backward if self.cursor > self.start => {
                Some((self.cursor - 1, self.cursor))
            }
            _ => None,
        }
    }
}

impl Frame for Cocktail {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                PassPhase::StartPass => {
                    self.swapped = false;
                    self.cursor = match self.direction {
                        Direction::Forward => self.start,
                        // `end` is exclusive and end - 1 was just finalized
                        Direction::Backward => self.end - 1,
                    };
                    self.phase = PassPhase::Compare;
                }
                PassPhase::Compare => {
                    let Some((a, b)) = self.pair() else {
                        self.phase = PassPhase::EndPass;
                        continue;
                    };
                    self.phase = PassPhase::Resolve;
                    return Flow::Emit(ws.compare(a, b));
                }
                PassPhase::Resolve => {
                    let Some((a, b)) = self.pair() else {
                        self.phase = PassPhase::EndPass;
                        continue;
                    };
                    match self.direction {
                        Direction::Forward => self.cursor += 1,
                        Direction::Backward => self.cursor -= 1,
                    }
                    self.phase = PassPhase::Compare;
                    if ws.at(a) > ws.at(b) {
                        ws.swap(a, b);
                        self.swapped = true;
                        return Flow::Emit(ws.swapped(a, b));
                    }
                }
                PassPhase::EndPass => match self.direction {
                    Direction::Forward => {
                        ws.sorted.insert(self.end - 1);
                        if !self.swapped {
                            self.phase = PassPhase::Finish;
                            continue;
                        }
                        self.end -= 1;
                        self.direction = Direction::Backward;
                        self.phase = PassPhase::StartPass;
                    }
                    Direction::Backward => {
                        ws.sorted.insert(self.start);
                        self.start += 1;
                        self.direction = Direction::Forward;
                        self.phase = if self.swapped {
                            PassPhase::StartPass
                        } else {
                            PassPhase::Finish
                        };
                    }
                },
                PassPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

/// Comb sort with shrink factor 1.3
pub struct Comb {
    n: usize,
    gap: usize,
    i: usize,
    clean: bool,
    phase: PassPhase,
}

impl Comb {
    pub fn new(n: usize) -> Self {
        Comb {
            n,
            gap: n,
            i: 0,
            clean: false,
            phase: PassPhase::StartPass,
        }
    }
}

impl Frame for Comb {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                PassPhase::StartPass => {
                    // floor(gap / 1.3) without floating point
                    self.gap = self.gap * 10 / 13;
                    self.clean = false;
                    if self.gap <= 1 {
                        self.gap = 1;
                        self.clean = true;
                    }
                    self.i = 0;
                    self.phase = PassPhase::Compare;
                }
                PassPhase::Compare => {
                    if self.i + self.gap >= self.n {
                        self.phase = PassPhase::EndPass;
                        continue;
                    }
                    ws.sorted.extend(sorted_suffix(&ws.array));
                    self.phase = PassPhase::Resolve;
                    return Flow::Emit(ws.compare(self.i, self.i + self.gap));
                }
                PassPhase::Resolve => {
                    let (a, b) = (self.i, self.i + self.gap);
                    self.i += 1;
                    self.phase = PassPhase::Compare;
                    if ws.at(a) > ws.at(b) {
                        ws.swap(a, b);
                        self.clean = false;
                        return Flow::Emit(ws.swapped(a, b));
                    }
                }
                PassPhase::EndPass => {
                    self.phase = if self.clean {
                        PassPhase::Finish
                    } else {
                        PassPhase::StartPass
                    };
                }
                PassPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

/// Odd-even (brick) sort, simulated sequentially: odd pairs, then even pairs
pub struct OddEven {
    n: usize,
    /// First index of the pair family in the current half-round (1 = odd, 0 = even)
    parity: usize,
    i: usize,
    clean: bool,
    phase: PassPhase,
}

impl OddEven {
    pub fn new(n: usize) -> Self {
        OddEven {
            n,
            parity: 1,
            i: 1,
            clean: true,
            phase: PassPhase::StartPass,
        }
    }
}

impl Frame for OddEven {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                PassPhase::StartPass => {
                    if self.parity == 1 {
                        self.clean = true;
                    }
                    self.i = self.parity;
                    self.phase = PassPhase::Compare;
                }
                PassPhase::Compare => {
                    if self.i + 1 >= self.n {
                        self.phase = PassPhase::EndPass;
                        continue;
                    }
                    ws.sorted.extend(sorted_suffix(&ws.array));
                    self.phase = PassPhase::Resolve;
                    return Flow::Emit(ws.compare(self.i, self.i + 1));
                }
                PassPhase::Resolve => {
                    let i = self.i;
                    self.i += 2;
                    self.phase = PassPhase::Compare;
                    if ws.at(i) > ws.at(i + 1) {
                        ws.swap(i, i + 1);
                        self.clean = false;
                        return Flow::Emit(ws.swapped(i, i + 1));
                    }
                }
                PassPhase::EndPass => {
                    if self.parity == 1 {
                        self.parity = 0;
                        self.phase = PassPhase::StartPass;
                    } else if self.clean {
                        self.phase = PassPhase::Finish;
                    } else {
                        self.parity = 1;
                        self.phase = PassPhase::StartPass;
                    }
                }
                PassPhase::Finish => return Flow::Finish(ws.finish()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::AlgorithmId;
    use crate::engine::run;
    use crate::snapshot::StepKind;

    #[test]
    fn test_bubble_compares_before_swapping() {
        let snaps: Vec<_> = run(AlgorithmId::Bubble, &[5, 1, 4, 2, 8]).unwrap().collect();

        assert_eq!(snaps[0].active_indices, vec![0, 1]);
        assert_eq!(snaps[0].kind(), Some(StepKind::Compare));
        assert_eq!(snaps[0].description(), "Comparing 5 and 1");
        assert_eq!(snaps[1].kind(), Some(StepKind::Swap));
        assert_eq!(snaps[1].array, vec![1, 5, 4, 2, 8]);
        assert_eq!(snaps.last().unwrap().array, vec![1, 2, 4, 5, 8]);
    }

    #[test]
    fn test_bubble_exits_after_clean_pass() {
        let snaps: Vec<_> = run(AlgorithmId::Bubble, &[1, 2, 3, 4]).unwrap().collect();
        // One pass of three compares plus the terminal snapshot
        assert_eq!(snaps.len(), 4);
    }

    #[test]
    fn test_selection_tracks_running_minimum() {
        let snaps: Vec<_> = run(AlgorithmId::Selection, &[3, 1, 2]).unwrap().collect();
        // Once 1 is the minimum, the pass start joins the active set
        assert_eq!(snaps[1].active_indices, vec![2, 1, 0]);
        assert_eq!(snaps[2].kind(), Some(StepKind::Swap));
        assert_eq!(snaps[2].sorted_indices, vec![0]);
    }

    #[test]
    fn test_gnome_never_compares_index_zero_with_its_left() {
        for snapshot in run(AlgorithmId::Gnome, &[4, 3, 2, 1]).unwrap() {
            if snapshot.kind() == Some(StepKind::Compare) {
                assert!(snapshot.active_indices[0] >= 1);
            }
        }
    }

    #[test]
    fn test_cocktail_finalizes_both_ends() {
        let snaps: Vec<_> = run(AlgorithmId::Cocktail, &[3, 5, 1, 4, 2]).unwrap().collect();
        let marks: Vec<_> = snaps
            .iter()
            .map(|s| s.sorted_indices.clone())
            .find(|m| m.len() == 2)
            .unwrap();
        assert_eq!(marks, vec![4, 0]);
        assert_eq!(snaps.last().unwrap().array, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_comb_and_odd_even_sort_reversed_input() {
        let input: Vec<i64> = (0..25).rev().collect();
        let expected: Vec<i64> = (0..25).collect();
        for algorithm in [AlgorithmId::Comb, AlgorithmId::OddEven] {
            let last = run(algorithm, &input).unwrap().last().unwrap();
            assert_eq!(last.array, expected, "{}", algorithm);
        }
    }
}
