//! Live state shared by every frame of a run

use crate::snapshot::{Metadata, Snapshot, SortedSet, StepKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The array being sorted plus the bookkeeping every algorithm threads through
///
/// Frames mutate `array` in place. Snapshots are always built from a fresh
/// copy, so nothing a consumer holds can observe a later mutation.
pub struct Workspace {
    pub(crate) array: Vec<i64>,
    pub(crate) sorted: SortedSet,
    pub(crate) rng: StdRng,
    /// Return register for frames that hand a result to their caller
    returned: Option<(usize, usize)>,
}

impl Workspace {
    pub fn new(array: Vec<i64>, seed: u64) -> Self {
        Workspace {
            array,
            sorted: SortedSet::new(),
            rng: StdRng::seed_from_u64(seed),
            returned: None,
        }
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn at(&self, index: usize) -> i64 {
        self.array[index]
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
    }

    pub fn is_sorted(&self) -> bool {
        self.array.windows(2).all(|w| w[0] <= w[1])
    }

    pub(crate) fn set_return(&mut self, first: usize, second: usize) {
        self.returned = Some((first, second));
    }

    pub(crate) fn take_return(&mut self) -> Option<(usize, usize)> {
        self.returned.take()
    }

    /// Snapshot of the current state with narration
    pub fn snapshot(
        &self,
        kind: StepKind,
        active: Vec<usize>,
        description: impl Into<String>,
    ) -> Snapshot {
        Snapshot::new(self.array.clone(), active, self.sorted.to_vec())
            .with_metadata(Metadata::new(kind, description))
    }

    /// Emitted immediately before comparing `a` with `b`
    pub fn compare(&self, a: usize, b: usize) -> Snapshot {
        self.snapshot(
            StepKind::Compare,
            vec![a, b],
            format!("Comparing {} and {}", self.array[a], self.array[b]),
        )
    }

    /// Emitted immediately after swapping `a` and `b`
    pub fn swapped(&self, a: usize, b: usize) -> Snapshot {
        self.snapshot(
            StepKind::Swap,
            vec![a, b],
            format!("Swapped {} and {}", self.array[b], self.array[a]),
        )
    }

    pub fn info(&self, active: Vec<usize>, description: impl Into<String>) -> Snapshot {
        self.snapshot(StepKind::Info, active, description)
    }

    /// Terminal snapshot of a successful run: everything is finalized
    pub fn finish(&mut self) -> Snapshot {
        if !self.is_empty() {
            self.sorted.insert_range(0, self.len() - 1);
        }
        self.snapshot(StepKind::Success, Vec::new(), "Array is sorted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut ws = Workspace::new(vec![2, 1], 0);
        let before = ws.compare(0, 1);
        ws.swap(0, 1);
        let after = ws.swapped(0, 1);

        assert_eq!(before.array, vec![2, 1]);
        assert_eq!(after.array, vec![1, 2]);
        assert_eq!(before.description(), "Comparing 2 and 1");
        assert_eq!(after.description(), "Swapped 2 and 1");
    }

    #[test]
    fn test_finish_marks_everything() {
        let mut ws = Workspace::new(vec![1, 2, 3], 0);
        ws.sorted.insert(2);
        let last = ws.finish();

        let mut sorted = last.sorted_indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert_eq!(last.kind(), Some(StepKind::Success));
    }

    #[test]
    fn test_return_register_is_taken_once() {
        let mut ws = Workspace::new(vec![], 0);
        ws.set_return(3, 4);
        assert_eq!(ws.take_return(), Some((3, 4)));
        assert_eq!(ws.take_return(), None);
    }
}
