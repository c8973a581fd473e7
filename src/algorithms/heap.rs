//! Heap sort over the whole array

use super::shared::RangeHeap;
use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};

/// Bottom-up max-heap build, then repeated root extraction into the tail
pub struct HeapSort {
    n: usize,
    started: bool,
}

impl HeapSort {
    pub fn new(n: usize) -> Self {
        HeapSort { n, started: false }
    }
}

impl Frame for HeapSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        if self.started {
            return Flow::Finish(ws.finish());
        }
        self.started = true;
        Flow::Call(Box::new(RangeHeap::new(0, self.n - 1, true)))
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::AlgorithmId;
    use crate::engine::run;

    #[test]
    fn test_tail_is_finalized_in_extraction_order() {
        let snaps: Vec<_> = run(AlgorithmId::Heap, &[3, 9, 1, 7, 5]).unwrap().collect();

        let first_marked = snaps
            .iter()
            .find(|s| !s.sorted_indices.is_empty())
            .unwrap();
        assert_eq!(first_marked.sorted_indices, vec![4]);
        assert_eq!(first_marked.array[4], 9);
        assert_eq!(snaps.last().unwrap().array, vec![1, 3, 5, 7, 9]);
    }
}
