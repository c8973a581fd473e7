//! The eighteen instrumented sorting algorithms
//!
//! Each algorithm is a root [`Frame`] plus whatever child frames it calls,
//! grouped by family:
//! - [`exchange`]: bubble, selection, insertion, gnome, cocktail shaker, comb, odd-even
//! - [`merge`]: merge sort, tim sort
//! - [`quick`]: quick sort, dual-pivot quick sort, intro sort
//! - [`heap`]: heap sort
//! - [`distribution`]: counting, bucket and radix sort
//! - [`novelty`]: bogo sort, sleep sort
//! - [`shared`]: range-scoped routines and the sorted-suffix detector
//!
//! Inputs of length 0 or 1 never reach an algorithm body: they are settled by
//! a single terminal snapshot.

pub mod distribution;
pub mod exchange;
pub mod heap;
pub mod merge;
pub mod novelty;
pub mod quick;
pub mod shared;

use crate::engine::errors::SortError;
use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the catalogued algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Gnome,
    Cocktail,
    Comb,
    OddEven,
    Merge,
    Quick,
    Heap,
    Intro,
    Tim,
    DualPivot,
    Counting,
    Bucket,
    Radix,
    Bogo,
    Sleep,
}

impl AlgorithmId {
    /// Catalogue order
    pub const ALL: [AlgorithmId; 18] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Gnome,
        AlgorithmId::Cocktail,
        AlgorithmId::Comb,
        AlgorithmId::OddEven,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
        AlgorithmId::Intro,
        AlgorithmId::Tim,
        AlgorithmId::DualPivot,
        AlgorithmId::Counting,
        AlgorithmId::Bucket,
        AlgorithmId::Radix,
        AlgorithmId::Bogo,
        AlgorithmId::Sleep,
    ];

    /// Stable string id used on the command line and in the catalogue
    pub fn id(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Gnome => "gnome",
            AlgorithmId::Cocktail => "cocktail",
            AlgorithmId::Comb => "comb",
            AlgorithmId::OddEven => "oddeven",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
            AlgorithmId::Intro => "intro",
            AlgorithmId::Tim => "tim",
            AlgorithmId::DualPivot => "dualpivot",
            AlgorithmId::Counting => "counting",
            AlgorithmId::Bucket => "bucket",
            AlgorithmId::Radix => "radix",
            AlgorithmId::Bogo => "bogo",
            AlgorithmId::Sleep => "sleep",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "Bubble Sort",
            AlgorithmId::Selection => "Selection Sort",
            AlgorithmId::Insertion => "Insertion Sort",
            AlgorithmId::Gnome => "Gnome Sort",
            AlgorithmId::Cocktail => "Cocktail Shaker Sort",
            AlgorithmId::Comb => "Comb Sort",
            AlgorithmId::OddEven => "Odd-Even Sort",
            AlgorithmId::Merge => "Merge Sort",
            AlgorithmId::Quick => "Quick Sort",
            AlgorithmId::Heap => "Heap Sort",
            AlgorithmId::Intro => "Intro Sort",
            AlgorithmId::Tim => "Tim Sort",
            AlgorithmId::DualPivot => "Dual-Pivot Quick Sort",
            AlgorithmId::Counting => "Counting Sort",
            AlgorithmId::Bucket => "Bucket Sort",
            AlgorithmId::Radix => "Radix Sort",
            AlgorithmId::Bogo => "Bogo Sort",
            AlgorithmId::Sleep => "Sleep Sort",
        }
    }

    /// Bucket, radix and sleep sort index by value and need values >= 0
    pub fn supports_negatives(self) -> bool {
        !matches!(
            self,
            AlgorithmId::Bucket | AlgorithmId::Radix | AlgorithmId::Sleep
        )
    }

    /// Whether two runs over the same input always emit the same sequence
    pub fn is_deterministic(self) -> bool {
        self != AlgorithmId::Bogo
    }

    /// Build the root frame for a run over `ws.array`
    pub(crate) fn root_frame(self, ws: &Workspace) -> Box<dyn Frame> {
        let n = ws.len();
        if n <= 1 {
            return Box::new(Settled::new(self));
        }

        match self {
            AlgorithmId::Bubble => Box::new(exchange::Bubble::new(n)),
            AlgorithmId::Selection => Box::new(exchange::Selection::new(n)),
            AlgorithmId::Insertion => Box::new(exchange::Insertion::new(n)),
            AlgorithmId::Gnome => Box::new(exchange::Gnome::new(n)),
            AlgorithmId::Cocktail => Box::new(exchange::Cocktail::new(n)),
            AlgorithmId::Comb => Box::new(exchange::Comb::new(n)),
            AlgorithmId::OddEven => Box::new(exchange::OddEven::new(n)),
            AlgorithmId::Merge => Box::new(merge::MergeSort::new(n)),
            AlgorithmId::Tim => Box::new(merge::TimSort::new(n)),
            AlgorithmId::Quick => Box::new(quick::QuickSort::new(n)),
            AlgorithmId::DualPivot => Box::new(quick::DualPivotSort::new(n)),
            AlgorithmId::Intro => Box::new(quick::IntroSort::new(n)),
            AlgorithmId::Heap => Box::new(heap::HeapSort::new(n)),
            AlgorithmId::Counting => Box::new(distribution::CountingSort::new(&ws.array)),
            AlgorithmId::Bucket => Box::new(distribution::BucketSort::new(&ws.array)),
            AlgorithmId::Radix => Box::new(distribution::RadixSort::new(&ws.array)),
            AlgorithmId::Bogo => Box::new(novelty::BogoSort::new()),
            AlgorithmId::Sleep => Box::new(novelty::SleepSort::new()),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmId {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AlgorithmId::ALL
            .into_iter()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| SortError::UnknownAlgorithm { id: s.to_string() })
    }
}

/// Root frame for inputs that are sorted before any work happens
struct Settled {
    algorithm: AlgorithmId,
}

impl Settled {
    fn new(algorithm: AlgorithmId) -> Self {
        Settled { algorithm }
    }
}

impl Frame for Settled {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let snapshot = ws.finish();
        // Counting sort always shows its table, even for one element
        if self.algorithm == AlgorithmId::Counting {
            if let Some(&value) = ws.array.first() {
                return Flow::Finish(snapshot.with_auxiliary(vec![1]).with_range(value, value));
            }
        }
        Flow::Finish(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for algorithm in AlgorithmId::ALL {
            assert_eq!(algorithm.id().parse::<AlgorithmId>().unwrap(), algorithm);
        }
        assert_eq!(" Bubble ".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bubble);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let err = "stooge".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown algorithm 'stooge'");
    }
}
