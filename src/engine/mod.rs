//! Step-emission engine
//!
//! This module turns an algorithm into a pull-based sequence of snapshots:
//! - [`workspace`]: the live array, the finalized set and snapshot builders
//! - [`errors`]: input validation errors
//!
//! # Execution Model
//!
//! Every algorithm is written as a set of [`Frame`]s. A frame is one
//! activation of a routine (a merge-sort range, a partition, a sift-down)
//! with its loop cursors and locals stored as fields. The
//! [`SnapshotSequence`] keeps an explicit stack of frames and, on each pull,
//! resumes the top frame until one of them emits a snapshot:
//!
//! ```text
//! next() → top.resume() → Emit     → return snapshot, frame stays
//!                       → Call     → push child, keep resuming
//!                       → Return   → pop, resume caller
//!                       → Finish   → pop, return snapshot
//! ```
//!
//! Recursion therefore suspends mid-call without a thread or a coroutine,
//! and abandoning a sequence is just dropping it.

pub mod errors;
pub mod workspace;

use crate::algorithms::AlgorithmId;
use crate::snapshot::Snapshot;
use errors::SortError;
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, info, trace, warn};
use workspace::Workspace;

/// Widest count table counting sort will allocate
pub const MAX_COUNT_RANGE: usize = 1 << 20;

/// What a frame asks the sequence to do after being resumed
pub(crate) enum Flow {
    /// Hand a snapshot to the consumer; the frame is resumed next time
    Emit(Snapshot),
    /// Push a child frame and resume it immediately
    Call(Box<dyn Frame>),
    /// Pop this frame without emitting
    Return,
    /// Pop this frame and hand over its last snapshot
    Finish(Snapshot),
}

/// One resumable activation record
pub(crate) trait Frame: Send {
    fn resume(&mut self, ws: &mut Workspace) -> Flow;
}

/// Lazy, finite sequence of snapshots for one (algorithm, input) pair
pub struct SnapshotSequence {
    algorithm: AlgorithmId,
    workspace: Workspace,
    stack: Vec<Box<dyn Frame>>,
    emitted: usize,
}

impl SnapshotSequence {
    fn new(algorithm: AlgorithmId, input: Vec<i64>, seed: u64) -> Self {
        let workspace = Workspace::new(input, seed);
        let root = algorithm.root_frame(&workspace);

        debug!(
            algorithm = %algorithm,
            len = workspace.len(),
            "starting run"
        );

        SnapshotSequence {
            algorithm,
            workspace,
            stack: vec![root],
            emitted: 0,
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Number of snapshots produced so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Current depth of the control stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    fn record(&mut self, snapshot: &Snapshot) {
        self.emitted += 1;
        trace!(
            algorithm = %self.algorithm,
            step = self.emitted,
            kind = ?snapshot.kind(),
            depth = self.stack.len(),
            "emit"
        );
    }

    fn report_completion(&self, last: &Snapshot) {
        if last.sorted_indices.len() == last.array.len() {
            info!(
                algorithm = %self.algorithm,
                steps = self.emitted,
                "run complete"
            );
        } else {
            warn!(
                algorithm = %self.algorithm,
                steps = self.emitted,
                "run ended without sorting: {}",
                last.description()
            );
        }
    }
}

impl Iterator for SnapshotSequence {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.resume(&mut self.workspace) {
                Flow::Emit(snapshot) => {
                    self.record(&snapshot);
                    return Some(snapshot);
                }
                Flow::Call(child) => self.stack.push(child),
                Flow::Return => {
                    self.stack.pop();
                }
                Flow::Finish(snapshot) => {
                    self.stack.pop();
                    self.record(&snapshot);
                    if self.stack.is_empty() {
                        self.report_completion(&snapshot);
                    }
                    return Some(snapshot);
                }
            }
        }
    }
}

impl FusedIterator for SnapshotSequence {}

impl fmt::Debug for SnapshotSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotSequence")
            .field("algorithm", &self.algorithm)
            .field("len", &self.workspace.len())
            .field("emitted", &self.emitted)
            .field("depth", &self.stack.len())
            .finish()
    }
}

/// Start a run, seeding the randomness source from entropy
pub fn run(algorithm: AlgorithmId, input: &[i64]) -> Result<SnapshotSequence, SortError> {
    run_seeded(algorithm, input, rand::random())
}

/// Start a run with a fixed seed, making every algorithm replayable
pub fn run_seeded(
    algorithm: AlgorithmId,
    input: &[i64],
    seed: u64,
) -> Result<SnapshotSequence, SortError> {
    validate(algorithm, input)?;
    Ok(SnapshotSequence::new(algorithm, input.to_vec(), seed))
}

/// Reject inputs an algorithm cannot sort before any state exists
pub fn validate(algorithm: AlgorithmId, input: &[i64]) -> Result<(), SortError> {
    if !algorithm.supports_negatives() {
        if let Some((index, &value)) = input.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(SortError::NegativeValue {
                algorithm: algorithm.name(),
                value,
                index,
            });
        }
    }

    if algorithm == AlgorithmId::Counting {
        if let (Some(&min), Some(&max)) = (input.iter().min(), input.iter().max()) {
            let slots = (max as i128 - min as i128 + 1) as u128;
            if slots > MAX_COUNT_RANGE as u128 {
                return Err(SortError::RangeTooLarge {
                    min,
                    max,
                    slots,
                    limit: MAX_COUNT_RANGE,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_values_rejected_for_distribution_sorts() {
        let err = run(AlgorithmId::Radix, &[3, -1]).unwrap_err();
        assert_eq!(
            err,
            SortError::NegativeValue {
                algorithm: "Radix Sort",
                value: -1,
                index: 1
            }
        );
        assert!(run(AlgorithmId::Bubble, &[3, -1]).is_ok());
        assert!(run(AlgorithmId::Counting, &[3, -1]).is_ok());
    }

    #[test]
    fn test_counting_range_limit() {
        let err = run(AlgorithmId::Counting, &[i64::MIN, i64::MAX]).unwrap_err();
        assert!(matches!(err, SortError::RangeTooLarge { .. }));
    }

    #[test]
    fn test_sequence_is_fused() {
        let mut seq = run(AlgorithmId::Quick, &[2, 1]).unwrap();
        while seq.next().is_some() {}
        assert!(seq.is_finished());
        assert_eq!(seq.depth(), 0);
        assert!(seq.next().is_none());
    }
}
