//! Error types for starting a run
//!
//! [`SortError`] covers caller errors only. They are reported by
//! [`run`](crate::engine::run) before any snapshot exists; a started run never
//! fails mid-sequence.

use thiserror::Error;

/// Input rejected before a run is created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// The id does not name one of the catalogued algorithms
    #[error("Unknown algorithm '{id}'")]
    UnknownAlgorithm { id: String },

    /// A distribution or timing sort was given a value below zero
    #[error("{algorithm} only sorts non-negative values, got {value} at index {index}")]
    NegativeValue {
        algorithm: &'static str,
        value: i64,
        index: usize,
    },

    /// The count table for counting sort would be too wide
    #[error("Value range {min}..={max} needs {slots} count slots, limit is {limit}")]
    RangeTooLarge {
        min: i64,
        max: i64,
        slots: u128,
        limit: usize,
    },
}
