//! # Introduction
//!
//! Sortty runs textbook sorting algorithms one externally visible step at a
//! time. Every comparison and every mutation of the array produces a
//! [`Snapshot`]: an owned copy of the array plus the indices being touched,
//! the indices already in their final place and a line of narration. The
//! snapshot sequence is then played forward and backward through a terminal
//! UI built with [ratatui](https://docs.rs/ratatui), or printed headless.
//!
//! ## Pipeline
//!
//! ```text
//! input → validate → root Frame → SnapshotSequence → Player → TUI / stdout
//! ```
//!
//! 1. [`algorithms`] — the eighteen algorithms as resumable frames, plus the
//!    range-scoped routines the hybrid sorts share.
//! 2. [`engine`] — input validation and the explicit control stack that
//!    suspends an algorithm after each snapshot, even mid-recursion.
//! 3. [`snapshot`] — snapshot values, the insert-only finalized set and a
//!    replay history with a memory budget.
//! 4. [`driver`] — pull-based playback with stepping backward, plus the
//!    tone mapping and random input helpers.
//! 5. [`catalog`] — descriptions, complexities and reference code per algorithm.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use sortty::{run, AlgorithmId};
//!
//! let last = run(AlgorithmId::Bubble, &[5, 1, 4, 2, 8]).unwrap().last().unwrap();
//! assert_eq!(last.array, vec![1, 2, 4, 5, 8]);
//! ```

pub mod algorithms;
pub mod catalog;
pub mod driver;
pub mod engine;
pub mod snapshot;
pub mod ui;

pub use algorithms::AlgorithmId;
pub use engine::errors::SortError;
pub use engine::{run, run_seeded, SnapshotSequence};
pub use snapshot::{Metadata, Snapshot, StepKind};
