//! Snapshot values emitted by the sorting engine
//!
//! - [`Snapshot`]: an owned copy of the working array plus the indices the
//!   renderer needs to colour it
//! - [`Metadata`] / [`StepKind`]: narration attached to every snapshot
//! - [`SortedSet`]: insert-only set of finalized indices
//! - [`SnapshotHistory`]: replay buffer with a memory budget, used by the
//!   driver to step backward
//!
//! A snapshot never aliases the engine's live array. Once produced it is a
//! plain value and later steps cannot change it.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;

/// Classification tag attached to every snapshot's narration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Compare,
    Swap,
    Move,
    Info,
    Success,
    Scatter,
    Gather,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Move => "move",
            StepKind::Info => "info",
            StepKind::Success => "success",
            StepKind::Scatter => "scatter",
            StepKind::Gather => "gather",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narration for a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Lower bound of the counted value range (counting sort only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound of the counted value range (counting sort only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl Metadata {
    pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
        Metadata {
            description: description.into(),
            kind,
            min: None,
            max: None,
        }
    }
}

/// One externally visible state of a sort in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub array: Vec<i64>,
    /// First entry is the primary element (the one compared or moved)
    pub active_indices: Vec<usize>,
    pub sorted_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary_array: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Snapshot {
    pub fn new(array: Vec<i64>, active_indices: Vec<usize>, sorted_indices: Vec<usize>) -> Self {
        Snapshot {
            array,
            active_indices,
            sorted_indices,
            pivot_index: None,
            auxiliary_array: None,
            metadata: None,
        }
    }

    pub fn with_pivot(mut self, pivot: usize) -> Self {
        self.pivot_index = Some(pivot);
        self
    }

    pub fn with_auxiliary(mut self, aux: Vec<i64>) -> Self {
        self.auxiliary_array = Some(aux);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach the counted value range to existing metadata
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        if let Some(meta) = self.metadata.as_mut() {
            meta.min = Some(min);
            meta.max = Some(max);
        }
        self
    }

    pub fn kind(&self) -> Option<StepKind> {
        self.metadata.as_ref().map(|m| m.kind)
    }

    pub fn description(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.description.as_str())
            .unwrap_or("")
    }

    /// Value under the primary active index, if any
    pub fn primary_value(&self) -> Option<i64> {
        self.active_indices
            .first()
            .and_then(|&i| self.array.get(i))
            .copied()
    }

    pub fn is_sorted_index(&self, index: usize) -> bool {
        self.sorted_indices.contains(&index)
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let word = std::mem::size_of::<i64>();
        let base = std::mem::size_of::<Snapshot>();
        let vectors = self.array.len() * word
            + (self.active_indices.len() + self.sorted_indices.len()) * std::mem::size_of::<usize>()
            + self.auxiliary_array.as_ref().map_or(0, |a| a.len() * word);
        let narration = self.metadata.as_ref().map_or(0, |m| m.description.len());

        base + vectors + narration
    }
}

/// Insert-only set of finalized indices, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SortedSet {
    order: Vec<usize>,
    members: FxHashSet<usize>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the index was already finalized
    pub fn insert(&mut self, index: usize) -> bool {
        if self.members.insert(index) {
            self.order.push(index);
            true
        } else {
            false
        }
    }

    /// Finalize every index in `low..=high`
    pub fn insert_range(&mut self, low: usize, high: usize) {
        for index in low..=high {
            self.insert(index);
        }
    }

    pub fn extend<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        for index in indices {
            self.insert(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.order.clone()
    }
}

/// Replay buffer of already-pulled snapshots
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotHistory {
    pub fn new(max_memory: usize) -> Self {
        SnapshotHistory {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_set_dedupes_and_keeps_order() {
        let mut set = SortedSet::new();
        assert!(set.insert(4));
        assert!(set.insert(1));
        assert!(!set.insert(4));
        set.insert_range(0, 2);

        assert_eq!(set.as_slice(), &[4, 1, 0, 2]);
        assert_eq!(set.len(), 4);
        assert!(set.contains(2));
        assert!(!set.contains(3));
    }

    #[test]
    fn test_snapshot_serializes_with_collaborator_names() {
        let snapshot = Snapshot::new(vec![3, 1], vec![0, 1], vec![])
            .with_pivot(1)
            .with_metadata(Metadata::new(StepKind::Compare, "Comparing 3 and 1"));
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"activeIndices\":[0,1]"));
        assert!(json.contains("\"pivotIndex\":1"));
        assert!(json.contains("\"type\":\"compare\""));
        assert!(!json.contains("auxiliaryArray"));
        assert!(!json.contains("\"min\""));
    }

    #[test]
    fn test_with_range_requires_metadata() {
        let bare = Snapshot::new(vec![1], vec![], vec![]).with_range(-2, 3);
        assert!(bare.metadata.is_none());

        let tagged = Snapshot::new(vec![1], vec![], vec![])
            .with_metadata(Metadata::new(StepKind::Info, "counts"))
            .with_range(-2, 3);
        let meta = tagged.metadata.unwrap();
        assert_eq!((meta.min, meta.max), (Some(-2), Some(3)));
    }

    #[test]
    fn test_history_respects_memory_limit() {
        let snapshot = Snapshot::new(vec![1, 2, 3], vec![0], vec![]);
        let size = snapshot.estimated_size();
        let mut history = SnapshotHistory::new(size * 2);

        assert!(history.push(snapshot.clone()).is_ok());
        assert!(history.push(snapshot.clone()).is_ok());
        assert!(history.push(snapshot).is_err());
        assert_eq!(history.len(), 2);
        assert_eq!(history.memory_usage(), size * 2);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.memory_usage(), 0);
    }

    #[test]
    fn test_primary_value_reads_first_active_index() {
        let snapshot = Snapshot::new(vec![7, 9], vec![1, 0], vec![]);
        assert_eq!(snapshot.primary_value(), Some(9));
        assert_eq!(Snapshot::new(vec![7], vec![], vec![]).primary_value(), None);
    }
}
