//! Pull-driven playback over a snapshot sequence
//!
//! The [`Player`] is the consumer side of the engine: it pulls one snapshot
//! per tick, remembers what it has seen so the user can step backward, and
//! reports when the run is over. Replaying a step already in history never
//! touches the sequence again.

use crate::algorithms::AlgorithmId;
use crate::engine::errors::SortError;
use crate::engine::{run_seeded, SnapshotSequence};
use crate::snapshot::{Snapshot, SnapshotHistory};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Default byte budget for replay history (256 MiB)
pub const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;

/// Default number of elements in a generated input
pub const DEFAULT_ARRAY_SIZE: usize = 20;

/// Default delay between automatic steps, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 50;

/// Lowest and highest tone for the audio collaborator, in Hz
pub const MIN_TONE_HZ: f64 = 120.0;
pub const MAX_TONE_HZ: f64 = 1200.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("Already at the last step")]
    AtEnd,

    #[error("Already at the start")]
    AtStart,

    #[error("Replay history is full ({limit} bytes)")]
    HistoryFull { limit: usize },
}

/// Steps through one run, forward and backward
pub struct Player {
    input: Vec<i64>,
    seed: u64,
    sequence: SnapshotSequence,
    history: SnapshotHistory,
    /// Index into `history` of the displayed snapshot, `None` before the first step
    position: Option<usize>,
}

impl Player {
    pub fn new(algorithm: AlgorithmId, input: Vec<i64>, seed: u64) -> Result<Self, SortError> {
        Self::with_history_limit(algorithm, input, seed, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(
        algorithm: AlgorithmId,
        input: Vec<i64>,
        seed: u64,
        limit: usize,
    ) -> Result<Self, SortError> {
        let sequence = run_seeded(algorithm, &input, seed)?;
        Ok(Player {
            input,
            seed,
            sequence,
            history: SnapshotHistory::new(limit),
            position: None,
        })
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.sequence.algorithm()
    }

    pub fn input(&self) -> &[i64] {
        &self.input
    }

    /// The displayed snapshot, `None` while still showing the raw input
    pub fn current(&self) -> Option<&Snapshot> {
        self.position.and_then(|p| self.history.get(p))
    }

    /// The displayed array: the current snapshot's, or the input before any step
    pub fn array(&self) -> &[i64] {
        self.current()
            .map(|s| s.array.as_slice())
            .unwrap_or(&self.input)
    }

    /// Up to `n` snapshots ending at the displayed one, oldest first
    pub fn recent(&self, n: usize) -> Vec<&Snapshot> {
        let end = self.step();
        (end.saturating_sub(n)..end)
            .filter_map(|i| self.history.get(i))
            .collect()
    }

    /// Number of steps taken so far, zero at the start
    pub fn step(&self) -> usize {
        self.position.map_or(0, |p| p + 1)
    }

    /// Steps pulled from the engine so far
    pub fn steps_seen(&self) -> usize {
        self.history.len()
    }

    /// Total number of steps, once the run has been drained
    pub fn total_steps(&self) -> Option<usize> {
        self.sequence.is_finished().then(|| self.history.len())
    }

    pub fn history_usage(&self) -> usize {
        self.history.memory_usage()
    }

    /// True once the last snapshot of a drained run is displayed
    pub fn is_finished(&self) -> bool {
        self.sequence.is_finished() && self.step() == self.history.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.position.is_none()
    }

    pub fn step_forward(&mut self) -> Result<(), PlayerError> {
        let next = self.step();
        if next < self.history.len() {
            self.position = Some(next);
            return Ok(());
        }

        let snapshot = self.sequence.next().ok_or(PlayerError::AtEnd)?;
        self.history
            .push(snapshot)
            .map_err(|_| PlayerError::HistoryFull {
                limit: self.history.memory_limit(),
            })?;
        self.position = Some(next);
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), PlayerError> {
        self.position = match self.position {
            None => return Err(PlayerError::AtStart),
            Some(0) => None,
            Some(p) => Some(p - 1),
        };
        Ok(())
    }

    /// Step forward up to `n` times, returning how many steps were taken
    pub fn step_forward_by(&mut self, n: usize) -> Result<usize, PlayerError> {
        for taken in 0..n {
            match self.step_forward() {
                Ok(()) => {}
                Err(PlayerError::AtEnd) => return Ok(taken),
                Err(e) => return Err(e),
            }
        }
        Ok(n)
    }

    pub fn jump_to_start(&mut self) {
        self.position = None;
    }

    /// Drain the run and display its last snapshot
    pub fn jump_to_end(&mut self) -> Result<(), PlayerError> {
        loop {
            match self.step_forward() {
                Ok(()) => {}
                Err(PlayerError::AtEnd) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Start over from the original input with the same seed
    pub fn reset(&mut self) -> Result<(), SortError> {
        let algorithm = self.algorithm();
        self.sequence = run_seeded(algorithm, &self.input, self.seed)?;
        self.history.clear();
        self.position = None;
        debug!(algorithm = %algorithm, "player reset");
        Ok(())
    }

    /// Tone for the current step, sampled at the first active index
    pub fn current_tone(&self) -> Option<f64> {
        let snapshot = self.current()?;
        let value = snapshot.primary_value()?;
        let max = snapshot.array.iter().copied().max().unwrap_or(0);
        Some(tone_frequency(value, max))
    }
}

/// Map `value` onto [`MIN_TONE_HZ`]..=[`MAX_TONE_HZ`] relative to `max`
pub fn tone_frequency(value: i64, max: i64) -> f64 {
    if max <= 0 {
        return MIN_TONE_HZ;
    }
    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    MIN_TONE_HZ + ratio * (MAX_TONE_HZ - MIN_TONE_HZ)
}

/// Random input of `len` values in `10..=99`
pub fn random_array<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(10..=99)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tone_frequency_bounds() {
        assert_eq!(tone_frequency(0, 100), MIN_TONE_HZ);
        assert_eq!(tone_frequency(100, 100), MAX_TONE_HZ);
        assert_eq!(tone_frequency(50, 100), 660.0);
        assert_eq!(tone_frequency(5, 0), MIN_TONE_HZ);
        assert_eq!(tone_frequency(-3, 10), MIN_TONE_HZ);
    }

    #[test]
    fn test_random_array_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let values = random_array(200, &mut rng);
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (10..=99).contains(v)));
    }

    #[test]
    fn test_step_backward_replays_history() {
        let mut player = Player::new(AlgorithmId::Bubble, vec![3, 1, 2], 0).unwrap();
        assert!(player.is_at_start());
        assert_eq!(player.step_backward(), Err(PlayerError::AtStart));

        player.step_forward().unwrap();
        player.step_forward().unwrap();
        let second = player.current().unwrap().clone();
        player.step_backward().unwrap();
        player.step_forward().unwrap();

        assert_eq!(player.current(), Some(&second));
        assert_eq!(player.steps_seen(), 2);
    }

    #[test]
    fn test_jump_to_end_finishes() {
        let mut player = Player::new(AlgorithmId::Quick, vec![5, 4, 3, 2, 1], 0).unwrap();
        assert_eq!(player.total_steps(), None);
        player.jump_to_end().unwrap();

        assert!(player.is_finished());
        assert_eq!(player.array(), &[1, 2, 3, 4, 5]);
        assert_eq!(player.total_steps(), Some(player.step()));
        assert_eq!(player.step_forward(), Err(PlayerError::AtEnd));
    }

    #[test]
    fn test_reset_restarts_from_input() {
        let mut player = Player::new(AlgorithmId::Heap, vec![2, 9, 4], 0).unwrap();
        player.jump_to_end().unwrap();
        player.reset().unwrap();

        assert!(player.is_at_start());
        assert_eq!(player.array(), &[2, 9, 4]);
        assert_eq!(player.steps_seen(), 0);
    }

    #[test]
    fn test_history_usage_grows_and_resets() {
        let mut player = Player::new(AlgorithmId::Selection, vec![4, 1, 3], 0).unwrap();
        assert_eq!(player.history_usage(), 0);

        player.step_forward().unwrap();
        let after_one = player.history_usage();
        assert!(after_one > 0);
        player.step_forward().unwrap();
        assert!(player.history_usage() > after_one);

        player.reset().unwrap();
        assert_eq!(player.history_usage(), 0);
    }

    #[test]
    fn test_tiny_history_limit_reports_full() {
        let mut player =
            Player::with_history_limit(AlgorithmId::Bubble, vec![4, 3, 2, 1], 0, 1).unwrap();
        assert_eq!(
            player.step_forward(),
            Err(PlayerError::HistoryFull { limit: 1 })
        );
    }
}
