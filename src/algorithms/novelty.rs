//! Bogo sort and a sequential sleep sort

use crate::engine::workspace::Workspace;
use crate::engine::{Flow, Frame};
use crate::snapshot::StepKind;
use rand::Rng;

/// Shuffles bogo sort attempts before giving up
pub const MAX_BOGO_ATTEMPTS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BogoPhase {
    Check,
    Shuffle,
}

/// Shuffle until sorted, capped at [`MAX_BOGO_ATTEMPTS`] full shuffles
pub struct BogoSort {
    attempts: usize,
    /// Fisher-Yates cursor, counting down to 1
    cursor: usize,
    phase: BogoPhase,
}

impl BogoSort {
    pub fn new() -> Self {
        BogoSort {
            attempts: 0,
            cursor: 0,
            phase: BogoPhase::Check,
        }
    }
}

impl Default for BogoSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame for BogoSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        loop {
            match self.phase {
                BogoPhase::Check => {
                    if ws.is_sorted() {
                        return Flow::Finish(ws.finish());
                    }
                    if self.attempts >= MAX_BOGO_ATTEMPTS {
                        // Terminal but not a success: nothing is marked
                        return Flow::Finish(ws.info(
                            Vec::new(),
                            format!("Gave up after {} shuffles", MAX_BOGO_ATTEMPTS),
                        ));
                    }
                    self.attempts += 1;
                    self.cursor = ws.len() - 1;
                    self.phase = BogoPhase::Shuffle;
                }
                BogoPhase::Shuffle => {
                    if self.cursor == 0 {
                        self.phase = BogoPhase::Check;
                        continue;
                    }
                    let i = self.cursor;
                    let j = ws.rng.gen_range(0..=i);
                    ws.swap(i, j);
                    self.cursor -= 1;
                    return Flow::Emit(ws.swapped(i, j));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SleepPhase {
    Tick,
    Scan,
    Move,
}

/// Sleep sort simulated on one thread
///
/// Values wake in order of their value, ties in array order. The clock
/// skips straight to the smallest value still asleep, which wakes the same
/// elements in the same order as ticking through every integer.
pub struct SleepSort {
    clock: i64,
    cursor: usize,
    phase: SleepPhase,
}

impl SleepSort {
    pub fn new() -> Self {
        SleepSort {
            clock: 0,
            cursor: 0,
            phase: SleepPhase::Tick,
        }
    }
}

impl Default for SleepSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame for SleepSort {
    fn resume(&mut self, ws: &mut Workspace) -> Flow {
        let n = ws.len();
        loop {
            let slot = ws.sorted.len();
            match self.phase {
                SleepPhase::Tick => {
                    match ws.array[slot..].iter().copied().min() {
                        Some(next) => self.clock = next,
                        None => return Flow::Finish(ws.finish()),
                    }
                    self.cursor = slot;
                    self.phase = SleepPhase::Scan;
                }
                SleepPhase::Scan => {
                    if self.cursor >= n {
                        self.phase = SleepPhase::Tick;
                        continue;
                    }
                    let i = self.cursor;
                    if ws.at(i) != self.clock {
                        self.cursor += 1;
                        continue;
                    }
                    self.phase = SleepPhase::Move;
                    return Flow::Emit(ws.info(
                        vec![i],
                        format!("{} woke up at t={}", ws.at(i), self.clock),
                    ));
                }
                SleepPhase::Move => {
                    let i = self.cursor;
                    self.cursor += 1;
                    self.phase = SleepPhase::Scan;
                    if i == slot {
                        ws.sorted.insert(slot);
                        continue;
                    }
                    ws.swap(slot, i);
                    let snapshot = ws.snapshot(
                        StepKind::Swap,
                        vec![slot, i],
                        format!("Moved {} into slot {}", ws.at(slot), slot),
                    );
                    ws.sorted.insert(slot);
                    return Flow::Emit(snapshot);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmId;
    use crate::engine::{run, run_seeded};

    #[test]
    fn test_bogo_sorted_input_finishes_immediately() {
        let snaps: Vec<_> = run(AlgorithmId::Bogo, &[1, 2, 3]).unwrap().collect();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].kind(), Some(StepKind::Success));
    }

    #[test]
    fn test_bogo_same_seed_same_shuffles() {
        let input = [4, 1, 3, 2];
        let a: Vec<_> = run_seeded(AlgorithmId::Bogo, &input, 7).unwrap().collect();
        let b: Vec<_> = run_seeded(AlgorithmId::Bogo, &input, 7).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bogo_gives_up_unmarked() {
        // 12 distinct values: 500 shuffles virtually never land on sorted
        let input: Vec<i64> = (0..12).rev().collect();
        let last = run_seeded(AlgorithmId::Bogo, &input, 1).unwrap().last().unwrap();
        if last.kind() == Some(StepKind::Info) {
            assert_eq!(last.description(), "Gave up after 500 shuffles");
            assert!(last.sorted_indices.is_empty());
        } else {
            assert_eq!(last.kind(), Some(StepKind::Success));
        }
    }

    #[test]
    fn test_sleep_wakes_duplicates_in_array_order() {
        let snaps: Vec<_> = run(AlgorithmId::Sleep, &[3, 1, 2, 1]).unwrap().collect();
        let wakes: Vec<_> = snaps
            .iter()
            .filter(|s| s.description().contains("woke up"))
            .map(|s| s.description().to_string())
            .collect();
        assert_eq!(
            wakes,
            vec![
                "1 woke up at t=1",
                "1 woke up at t=1",
                "2 woke up at t=2",
                "3 woke up at t=3",
            ]
        );
        assert_eq!(snaps.last().unwrap().array, vec![1, 1, 2, 3]);
    }
}
