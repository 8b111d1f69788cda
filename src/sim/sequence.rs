//! Pressure-plate sequence verifier
//!
//! Validates a stream of plate presses against a fixed expected order. Each
//! press appends to the observed sequence and re-runs a fail-fast prefix
//! check: the scan stops at the first differing position, so a failing press
//! costs exactly one error regardless of how much of the sequence remains.

use serde::{Deserialize, Serialize};

use super::events::PuzzleEvent;
use crate::config::{ConfigError, SequenceConfig};

/// Verifier lifecycle. `Solved` and `LockedOut` are terminal; further
/// presses are no-ops until an external reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceState {
    Active,
    Solved,
    LockedOut,
}

/// Ordered sequence matcher with tiered failure counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceVerifier {
    expected: Vec<u32>,
    max_errors: u32,
    observed: Vec<u32>,
    error_count: u32,
    state: SequenceState,
}

impl SequenceVerifier {
    pub fn new(config: SequenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            expected: config.expected,
            max_errors: config.max_errors,
            observed: Vec::new(),
            error_count: 0,
            state: SequenceState::Active,
        })
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn observed(&self) -> &[u32] {
        &self.observed
    }

    /// Record a plate press and classify the attempt so far
    pub fn press(&mut self, index: u32, events: &mut Vec<PuzzleEvent>) {
        if self.state != SequenceState::Active {
            return;
        }

        self.observed.push(index);

        match self.first_mismatch() {
            Some(position) => {
                self.error_count += 1;
                log::info!(
                    "sequence mismatch at position {} (error {})",
                    position,
                    self.error_count
                );
                if self.error_count > self.max_errors {
                    self.state = SequenceState::LockedOut;
                    log::info!("sequence locked out after {} errors", self.error_count);
                    events.push(PuzzleEvent::GameOver);
                } else {
                    events.push(PuzzleEvent::SequenceMismatch {
                        error_index: self.error_count,
                    });
                }
            }
            None if self.observed.len() == self.expected.len() => {
                self.state = SequenceState::Solved;
                log::info!("sequence solved");
                events.push(PuzzleEvent::SequenceSolved);
            }
            None => {}
        }
    }

    /// Fail-fast prefix check: position of the first observed element that
    /// differs from the expected sequence, if any
    fn first_mismatch(&self) -> Option<usize> {
        self.observed
            .iter()
            .zip(&self.expected)
            .position(|(observed, expected)| observed != expected)
    }

    /// Clear the attempt and return to Active. Applied between ticks when
    /// the owning scene restarts the puzzle.
    pub fn reset(&mut self) {
        self.observed.clear();
        self.error_count = 0;
        self.state = SequenceState::Active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> SequenceVerifier {
        SequenceVerifier::new(SequenceConfig {
            expected: vec![1, 2, 3],
            max_errors: 3,
        })
        .unwrap()
    }

    #[test]
    fn test_exact_sequence_solves() {
        let mut v = verifier();
        let mut events = Vec::new();
        v.press(1, &mut events);
        v.press(2, &mut events);
        assert!(events.is_empty());
        v.press(3, &mut events);
        assert_eq!(events, vec![PuzzleEvent::SequenceSolved]);
        assert_eq!(v.state(), SequenceState::Solved);
        assert_eq!(v.error_count(), 0);
    }

    #[test]
    fn test_mismatch_counts_once_per_press() {
        let mut v = verifier();
        let mut events = Vec::new();
        v.press(1, &mut events);
        v.press(2, &mut events);
        v.press(4, &mut events);
        // deviation at position 2: one event, one error, still active
        assert_eq!(
            events,
            vec![PuzzleEvent::SequenceMismatch { error_index: 1 }]
        );
        assert_eq!(v.error_count(), 1);
        assert_eq!(v.state(), SequenceState::Active);
    }

    #[test]
    fn test_lock_out_after_max_errors_exceeded() {
        let mut v = verifier();
        let mut events = Vec::new();
        // each wrong press past the first keeps failing the prefix check
        for _ in 0..3 {
            v.press(9, &mut events);
        }
        assert_eq!(v.state(), SequenceState::Active);
        assert_eq!(v.error_count(), 3);

        events.clear();
        v.press(9, &mut events);
        assert_eq!(events, vec![PuzzleEvent::GameOver]);
        assert_eq!(v.state(), SequenceState::LockedOut);
    }

    #[test]
    fn test_terminal_states_ignore_presses() {
        let mut v = verifier();
        let mut events = Vec::new();
        for _ in 0..4 {
            v.press(9, &mut events);
        }
        assert_eq!(v.state(), SequenceState::LockedOut);

        let observed_len = v.observed().len();
        events.clear();
        v.press(1, &mut events);
        assert!(events.is_empty());
        assert_eq!(v.observed().len(), observed_len);
        assert_eq!(v.state(), SequenceState::LockedOut);
    }

    #[test]
    fn test_solved_ignores_presses() {
        let mut v = verifier();
        let mut events = Vec::new();
        v.press(1, &mut events);
        v.press(2, &mut events);
        v.press(3, &mut events);

        events.clear();
        v.press(1, &mut events);
        assert!(events.is_empty());
        assert_eq!(v.observed().len(), 3);
    }

    #[test]
    fn test_reset_restores_active() {
        let mut v = verifier();
        let mut events = Vec::new();
        for _ in 0..4 {
            v.press(9, &mut events);
        }
        v.reset();
        assert_eq!(v.state(), SequenceState::Active);
        assert_eq!(v.error_count(), 0);
        assert!(v.observed().is_empty());

        events.clear();
        v.press(1, &mut events);
        v.press(2, &mut events);
        v.press(3, &mut events);
        assert_eq!(events, vec![PuzzleEvent::SequenceSolved]);
    }

    #[test]
    fn test_tiered_error_indices() {
        let mut v = verifier();
        let mut events = Vec::new();
        v.press(5, &mut events);
        v.press(5, &mut events);
        v.press(5, &mut events);
        assert_eq!(
            events,
            vec![
                PuzzleEvent::SequenceMismatch { error_index: 1 },
                PuzzleEvent::SequenceMismatch { error_index: 2 },
                PuzzleEvent::SequenceMismatch { error_index: 3 },
            ]
        );
    }

    #[test]
    fn test_empty_expected_rejected() {
        let result = SequenceVerifier::new(SequenceConfig {
            expected: vec![],
            max_errors: 3,
        });
        assert!(matches!(result, Err(ConfigError::EmptySequence)));
    }
}
