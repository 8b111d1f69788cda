//! Puzzle events and the observer surface
//!
//! Components push events into a queue as transitions happen; the scene
//! drains the queue into observer callbacks after the emitting call returns.
//! Each logical transition produces exactly one event.

use serde::{Deserialize, Serialize};

/// A gameplay transition the host may react to (animations, audio, doors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleEvent {
    /// Weight difference held within tolerance for the full stability window
    BalanceAchieved,
    /// Tolerance breached while balanced
    BalanceLost,
    /// Pot weight crossed the trigger threshold upward
    WeightThresholdReached,
    /// Pot weight fell back under the trigger threshold
    WeightThresholdLost,
    /// Item count reached the configured requirement (item-count trigger mode)
    RequiredItemsReached,
    /// A press broke the expected sequence; `error_index` counts mismatches
    /// so far and selects the tiered failure animation
    SequenceMismatch { error_index: u32 },
    /// The full expected sequence was pressed in order
    SequenceSolved,
    /// Mismatches exceeded the configured maximum
    GameOver,
    /// An item landed on a pedestal slot
    ItemPlaced { slot: usize, correct: bool },
    /// A pedestal slot was vacated
    SlotCleared { slot: usize },
    /// Every pedestal slot held its expected item at once (fires once per scene)
    PuzzleCompleted,
}

/// Observer interface for external collaborators. All hooks default to
/// no-ops so a host implements only what it presents.
pub trait PuzzleHooks {
    fn on_balance_achieved(&mut self) {}
    fn on_balance_lost(&mut self) {}
    fn on_weight_threshold_reached(&mut self) {}
    fn on_weight_threshold_lost(&mut self) {}
    fn on_required_items_reached(&mut self) {}
    fn on_sequence_mismatch(&mut self, _error_index: u32) {}
    fn on_sequence_solved(&mut self) {}
    fn on_game_over(&mut self) {}
    fn on_item_placed(&mut self, _slot: usize, _correct: bool) {}
    fn on_slot_cleared(&mut self, _slot: usize) {}
    fn on_puzzle_completed(&mut self) {}
}

impl PuzzleEvent {
    /// Route this event to the matching observer hook
    pub fn dispatch(self, hooks: &mut dyn PuzzleHooks) {
        match self {
            PuzzleEvent::BalanceAchieved => hooks.on_balance_achieved(),
            PuzzleEvent::BalanceLost => hooks.on_balance_lost(),
            PuzzleEvent::WeightThresholdReached => hooks.on_weight_threshold_reached(),
            PuzzleEvent::WeightThresholdLost => hooks.on_weight_threshold_lost(),
            PuzzleEvent::RequiredItemsReached => hooks.on_required_items_reached(),
            PuzzleEvent::SequenceMismatch { error_index } => {
                hooks.on_sequence_mismatch(error_index)
            }
            PuzzleEvent::SequenceSolved => hooks.on_sequence_solved(),
            PuzzleEvent::GameOver => hooks.on_game_over(),
            PuzzleEvent::ItemPlaced { slot, correct } => hooks.on_item_placed(slot, correct),
            PuzzleEvent::SlotCleared { slot } => hooks.on_slot_cleared(slot),
            PuzzleEvent::PuzzleCompleted => hooks.on_puzzle_completed(),
        }
    }
}
