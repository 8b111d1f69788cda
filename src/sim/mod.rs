//! Deterministic puzzle simulation
//!
//! All gameplay decision logic lives here. This module must be pure and
//! deterministic:
//! - Driven by a single-threaded per-frame `tick(dt)`
//! - No engine, rendering or platform dependencies
//! - Events are queued, never delivered re-entrantly
//! - The only internal timers are the stability accumulator and the
//!   smoothed beam angle, both advanced once per tick

pub mod balance;
pub mod events;
pub mod ledger;
pub mod pedestal;
pub mod scene;
pub mod sequence;

pub use balance::{BalanceModel, BalancePose};
pub use events::{PuzzleEvent, PuzzleHooks};
pub use ledger::WeightLedger;
pub use pedestal::{Occupant, Slot, SlotRegistry};
pub use scene::EscapeScene;
pub use sequence::{SequenceState, SequenceVerifier};
