//! Pedestal matching slots
//!
//! Each slot holds at most one occupant and reports whether the occupant's
//! identity matches the one the slot expects. The registry polls all slots
//! once per tick and fires a one-shot completion latch the first time every
//! slot is correct simultaneously.

use serde::{Deserialize, Serialize};

use super::events::PuzzleEvent;
use crate::config::{ConfigError, PedestalConfig};

/// An item sitting on a slot: the host's handle plus its declared identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Opaque host-side object handle
    pub id: u32,
    /// Identity compared against the slot's expected item
    pub identity: u32,
}

/// A single matching location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    expected_identity: u32,
    occupant: Option<Occupant>,
}

impl Slot {
    fn new(expected_identity: u32) -> Self {
        Self {
            expected_identity,
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Correct iff occupied by the expected identity
    pub fn is_correct(&self) -> bool {
        self.occupant
            .is_some_and(|o| o.identity == self.expected_identity)
    }

    /// Place an occupant, evicting any previous one (single occupancy).
    /// Returns the evicted occupant so the host can respawn it.
    fn place(&mut self, occupant: Occupant) -> Option<Occupant> {
        self.occupant.replace(occupant)
    }

    /// Vacate the slot; correctness clears immediately with it
    fn clear(&mut self) -> Option<Occupant> {
        self.occupant.take()
    }
}

/// All pedestal slots plus the aggregate completion latch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
    completed: bool,
}

impl SlotRegistry {
    pub fn new(config: PedestalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            slots: config.expected_items.into_iter().map(Slot::new).collect(),
            completed: false,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Place an item on a slot. Emits a placement event carrying correctness
    /// (drives the host's correct/wrong cue). Out-of-range slot indices are
    /// ignored with a warning; the colliders should never produce them.
    /// Returns the evicted occupant, if the slot was already taken.
    pub fn place(
        &mut self,
        slot: usize,
        occupant: Occupant,
        events: &mut Vec<PuzzleEvent>,
    ) -> Option<Occupant> {
        let Some(target) = self.slots.get_mut(slot) else {
            log::warn!("placement on unknown slot {slot} ignored");
            return None;
        };
        let evicted = target.place(occupant);
        let correct = target.is_correct();
        log::info!(
            "slot {slot}: item {} placed ({})",
            occupant.identity,
            if correct { "correct" } else { "wrong" }
        );
        events.push(PuzzleEvent::ItemPlaced { slot, correct });
        evicted
    }

    /// Remove whatever occupies a slot, clearing its correctness immediately
    pub fn remove(&mut self, slot: usize, events: &mut Vec<PuzzleEvent>) -> Option<Occupant> {
        let Some(target) = self.slots.get_mut(slot) else {
            log::warn!("removal from unknown slot {slot} ignored");
            return None;
        };
        let removed = target.clear();
        if removed.is_some() {
            events.push(PuzzleEvent::SlotCleared { slot });
        }
        removed
    }

    /// Once-per-tick completion poll. Fires `PuzzleCompleted` exactly once
    /// per scene lifetime; after the latch, polls are no-ops even if slots
    /// cycle out of and back into correctness.
    pub fn poll_completion(&mut self, events: &mut Vec<PuzzleEvent>) {
        if self.completed {
            return;
        }
        if self.slots.iter().all(Slot::is_correct) {
            self.completed = true;
            log::info!("all {} pedestals matched", self.slots.len());
            events.push(PuzzleEvent::PuzzleCompleted);
        }
    }
}
