//! Scene driver
//!
//! Owns the three puzzle cores and exposes the narrow surface the host
//! engine talks to: trigger-detector inbound calls, a per-frame `tick(dt)`
//! returning the balance pose, and observer dispatch of queued events.
//!
//! Events queue up during inbound calls and are handed to observers only
//! when the host asks, so a handler never runs inside the call that caused
//! the transition and never sees the same transition twice.

use super::balance::{BalanceModel, BalancePose};
use super::events::{PuzzleEvent, PuzzleHooks};
use super::pedestal::{Occupant, SlotRegistry};
use super::sequence::SequenceVerifier;
use crate::config::{ConfigError, SceneConfig};

/// One escape-room scene: balance scale, plate sequence, pedestals
#[derive(Debug, Clone)]
pub struct EscapeScene {
    config: SceneConfig,
    balance: BalanceModel,
    sequence: SequenceVerifier,
    pedestals: SlotRegistry,
    events: Vec<PuzzleEvent>,
}

impl EscapeScene {
    /// Build a scene from a validated configuration
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            balance: BalanceModel::new(config.balance.clone())?,
            sequence: SequenceVerifier::new(config.sequence.clone())?,
            pedestals: SlotRegistry::new(config.pedestals.clone())?,
            config,
            events: Vec::new(),
        })
    }

    pub fn balance(&self) -> &BalanceModel {
        &self.balance
    }

    pub fn sequence(&self) -> &SequenceVerifier {
        &self.sequence
    }

    pub fn pedestals(&self) -> &SlotRegistry {
        &self.pedestals
    }

    // --- inbound: item triggers around the pot ---

    pub fn add_weight(&mut self, weight: f32) {
        self.balance.add_weight(weight, &mut self.events);
    }

    pub fn remove_weight(&mut self, weight: f32) {
        self.balance.remove_weight(weight, &mut self.events);
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.balance.set_weight(weight, &mut self.events);
    }

    // --- inbound: pressure plates ---

    pub fn press_plate(&mut self, index: u32) {
        self.sequence.press(index, &mut self.events);
    }

    // --- inbound: pedestal triggers ---

    /// Returns the evicted occupant if the slot was already taken
    pub fn place_item(&mut self, slot: usize, occupant: Occupant) -> Option<Occupant> {
        self.pedestals.place(slot, occupant, &mut self.events)
    }

    pub fn remove_item(&mut self, slot: usize) -> Option<Occupant> {
        self.pedestals.remove(slot, &mut self.events)
    }

    /// Advance the simulation by one frame. `dt` is seconds, always > 0.
    /// Returns the beam/plate pose for the transform driver.
    pub fn tick(&mut self, dt: f32) -> BalancePose {
        let pose = self.balance.tick(dt);
        self.balance.check_equilibrium(dt, &mut self.events);
        self.pedestals.poll_completion(&mut self.events);
        pose
    }

    /// Restart the plate sequence puzzle. Call between ticks, never from an
    /// event handler.
    pub fn reset_sequence(&mut self) {
        self.sequence.reset();
    }

    /// Re-initialize everything, as on scene reload. Pending events are
    /// discarded with the rest of the state.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain queued events into observer callbacks
    pub fn dispatch(&mut self, hooks: &mut dyn PuzzleHooks) {
        for event in self.drain_events() {
            event.dispatch(hooks);
        }
    }
}
