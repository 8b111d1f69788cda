//! Pot weight ledger
//!
//! Tracks the scalar weight currently credited to the pot and how many
//! discrete items contributed it. All inputs are sanitized by clamping;
//! nothing here fails.

use serde::{Deserialize, Serialize};

/// Weight and item count currently in the pot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightLedger {
    pot_weight: f32,
    item_count: u32,
}

impl WeightLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pot_weight(&self) -> f32 {
        self.pot_weight
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Credit one item's weight to the pot. Negative weights clamp to zero
    /// but still count as an item.
    pub fn add(&mut self, weight: f32) {
        self.pot_weight += weight.max(0.0);
        self.item_count += 1;
        log::debug!(
            "pot +{:.2}kg -> {:.2}kg ({} items)",
            weight.max(0.0),
            self.pot_weight,
            self.item_count
        );
    }

    /// Remove one item's weight. Removing more than is present clamps
    /// silently; both fields floor at zero.
    pub fn remove(&mut self, weight: f32) {
        self.pot_weight = (self.pot_weight - weight.max(0.0)).max(0.0);
        self.item_count = self.item_count.saturating_sub(1);
        log::debug!(
            "pot -{:.2}kg -> {:.2}kg ({} items)",
            weight.max(0.0),
            self.pot_weight,
            self.item_count
        );
    }

    /// Absolute override of the pot weight, clamped to >= 0. Does not touch
    /// the item count.
    pub fn set_weight(&mut self, weight: f32) {
        self.pot_weight = weight.max(0.0);
    }
}
