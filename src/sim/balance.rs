//! Balance scale model
//!
//! Weight on the pot plate against a fixed counterweight. The weight
//! difference maps to a clamped target angle, the visible beam angle chases
//! it with exponential smoothing, and both plates ride rigidly on the
//! rotating beam at their captured distance from the pivot.
//!
//! Sign convention: the pot hangs on the -X side of the pivot; a heavier pot
//! yields a positive beam angle, which lowers the pot plate. The
//! `invert_rotation` config flag flips it for mirrored scene layouts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::events::PuzzleEvent;
use super::ledger::WeightLedger;
use crate::config::{BalanceConfig, ConfigError, TriggerMode};
use crate::consts::NORMALIZER_EPSILON;

/// Per-tick pose consumed by the host's transform driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePose {
    /// Beam deflection in degrees, positive lowers the pot plate
    pub beam_angle_degrees: f32,
    /// Pot plate offset in the pivot's local frame
    pub left_plate_offset: Vec3,
    /// Counterweight plate offset in the pivot's local frame
    pub right_plate_offset: Vec3,
}

/// Equilibrium and tilt state of the scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceModel {
    config: BalanceConfig,
    ledger: WeightLedger,
    target_angle: f32,
    current_angle: f32,
    stable_elapsed: f32,
    is_balanced: bool,
    threshold_armed: bool,
    items_trigger_fired: bool,
}

impl BalanceModel {
    pub fn new(config: BalanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut model = Self {
            config,
            ledger: WeightLedger::new(),
            target_angle: 0.0,
            current_angle: 0.0,
            stable_elapsed: 0.0,
            is_balanced: false,
            threshold_armed: false,
            items_trigger_fired: false,
        };
        model.recompute();
        Ok(model)
    }

    pub fn ledger(&self) -> &WeightLedger {
        &self.ledger
    }

    pub fn is_balanced(&self) -> bool {
        self.is_balanced
    }

    pub fn threshold_armed(&self) -> bool {
        self.threshold_armed
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// Signed weight still needed on the pot to balance the counterweight
    pub fn required_weight(&self) -> f32 {
        self.config.fixed_weight - self.ledger.pot_weight()
    }

    /// Credit an item to the pot and react to the new weight
    pub fn add_weight(&mut self, weight: f32, events: &mut Vec<PuzzleEvent>) {
        self.ledger.add(weight);
        self.recompute();
        self.check_trigger(events);
    }

    /// Remove an item from the pot and react to the new weight
    pub fn remove_weight(&mut self, weight: f32, events: &mut Vec<PuzzleEvent>) {
        self.ledger.remove(weight);
        self.recompute();
        self.check_trigger(events);
    }

    /// Absolute pot weight override (debug/scripting path)
    pub fn set_weight(&mut self, weight: f32, events: &mut Vec<PuzzleEvent>) {
        self.ledger.set_weight(weight);
        self.recompute();
        self.check_trigger(events);
    }

    /// Map the current weight difference to the clamped target angle
    fn recompute(&mut self) {
        let diff = self.ledger.pot_weight() - self.config.fixed_weight;
        let normalizer = self
            .config
            .target_weight
            .max(self.config.fixed_weight)
            .max(NORMALIZER_EPSILON);
        let norm = (diff / normalizer).clamp(-1.0, 1.0);
        self.target_angle = norm * self.config.max_angle;
        if self.config.invert_rotation {
            self.target_angle = -self.target_angle;
        }
        log::debug!(
            "pot {:.2}kg vs fixed {:.2}kg -> target angle {:.1} deg",
            self.ledger.pot_weight(),
            self.config.fixed_weight,
            self.target_angle
        );
    }

    /// Advance the smoothed beam angle and derive the plate pose.
    ///
    /// The smoothing factor `smoothing_rate * dt` is clamped to [0, 1] so
    /// the angle converges without overshoot at any frame rate.
    pub fn tick(&mut self, dt: f32) -> BalancePose {
        let alpha = (self.config.smoothing_rate * dt).clamp(0.0, 1.0);
        self.current_angle += (self.target_angle - self.current_angle) * alpha;

        // Plates stay rigidly attached to the beam at their captured radius
        let angle_rad = self.current_angle.to_radians();
        let (sin, cos) = angle_rad.sin_cos();
        let left = self.config.left_plate_distance;
        let right = self.config.right_plate_distance;
        BalancePose {
            beam_angle_degrees: self.current_angle,
            left_plate_offset: Vec3::new(left * cos, left * sin, 0.0),
            right_plate_offset: Vec3::new(right * cos, right * sin, 0.0),
        }
    }

    /// Advance the stability timer and emit equilibrium transitions.
    ///
    /// The timer only counts contiguous in-tolerance time: any excursion
    /// zeroes it, partial holds never carry over.
    pub fn check_equilibrium(&mut self, dt: f32, events: &mut Vec<PuzzleEvent>) {
        let weight_diff = (self.ledger.pot_weight() - self.config.fixed_weight).abs();
        if weight_diff <= self.config.equilibrium_tolerance {
            self.stable_elapsed += dt;
            if self.stable_elapsed >= self.config.stability_window && !self.is_balanced {
                self.is_balanced = true;
                log::info!("balance achieved after {:.2}s hold", self.stable_elapsed);
                events.push(PuzzleEvent::BalanceAchieved);
            }
        } else {
            self.stable_elapsed = 0.0;
            if self.is_balanced {
                self.is_balanced = false;
                log::info!("balance lost ({:.2}kg off)", weight_diff);
                events.push(PuzzleEvent::BalanceLost);
            }
        }
    }

    /// Evaluate the auxiliary trigger after a weight change
    fn check_trigger(&mut self, events: &mut Vec<PuzzleEvent>) {
        match self.config.trigger {
            TriggerMode::Weight { trigger_weight } => {
                let reached = self.ledger.pot_weight() >= trigger_weight;
                if reached && !self.threshold_armed {
                    self.threshold_armed = true;
                    log::info!(
                        "weight threshold reached: {:.1}kg >= {:.1}kg",
                        self.ledger.pot_weight(),
                        trigger_weight
                    );
                    events.push(PuzzleEvent::WeightThresholdReached);
                } else if !reached && self.threshold_armed {
                    self.threshold_armed = false;
                    log::info!(
                        "weight threshold lost: {:.1}kg < {:.1}kg",
                        self.ledger.pot_weight(),
                        trigger_weight
                    );
                    events.push(PuzzleEvent::WeightThresholdLost);
                }
            }
            TriggerMode::ItemCount { required } => {
                if !self.items_trigger_fired && self.ledger.item_count() >= required {
                    self.items_trigger_fired = true;
                    log::info!("{} items reached, opening the door", required);
                    events.push(PuzzleEvent::RequiredItemsReached);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model() -> BalanceModel {
        BalanceModel::new(BalanceConfig::default()).unwrap()
    }

    #[test]
    fn test_target_angle_scenario() {
        // fixed 3, target 5, max 30
        let mut m = model();
        let mut events = Vec::new();

        m.add_weight(3.0, &mut events);
        assert_eq!(m.target_angle(), 0.0);

        m.add_weight(1.5, &mut events);
        // diff 1.5, norm 0.3 -> 9 degrees, pot side down
        assert!((m.target_angle() - 9.0).abs() < 1e-4);

        m.remove_weight(4.5, &mut events);
        // pot clamps to 0, diff -3, norm -0.6 -> -18 degrees
        assert!((m.target_angle() + 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_required_weight_tracks_the_pot() {
        let mut m = model();
        let mut events = Vec::new();
        assert_eq!(m.required_weight(), 3.0);
        m.add_weight(1.0, &mut events);
        assert_eq!(m.required_weight(), 2.0);
        m.add_weight(4.0, &mut events);
        assert_eq!(m.required_weight(), -2.0);
    }

    #[test]
    fn test_invert_rotation_flips_sign() {
        let config = BalanceConfig {
            invert_rotation: true,
            ..Default::default()
        };
        let mut m = BalanceModel::new(config).unwrap();
        let mut events = Vec::new();
        m.add_weight(4.5, &mut events);
        assert!((m.target_angle() + 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_weights_do_not_divide_by_zero() {
        let config = BalanceConfig {
            fixed_weight: 0.0,
            target_weight: 0.0,
            ..Default::default()
        };
        let mut m = BalanceModel::new(config).unwrap();
        let mut events = Vec::new();
        m.add_weight(0.0, &mut events);
        assert!(m.target_angle().is_finite());
        assert_eq!(m.target_angle(), 0.0);
    }

    #[test]
    fn test_equilibrium_requires_full_window() {
        let mut m = model();
        let mut events = Vec::new();
        m.add_weight(3.0, &mut events);

        // 1.9s of hold: not yet balanced
        for _ in 0..19 {
            m.check_equilibrium(0.1, &mut events);
        }
        assert!(!m.is_balanced());
        assert!(events.is_empty());

        // crossing 2.0s fires exactly once
        m.check_equilibrium(0.1, &mut events);
        assert!(m.is_balanced());
        assert_eq!(events, vec![PuzzleEvent::BalanceAchieved]);

        // holding longer does not re-fire
        events.clear();
        for _ in 0..50 {
            m.check_equilibrium(0.1, &mut events);
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_excursion_resets_stability_timer() {
        let mut m = model();
        let mut events = Vec::new();
        m.add_weight(3.0, &mut events);

        for _ in 0..19 {
            m.check_equilibrium(0.1, &mut events);
        }
        // knock it out of tolerance for one tick
        m.add_weight(1.0, &mut events);
        m.check_equilibrium(0.1, &mut events);
        m.remove_weight(1.0, &mut events);

        // the 1.9s hold must not carry over
        for _ in 0..19 {
            m.check_equilibrium(0.1, &mut events);
        }
        assert!(!m.is_balanced());
        m.check_equilibrium(0.1, &mut events);
        assert!(m.is_balanced());
    }

    #[test]
    fn test_balance_lost_on_single_excursion_tick() {
        let mut m = model();
        let mut events = Vec::new();
        m.add_weight(3.0, &mut events);
        for _ in 0..20 {
            m.check_equilibrium(0.1, &mut events);
        }
        assert!(m.is_balanced());

        events.clear();
        m.add_weight(2.0, &mut events);
        m.check_equilibrium(0.1, &mut events);
        assert!(!m.is_balanced());
        assert!(events.contains(&PuzzleEvent::BalanceLost));
    }

    #[test]
    fn test_weight_threshold_hysteresis() {
        let mut m = model();
        let mut events = Vec::new();

        // default trigger weight 1.5
        m.add_weight(1.0, &mut events);
        assert!(events.is_empty());

        m.add_weight(0.5, &mut events);
        assert_eq!(events, vec![PuzzleEvent::WeightThresholdReached]);
        events.clear();

        // staying above the threshold stays silent
        m.add_weight(1.0, &mut events);
        assert!(events.is_empty());

        m.remove_weight(2.0, &mut events);
        assert_eq!(events, vec![PuzzleEvent::WeightThresholdLost]);
    }

    #[test]
    fn test_item_count_trigger_fires_once() {
        let config = BalanceConfig {
            trigger: TriggerMode::ItemCount { required: 2 },
            ..Default::default()
        };
        let mut m = BalanceModel::new(config).unwrap();
        let mut events = Vec::new();

        m.add_weight(0.5, &mut events);
        assert!(events.is_empty());
        m.add_weight(0.5, &mut events);
        assert_eq!(events, vec![PuzzleEvent::RequiredItemsReached]);

        events.clear();
        m.remove_weight(0.5, &mut events);
        m.add_weight(0.5, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_pose_plates_ride_the_beam() {
        let mut m = model();
        let mut events = Vec::new();
        m.set_weight(8.0, &mut events);
        // converge near the full 30-degree tilt
        let mut pose = m.tick(0.016);
        for _ in 0..2000 {
            pose = m.tick(0.016);
        }
        assert!((pose.beam_angle_degrees - 30.0).abs() < 0.01);

        let angle = pose.beam_angle_degrees.to_radians();
        let expected_left = Vec3::new(-0.5 * angle.cos(), -0.5 * angle.sin(), 0.0);
        assert!((pose.left_plate_offset - expected_left).length() < 1e-5);
        // positive angle lowers the pot plate and raises the counterweight
        assert!(pose.left_plate_offset.y < 0.0);
        assert!(pose.right_plate_offset.y > 0.0);
    }

    proptest! {
        /// Smoothing never overshoots: the distance to the target angle is
        /// non-increasing across ticks for any rate and timestep.
        #[test]
        fn prop_smoothing_never_overshoots(
            pot in 0.0f32..20.0,
            rate in 0.01f32..50.0,
            dt in 0.0001f32..0.5,
            ticks in 1usize..200,
        ) {
            let config = BalanceConfig {
                smoothing_rate: rate,
                ..Default::default()
            };
            let mut m = BalanceModel::new(config).unwrap();
            let mut events = Vec::new();
            m.set_weight(pot, &mut events);

            let mut prev_dist = (m.target_angle() - m.current_angle()).abs();
            for _ in 0..ticks {
                let pose = m.tick(dt);
                let dist = (m.target_angle() - pose.beam_angle_degrees).abs();
                prop_assert!(dist <= prev_dist + 1e-4);
                prop_assert!(pose.beam_angle_degrees.abs() <= m.target_angle().abs() + 1e-3);
                prev_dist = dist;
            }
        }
    }
}
