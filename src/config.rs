//! Scene configuration
//!
//! All tuning for a scene is supplied by the host as static startup
//! parameters, either built in code or deserialized from JSON. Constructors
//! validate the parts that would make a state machine vacuous (empty
//! sequence, empty slot set) and reject non-finite tuning values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Fatal configuration errors, detected at scene construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected plate sequence is empty")]
    EmptySequence,
    #[error("pedestal registry has no slots")]
    NoSlots,
    #[error("invalid tuning value for {0}: must be finite and non-negative")]
    InvalidTuning(&'static str),
    #[error("malformed scene config: {0}")]
    Parse(String),
}

/// What fires the balance's auxiliary trigger (door opener)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Hysteresis latch on total pot weight
    Weight { trigger_weight: f32 },
    /// One-shot on reaching an exact item count
    ItemCount { required: u32 },
}

impl Default for TriggerMode {
    fn default() -> Self {
        TriggerMode::Weight {
            trigger_weight: DEFAULT_TRIGGER_WEIGHT,
        }
    }
}

/// Balance scale tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Counterweight on the fixed (right) plate
    pub fixed_weight: f32,
    /// Normalizer for full tilt; the effective normalizer is
    /// `max(target_weight, fixed_weight)` floored at a small epsilon
    pub target_weight: f32,
    /// Maximum beam deflection in degrees
    pub max_angle: f32,
    /// Exponential smoothing rate toward the target angle, per second
    pub smoothing_rate: f32,
    /// Weight difference tolerated while still counting as in equilibrium
    pub equilibrium_tolerance: f32,
    /// Seconds the tolerance must hold continuously before balanced
    pub stability_window: f32,
    /// Auxiliary trigger (weight threshold or item count)
    pub trigger: TriggerMode,
    /// Flip the beam rotation sign. The default convention: the pot hangs on
    /// the -X side of the pivot and a heavier pot produces a positive angle,
    /// lowering the pot plate.
    pub invert_rotation: bool,
    /// Signed distance of the pot plate along the beam's local X axis
    pub left_plate_distance: f32,
    /// Signed distance of the counterweight plate along the beam's local X axis
    pub right_plate_distance: f32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            fixed_weight: DEFAULT_FIXED_WEIGHT,
            target_weight: DEFAULT_TARGET_WEIGHT,
            max_angle: DEFAULT_MAX_ANGLE,
            smoothing_rate: DEFAULT_SMOOTHING_RATE,
            equilibrium_tolerance: DEFAULT_EQUILIBRIUM_TOLERANCE,
            stability_window: DEFAULT_STABILITY_WINDOW,
            trigger: TriggerMode::default(),
            invert_rotation: false,
            left_plate_distance: DEFAULT_LEFT_PLATE_DISTANCE,
            right_plate_distance: DEFAULT_RIGHT_PLATE_DISTANCE,
        }
    }
}

impl BalanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("fixed_weight", self.fixed_weight),
            ("target_weight", self.target_weight),
            ("max_angle", self.max_angle),
            ("smoothing_rate", self.smoothing_rate),
            ("equilibrium_tolerance", self.equilibrium_tolerance),
            ("stability_window", self.stability_window),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning(name));
            }
        }
        if !self.left_plate_distance.is_finite() || !self.right_plate_distance.is_finite() {
            return Err(ConfigError::InvalidTuning("plate_distance"));
        }
        if let TriggerMode::Weight { trigger_weight } = self.trigger {
            if !trigger_weight.is_finite() || trigger_weight < 0.0 {
                return Err(ConfigError::InvalidTuning("trigger_weight"));
            }
        }
        Ok(())
    }
}

/// Pressure-plate sequence tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Expected plate indices in press order
    pub expected: Vec<u32>,
    /// Mismatches tolerated before lock-out
    pub max_errors: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            expected: vec![1, 2, 3],
            max_errors: DEFAULT_MAX_SEQUENCE_ERRORS,
        }
    }
}

impl SequenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expected.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        Ok(())
    }
}

/// Pedestal matching tuning: one expected item identity per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedestalConfig {
    pub expected_items: Vec<u32>,
}

impl Default for PedestalConfig {
    fn default() -> Self {
        Self {
            expected_items: vec![0, 1, 2],
        }
    }
}

impl PedestalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expected_items.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        Ok(())
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub balance: BalanceConfig,
    pub sequence: SequenceConfig,
    pub pedestals: PedestalConfig,
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.balance.validate()?;
        self.sequence.validate()?;
        self.pedestals.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON scene config supplied by the host
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
