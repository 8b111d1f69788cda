//! Balance Escape - core puzzle logic for a VR escape room scene
//!
//! Core modules:
//! - `sim`: Deterministic puzzle simulation (balance scale, pressure-plate
//!   sequence, pedestal matching)
//! - `config`: Scene configuration supplied by the host
//!
//! The host engine owns rendering, physics, XR input and audio. It feeds
//! trigger events into the simulation and drives it with a per-frame
//! `tick(dt)`; the simulation answers with a beam/plate pose and puzzle
//! events.

pub mod config;
pub mod sim;

pub use config::{
    BalanceConfig, ConfigError, PedestalConfig, SceneConfig, SequenceConfig, TriggerMode,
};
pub use sim::{BalancePose, EscapeScene, PuzzleEvent, PuzzleHooks};

/// Puzzle tuning constants
pub mod consts {
    /// Fixed simulation timestep the demo binary runs at (90 Hz, a typical XR frame rate)
    pub const SIM_DT: f32 = 1.0 / 90.0;

    /// Floor for the tilt normalizer, keeps `diff / normalizer` finite when
    /// both configured weights are zero
    pub const NORMALIZER_EPSILON: f32 = 1e-4;

    /// Balance defaults
    pub const DEFAULT_FIXED_WEIGHT: f32 = 3.0;
    pub const DEFAULT_TARGET_WEIGHT: f32 = 5.0;
    pub const DEFAULT_MAX_ANGLE: f32 = 30.0;
    pub const DEFAULT_SMOOTHING_RATE: f32 = 2.0;
    pub const DEFAULT_EQUILIBRIUM_TOLERANCE: f32 = 0.1;
    pub const DEFAULT_STABILITY_WINDOW: f32 = 2.0;
    pub const DEFAULT_TRIGGER_WEIGHT: f32 = 1.5;

    /// Plate distances along the beam's local X axis (pot side negative)
    pub const DEFAULT_LEFT_PLATE_DISTANCE: f32 = -0.5;
    pub const DEFAULT_RIGHT_PLATE_DISTANCE: f32 = 0.5;

    /// Mismatches tolerated before the sequence puzzle locks out
    pub const DEFAULT_MAX_SEQUENCE_ERRORS: u32 = 3;
}
