//! Navigation configuration parameters
//!
//! All tunable parameters for the Wanderbot controller.  Fixed at start-up:
//! defaults below, optionally overridden from a JSON document.  Validation
//! rejects out-of-range values instead of clamping them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fsm::context::FloorClass;

/// Unit the range sensor reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    Centimeters,
    Inches,
}

impl DistanceUnit {
    /// Convert a distance in centimetres into this unit.
    pub fn from_cm(self, cm: f32) -> f32 {
        match self {
            Self::Centimeters => cm,
            Self::Inches => cm / 2.54,
        }
    }
}

/// Core navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    // --- Motion ---
    /// Forward and turn actuation magnitude (1-100%)
    pub cruise_speed: i8,
    /// Right-wheel scale during straight travel, compensates motor skew
    pub drift_ratio: f32,

    // --- Detection ---
    /// Obstacle proximity threshold, in `distance_unit`
    pub stop_distance: f32,
    /// Unit the range sensor reports in
    pub distance_unit: DistanceUnit,
    /// Floor class marking the edge of the track
    pub boundary_floor: FloorClass,

    // --- Turns (under-shot to absorb sensor and actuation lag) ---
    /// Target for the 90° probes, degrees
    pub quarter_turn_deg: i32,
    /// Target for the 180° probe, degrees
    pub about_turn_deg: i32,

    // --- Back-up ---
    /// Reverse magnitude while backing up (1-100%)
    pub backup_speed: i8,
    /// How long the reverse command is held (milliseconds)
    pub backup_duration_ms: u32,

    // --- Settle pauses (milliseconds) ---
    pub evade_stop_ms: u32,
    pub backup_settle_ms: u32,
    pub probe_settle_ms: u32,
    pub final_stop_ms: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            // Motion
            cruise_speed: 25,
            drift_ratio: 0.95,

            // Detection
            stop_distance: 15.0,
            distance_unit: DistanceUnit::Centimeters,
            boundary_floor: FloorClass::Red,

            // Turns: nominally 90 and 180
            quarter_turn_deg: 84,
            about_turn_deg: 174,

            // Back-up
            backup_speed: 5,
            backup_duration_ms: 2000,

            // Settle pauses
            evade_stop_ms: 1000,
            backup_settle_ms: 500,
            probe_settle_ms: 500,
            final_stop_ms: 1000,
        }
    }
}

impl NavConfig {
    /// Check every field against its physical range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.stop_distance.is_finite() || self.stop_distance <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "stop_distance must be positive",
            ));
        }
        if !(1..=100).contains(&self.cruise_speed) {
            return Err(ConfigError::ValidationFailed(
                "cruise_speed must be within 1..=100",
            ));
        }
        if !(self.drift_ratio > 0.0 && self.drift_ratio <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "drift_ratio must be within (0, 1]",
            ));
        }
        if !(1..=100).contains(&self.backup_speed) {
            return Err(ConfigError::ValidationFailed(
                "backup_speed must be within 1..=100",
            ));
        }
        // A target at or past the geometric angle never completes once lag
        // is accounted for.
        if !(1..90).contains(&self.quarter_turn_deg) {
            return Err(ConfigError::ValidationFailed(
                "quarter_turn_deg must be within 1..90",
            ));
        }
        if !(1..180).contains(&self.about_turn_deg) {
            return Err(ConfigError::ValidationFailed(
                "about_turn_deg must be within 1..180",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document (missing fields take defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            line: e.line(),
            column: e.column(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
