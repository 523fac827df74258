//! Per-cycle data the navigator decides on.
//!
//! [`SensorFrame`] is sampled fresh at every decision point and never cached
//! across cycles.  [`NavigationState`] is the orchestrator's only mutable
//! state: the current phase plus the most recent frame.

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::config::NavConfig;

// ---------------------------------------------------------------------------
// Floor classification
// ---------------------------------------------------------------------------

/// Surface colour reported by the downward-facing colour sensor.
///
/// Discriminants match the sensor's raw colour codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FloorClass {
    #[default]
    NoColor = 0,
    Black = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Red = 5,
    White = 6,
    Brown = 7,
}

impl FloorClass {
    /// Map a raw colour code to a class.  Unknown codes read as `NoColor`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Black,
            2 => Self::Blue,
            3 => Self::Green,
            4 => Self::Yellow,
            5 => Self::Red,
            6 => Self::White,
            7 => Self::Brown,
            _ => Self::NoColor,
        }
    }

    /// Raw colour code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Sensor frame
// ---------------------------------------------------------------------------

/// A point-in-time sample of the three navigation sensors.
///
/// Fields are read one after another, so they may be skewed by a few
/// milliseconds; nothing here assumes an atomic snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorFrame {
    /// Forward range, in the configured distance unit.
    pub distance: f32,
    /// Floor surface under the robot.
    pub floor: FloorClass,
    /// Degrees rotated since the last heading reset (clockwise positive).
    pub heading_deg: i32,
}

impl SensorFrame {
    /// True if the robot may start a straight segment from here.
    pub fn is_clear(&self, config: &NavConfig) -> bool {
        self.distance.is_finite()
            && self.distance >= config.stop_distance
            && self.floor != config.boundary_floor
    }

    /// True if a probe landed facing an obstacle or the boundary.
    ///
    /// A non-finite range reading counts as blocked.
    pub fn is_blocked(&self, config: &NavConfig) -> bool {
        !self.distance.is_finite()
            || self.distance <= config.stop_distance
            || self.floor == config.boundary_floor
    }
}

// ---------------------------------------------------------------------------
// Navigation state
// ---------------------------------------------------------------------------

/// Orchestrator state: created at start, mutated once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub phase: Phase,
    /// Most recent frame the navigator decided on.
    pub last_frame: SensorFrame,
    /// Number of `Driving` cycles executed.
    pub cycles: u64,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Driving,
            last_frame: SensorFrame::default(),
            cycles: 0,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
