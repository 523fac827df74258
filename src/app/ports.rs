//! Port traits: the hexagonal boundary between navigation logic and the robot.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Navigator (domain)
//! ```
//!
//! Driven adapters (sensors, drive train, stop buttons, event sinks)
//! implement these traits.  The [`Navigator`](super::service::Navigator)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::fsm::context::{FloorClass, SensorFrame};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: range, floor colour, and heading.
///
/// Reads never fail and have no side effects; they may be called as often
/// as needed.  Each read reflects the sensor at its own call time.
pub trait SensorPort {
    /// Forward range in the configured unit (non-negative).
    fn read_distance(&mut self) -> f32;

    /// Floor surface classification.
    fn read_floor(&mut self) -> FloorClass;

    /// Degrees rotated since the last reset, clockwise positive.
    fn read_heading(&mut self) -> i32;

    /// Reset the gyro's raw state (re-calibrate drift reference).
    fn reset_heading_hard(&mut self);

    /// Zero the accumulated angle counter.
    fn reset_heading_angle(&mut self);

    /// Full re-zero: hard reset followed by angle reset.
    fn calibrate_heading(&mut self) {
        self.reset_heading_hard();
        self.reset_heading_angle();
    }

    /// Sample all three sensors in turn.
    fn read_frame(&mut self) -> SensorFrame {
        let distance = self.read_distance();
        let floor = self.read_floor();
        let heading_deg = self.read_heading();
        SensorFrame {
            distance,
            floor,
            heading_deg,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Motion port (driven adapter: domain → drive train)
// ───────────────────────────────────────────────────────────────

/// Signed wheel speeds in percent of full scale.
///
/// Invariant: each speed lies within `-100..=100`; [`MotionCommand::new`]
/// saturates anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionCommand {
    pub left: i8,
    pub right: i8,
}

impl MotionCommand {
    pub const MAX_SPEED: i8 = 100;

    pub const STOP: Self = Self { left: 0, right: 0 };

    pub fn new(left: i32, right: i32) -> Self {
        let max = i32::from(Self::MAX_SPEED);
        Self {
            left: left.clamp(-max, max) as i8,
            right: right.clamp(-max, max) as i8,
        }
    }
}

/// Write-side port: the two drive wheels.
///
/// A command persists until superseded; there is no implicit timeout.
/// Re-issuing the same command is idempotent.
pub trait MotionPort {
    /// Apply wheel speeds and return immediately.
    fn drive(&mut self, cmd: MotionCommand);

    /// Apply wheel speeds, then block for `hold_ms` while they run.
    fn drive_for(&mut self, cmd: MotionCommand, hold_ms: u32);

    /// Command zero on both wheels, then block for `settle_ms` so the robot
    /// is physically at rest before the caller continues.
    fn stop(&mut self, settle_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Stop signal (driven adapter: operator → domain)
// ───────────────────────────────────────────────────────────────

/// Level-sensitive "stop requested" input.
///
/// Any number of physical triggers collapse into this one boolean.  It is
/// polled once per loop iteration; no debouncing is assumed beyond what the
/// source already provides.
pub trait StopSignal {
    fn stop_requested(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Combined robot I/O
// ───────────────────────────────────────────────────────────────

/// Everything the navigator talks to, behind one mutable borrow.
pub trait RobotIo: SensorPort + MotionPort + StopSignal {}

impl<T: SensorPort + MotionPort + StopSignal> RobotIo for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`NavEvent`](super::events::NavEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::NavEvent);
}
