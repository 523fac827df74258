//! Straight-line driving with fixed drift compensation.
//!
//! Two nominally identical motors drift apart under the same commanded
//! speed.  The right wheel is scaled by a fixed ratio while driving
//! straight; there is no adaptive correction.

use log::debug;

use crate::app::ports::{MotionCommand, RobotIo};
use crate::config::NavConfig;
use crate::error::StopRequested;
use crate::fsm::context::FloorClass;

/// Result of one straight segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Drive commands issued before the stop condition was met.
    pub commands: u32,
    /// Last sampled forward distance.
    pub final_distance: f32,
    /// Last sampled floor class.
    pub final_floor: FloorClass,
}

pub struct ForwardDriver {
    command: MotionCommand,
    stop_distance: f32,
    boundary: FloorClass,
}

impl ForwardDriver {
    pub fn new(config: &NavConfig) -> Self {
        let cruise = i32::from(config.cruise_speed);
        let right = (f32::from(config.cruise_speed) * config.drift_ratio).round() as i32;
        Self {
            command: MotionCommand::new(cruise, right),
            stop_distance: config.stop_distance,
            boundary: config.boundary_floor,
        }
    }

    /// The drift-compensated command issued on every straight iteration.
    pub fn command(&self) -> MotionCommand {
        self.command
    }

    /// Drive straight until the range drops to the stop distance or the
    /// boundary floor is seen, starting from an already-sampled reading.
    ///
    /// The stop signal is polled before every drive command; a request
    /// aborts the segment with [`StopRequested`] and leaves the motors
    /// running for the caller to stop.
    pub fn drive_until_blocked(
        &self,
        hw: &mut impl RobotIo,
        initial_distance: f32,
        initial_floor: FloorClass,
    ) -> Result<Segment, StopRequested> {
        let mut distance = initial_distance;
        let mut floor = initial_floor;
        let mut commands = 0u32;

        while distance > self.stop_distance && floor != self.boundary {
            if hw.stop_requested() {
                return Err(StopRequested);
            }
            hw.drive(self.command);
            commands += 1;
            distance = hw.read_distance();
            floor = hw.read_floor();
        }

        debug!(
            "segment: {} commands, final distance {:.1}, floor {:?}",
            commands, distance, floor
        );
        Ok(Segment {
            commands,
            final_distance: distance,
            final_floor: floor,
        })
    }
}
