//! Heading controller: one rotate primitive, three parameterisations.
//!
//! Every rotation starts by re-zeroing the gyro, so a turn never depends on
//! a heading left over from an earlier manoeuvre.  The wheels then spin at
//! equal magnitude and opposite sign until the sampled heading reaches the
//! target.  Targets are set a few degrees short of the geometric angle so
//! sensor and actuation lag do not carry the robot past it.
//!
//! ## Liveness
//!
//! `rotate_to` has no internal timeout.  If the gyro stalls or a motor jams,
//! the loop only exits through the stop signal it polls each iteration.

use crate::app::ports::{MotionCommand, RobotIo};
use crate::config::NavConfig;
use crate::error::StopRequested;

/// Spin direction, seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Left wheel forward, right wheel back.  Heading increases.
    Clockwise,
    /// Left wheel back, right wheel forward.  Heading decreases.
    CounterClockwise,
}

impl Rotation {
    /// Opposite-sign wheel command for this direction.
    pub fn command(self, speed: i8) -> MotionCommand {
        let s = i32::from(speed);
        match self {
            Self::Clockwise => MotionCommand::new(s, -s),
            Self::CounterClockwise => MotionCommand::new(-s, s),
        }
    }

    /// Degrees turned in this direction, given a signed heading.
    pub fn progress(self, heading_deg: i32) -> i32 {
        match self {
            Self::Clockwise => heading_deg,
            Self::CounterClockwise => -heading_deg,
        }
    }
}

/// The three turns the navigator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// 90° clockwise.
    Right,
    /// 90° counter-clockwise.
    Left,
    /// 180°, counter-clockwise like `Left`.
    About,
}

impl Turn {
    pub fn rotation(self) -> Rotation {
        match self {
            Self::Right => Rotation::Clockwise,
            Self::Left | Self::About => Rotation::CounterClockwise,
        }
    }
}

/// Outcome of one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    /// Heading sample that satisfied the target.
    pub heading_deg: i32,
    /// Spin commands issued.
    pub commands: u32,
}

pub struct HeadingController {
    speed: i8,
    quarter_turn_deg: i32,
    about_turn_deg: i32,
}

impl HeadingController {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            speed: config.cruise_speed,
            quarter_turn_deg: config.quarter_turn_deg,
            about_turn_deg: config.about_turn_deg,
        }
    }

    /// Configured target for `turn`, in degrees of progress.
    pub fn target_for(&self, turn: Turn) -> i32 {
        match turn {
            Turn::Right | Turn::Left => self.quarter_turn_deg,
            Turn::About => self.about_turn_deg,
        }
    }

    pub fn turn(&self, hw: &mut impl RobotIo, turn: Turn) -> Result<Rotated, StopRequested> {
        self.rotate_to(hw, turn.rotation(), self.target_for(turn))
    }

    /// Re-zero the gyro, then spin until `target_deg` of progress in
    /// `direction` has been sampled.
    pub fn rotate_to(
        &self,
        hw: &mut impl RobotIo,
        direction: Rotation,
        target_deg: i32,
    ) -> Result<Rotated, StopRequested> {
        hw.calibrate_heading();

        let cmd = direction.command(self.speed);
        let mut heading = 0;
        let mut commands = 0u32;

        while direction.progress(heading) < target_deg {
            if hw.stop_requested() {
                return Err(StopRequested);
            }
            hw.drive(cmd);
            commands += 1;
            heading = hw.read_heading();
        }

        Ok(Rotated {
            heading_deg: heading,
            commands,
        })
    }
}
