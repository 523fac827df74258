//! Two-wheel differential drive.
//!
//! Pairs a left and right [`WheelMotor`] with a blocking delay and exposes
//! them as a [`MotionPort`].  Motor faults are logged and the command is
//! dropped: motion commands are fire-and-forget, and the next iteration of
//! the control loop re-issues whatever is needed.

use embedded_hal::delay::DelayNs;
use log::warn;

use super::motor::WheelMotor;
use crate::app::ports::{MotionCommand, MotionPort};
use crate::error::Result;

pub struct DifferentialDrive<L, R, D> {
    left: L,
    right: R,
    delay: D,
    last: MotionCommand,
}

impl<L, R, D> DifferentialDrive<L, R, D>
where
    L: WheelMotor,
    R: WheelMotor,
    D: DelayNs,
{
    pub fn new(left: L, right: R, delay: D) -> Self {
        Self {
            left,
            right,
            delay,
            last: MotionCommand::STOP,
        }
    }

    /// Most recent command applied.
    pub fn last_command(&self) -> MotionCommand {
        self.last
    }

    /// Apply `cmd` to both wheels and report the first wheel fault.
    ///
    /// Both wheels are always written.  `last_command` only advances when
    /// both writes succeed.
    pub fn try_drive(&mut self, cmd: MotionCommand) -> Result<()> {
        let left = self.left.set_speed(cmd.left);
        let right = self.right.set_speed(cmd.right);
        left?;
        right?;
        self.last = cmd;
        Ok(())
    }

    fn apply(&mut self, cmd: MotionCommand) {
        if let Err(e) = self.try_drive(cmd) {
            warn!("drive {:?}: {e}", cmd);
        }
    }
}

impl<L, R, D> MotionPort for DifferentialDrive<L, R, D>
where
    L: WheelMotor,
    R: WheelMotor,
    D: DelayNs,
{
    fn drive(&mut self, cmd: MotionCommand) {
        self.apply(cmd);
    }

    fn drive_for(&mut self, cmd: MotionCommand, hold_ms: u32) {
        self.apply(cmd);
        self.delay.delay_ms(hold_ms);
    }

    fn stop(&mut self, settle_ms: u32) {
        self.apply(MotionCommand::STOP);
        self.delay.delay_ms(settle_ms);
    }
}
