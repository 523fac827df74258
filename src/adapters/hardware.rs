//! Hardware adapter: bundles the robot's peripherals behind the port traits.
//!
//! The navigator takes a single `&mut impl RobotIo`.  On the robot the three
//! roles are served by different drivers (gyro/range/colour sensor stack,
//! [`DifferentialDrive`](crate::drivers::drive::DifferentialDrive),
//! [`StopButtons`](crate::drivers::stop_button::StopButtons)); this adapter
//! owns them and delegates each port to the right one.

use crate::app::ports::{MotionCommand, MotionPort, SensorPort, StopSignal};
use crate::fsm::context::FloorClass;

/// Concrete adapter that combines sensors, drive train and stop inputs.
pub struct HardwareAdapter<S, M, T> {
    sensors: S,
    motion: M,
    stop: T,
}

impl<S, M, T> HardwareAdapter<S, M, T>
where
    S: SensorPort,
    M: MotionPort,
    T: StopSignal,
{
    pub fn new(sensors: S, motion: M, stop: T) -> Self {
        Self {
            sensors,
            motion,
            stop,
        }
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Hand the peripherals back.
    pub fn into_parts(self) -> (S, M, T) {
        (self.sensors, self.motion, self.stop)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort, M, T> SensorPort for HardwareAdapter<S, M, T> {
    fn read_distance(&mut self) -> f32 {
        self.sensors.read_distance()
    }

    fn read_floor(&mut self) -> FloorClass {
        self.sensors.read_floor()
    }

    fn read_heading(&mut self) -> i32 {
        self.sensors.read_heading()
    }

    fn reset_heading_hard(&mut self) {
        self.sensors.reset_heading_hard();
    }

    fn reset_heading_angle(&mut self) {
        self.sensors.reset_heading_angle();
    }
}

// ── MotionPort implementation ─────────────────────────────────

impl<S, M: MotionPort, T> MotionPort for HardwareAdapter<S, M, T> {
    fn drive(&mut self, cmd: MotionCommand) {
        self.motion.drive(cmd);
    }

    fn drive_for(&mut self, cmd: MotionCommand, hold_ms: u32) {
        self.motion.drive_for(cmd, hold_ms);
    }

    fn stop(&mut self, settle_ms: u32) {
        self.motion.stop(settle_ms);
    }
}

// ── StopSignal implementation ─────────────────────────────────

impl<S, M, T: StopSignal> StopSignal for HardwareAdapter<S, M, T> {
    fn stop_requested(&mut self) -> bool {
        self.stop.stop_requested()
    }
}
