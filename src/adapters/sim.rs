//! Host-side robot simulator.
//!
//! Implements every port with a differential-drive kinematic model in a
//! rectangular arena, so the navigator runs unchanged on a desktop.
//!
//! - Range: ray cast from the robot centre along its heading, capped at the
//!   sonar's maximum.
//! - Floor: boundary tape along every wall, plain floor elsewhere.
//! - Heading: integer gyro, clockwise positive, zeroed by either reset.
//! - Time: each sensor read costs one sample period; `drive_for` and `stop`
//!   cost their hold time.  Motion integrates whatever command is active
//!   while time passes.
//!
//! An optional time budget trips the internal [`StopLatch`], standing in for
//! an operator pressing stop.

use std::f32::consts::PI;

use log::debug;

use crate::app::ports::{MotionCommand, MotionPort, SensorPort, StopSignal};
use crate::config::DistanceUnit;
use crate::drivers::stop_button::StopLatch;
use crate::fsm::context::FloorClass;

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

/// Axis-aligned box obstacle, centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Obstacle {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Walled rectangle with optional boundary tape and box obstacles.
#[derive(Debug, Clone)]
pub struct Arena {
    width_cm: f32,
    height_cm: f32,
    tape_width_cm: f32,
    tape: FloorClass,
    floor: FloorClass,
    obstacles: Vec<Obstacle>,
}

impl Arena {
    /// Ray-march step, centimetres.
    const RAY_STEP_CM: f32 = 0.5;

    pub fn new(width_cm: f32, height_cm: f32) -> Self {
        Self {
            width_cm,
            height_cm,
            tape_width_cm: 0.0,
            tape: FloorClass::Red,
            floor: FloorClass::White,
            obstacles: Vec::new(),
        }
    }

    /// Lay a band of `class` tape of the given width along every wall.
    pub fn with_tape(mut self, width_cm: f32, class: FloorClass) -> Self {
        self.tape_width_cm = width_cm;
        self.tape = class;
        self
    }

    pub fn with_obstacle(mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        self.obstacles.push(Obstacle {
            min_x,
            min_y,
            max_x,
            max_y,
        });
        self
    }

    pub fn width_cm(&self) -> f32 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f32 {
        self.height_cm
    }

    pub fn is_occupied(&self, x: f32, y: f32) -> bool {
        x < 0.0
            || y < 0.0
            || x > self.width_cm
            || y > self.height_cm
            || self.obstacles.iter().any(|o| o.contains(x, y))
    }

    /// Distance to the first occupied point along `angle_rad`, or `max_cm`.
    pub fn ray_cast(&self, ox: f32, oy: f32, angle_rad: f32, max_cm: f32) -> f32 {
        let dx = angle_rad.cos() * Self::RAY_STEP_CM;
        let dy = angle_rad.sin() * Self::RAY_STEP_CM;

        let (mut x, mut y) = (ox, oy);
        let mut distance = 0.0;
        while distance < max_cm {
            x += dx;
            y += dy;
            distance += Self::RAY_STEP_CM;
            if self.is_occupied(x, y) {
                return distance;
            }
        }
        max_cm
    }

    pub fn floor_at(&self, x: f32, y: f32) -> FloorClass {
        let to_wall = x
            .min(self.width_cm - x)
            .min(y)
            .min(self.height_cm - y);
        if to_wall < self.tape_width_cm {
            self.tape
        } else {
            self.floor
        }
    }
}

// ---------------------------------------------------------------------------
// Robot model
// ---------------------------------------------------------------------------

/// Physical parameters of the simulated robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    /// Distance between wheel contact points.
    pub wheel_base_cm: f32,
    /// Wheel surface speed at 100% command.
    pub max_wheel_speed_cm_s: f32,
    /// Collision radius around the centre.
    pub radius_cm: f32,
    /// Cost of one sensor read, and the integration step.
    pub sample_ms: u32,
    /// Sonar range cap.
    pub sonar_max_cm: f32,
    /// Unit the simulated sonar reports in.
    pub unit: DistanceUnit,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            wheel_base_cm: 12.0,
            max_wheel_speed_cm_s: 40.0,
            radius_cm: 5.0,
            sample_ms: 5,
            sonar_max_cm: 255.0,
            unit: DistanceUnit::Centimeters,
        }
    }
}

pub struct SimRobot {
    arena: Arena,
    params: SimParams,
    /// Centre position, centimetres.
    x: f32,
    y: f32,
    /// Orientation, radians, counter-clockwise from +X.
    theta: f32,
    /// Clockwise rotation since the last gyro reset, degrees.
    gyro_deg: f32,
    cmd: MotionCommand,
    elapsed_ms: u64,
    budget_ms: Option<u64>,
    latch: StopLatch,
    collisions: u32,
    commands: u64,
}

impl SimRobot {
    /// Place a robot at `(x, y)` facing `heading_deg` (counter-clockwise
    /// from +X).
    pub fn new(arena: Arena, params: SimParams, x: f32, y: f32, heading_deg: f32) -> Self {
        Self {
            arena,
            params,
            x,
            y,
            theta: heading_deg.to_radians(),
            gyro_deg: 0.0,
            cmd: MotionCommand::STOP,
            elapsed_ms: 0,
            budget_ms: None,
            latch: StopLatch::new(),
            collisions: 0,
            commands: 0,
        }
    }

    /// Trip the stop latch once `ms` of simulated time has passed.
    pub fn with_budget_ms(mut self, ms: u64) -> Self {
        self.budget_ms = Some(ms);
        self
    }

    /// `(x_cm, y_cm, heading_deg)`, heading counter-clockwise from +X.
    pub fn pose(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.theta.to_degrees())
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Steps where the robot was held back by a wall or obstacle.
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    /// Motion commands received (drive, drive_for and stop).
    pub fn commands(&self) -> u64 {
        self.commands
    }

    pub fn current_command(&self) -> MotionCommand {
        self.cmd
    }

    pub fn stop_latch(&self) -> &StopLatch {
        &self.latch
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Let `ms` of simulated time pass under the active command.
    fn advance(&mut self, ms: u32) {
        let step = self.params.sample_ms.max(1);
        let mut remaining = ms;
        while remaining > 0 {
            let dt_ms = remaining.min(step);
            self.integrate(dt_ms as f32 / 1000.0);
            remaining -= dt_ms;
            self.elapsed_ms += u64::from(dt_ms);
        }

        if let Some(budget) = self.budget_ms {
            if self.elapsed_ms >= budget && !self.latch.is_tripped() {
                debug!("sim: budget of {budget} ms spent, tripping stop");
                self.latch.trip();
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        let scale = self.params.max_wheel_speed_cm_s / f32::from(MotionCommand::MAX_SPEED);
        let vl = f32::from(self.cmd.left) * scale;
        let vr = f32::from(self.cmd.right) * scale;

        let v = (vl + vr) / 2.0;
        // Counter-clockwise positive.
        let omega = (vr - vl) / self.params.wheel_base_cm;

        self.theta = normalize_angle(self.theta + omega * dt);
        self.gyro_deg -= (omega * dt).to_degrees();

        let nx = self.x + v * self.theta.cos() * dt;
        let ny = self.y + v * self.theta.sin() * dt;
        if self.collides(nx, ny) {
            self.collisions += 1;
        } else {
            self.x = nx;
            self.y = ny;
        }
    }

    fn collides(&self, x: f32, y: f32) -> bool {
        let r = self.params.radius_cm;
        (0..8).any(|i| {
            let a = i as f32 * PI / 4.0;
            self.arena.is_occupied(x + r * a.cos(), y + r * a.sin())
        })
    }

    fn set_command(&mut self, cmd: MotionCommand) {
        self.cmd = cmd;
        self.commands += 1;
    }
}

fn normalize_angle(angle: f32) -> f32 {
    let a = angle % (2.0 * PI);
    if a >= PI {
        a - 2.0 * PI
    } else if a < -PI {
        a + 2.0 * PI
    } else {
        a
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimRobot {
    fn read_distance(&mut self) -> f32 {
        self.advance(self.params.sample_ms);
        let cm = self
            .arena
            .ray_cast(self.x, self.y, self.theta, self.params.sonar_max_cm);
        self.params.unit.from_cm(cm)
    }

    fn read_floor(&mut self) -> FloorClass {
        self.advance(self.params.sample_ms);
        self.arena.floor_at(self.x, self.y)
    }

    fn read_heading(&mut self) -> i32 {
        self.advance(self.params.sample_ms);
        self.gyro_deg.round() as i32
    }

    fn reset_heading_hard(&mut self) {
        self.gyro_deg = 0.0;
    }

    fn reset_heading_angle(&mut self) {
        self.gyro_deg = 0.0;
    }
}

// ── MotionPort implementation ─────────────────────────────────

impl MotionPort for SimRobot {
    fn drive(&mut self, cmd: MotionCommand) {
        self.set_command(cmd);
    }

    fn drive_for(&mut self, cmd: MotionCommand, hold_ms: u32) {
        self.set_command(cmd);
        self.advance(hold_ms);
    }

    fn stop(&mut self, settle_ms: u32) {
        self.set_command(MotionCommand::STOP);
        self.advance(settle_ms);
    }
}

// ── StopSignal implementation ─────────────────────────────────

impl StopSignal for SimRobot {
    fn stop_requested(&mut self) -> bool {
        self.latch.is_tripped()
    }
}
