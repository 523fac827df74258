//! Integration tests for the Navigator running on the `embedded-hal` drive
//! train: `HardwareAdapter` → `DifferentialDrive` → `HBridgeMotor` pins.

use core::convert::Infallible;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

use crate::mock_hw::RecordingSink;

use wanderbot::adapters::hardware::HardwareAdapter;
use wanderbot::app::ports::{MotionCommand, MotionPort, SensorPort};
use wanderbot::app::service::Navigator;
use wanderbot::config::NavConfig;
use wanderbot::drivers::drive::DifferentialDrive;
use wanderbot::drivers::motor::HBridgeMotor;
use wanderbot::drivers::stop_button::StopLatch;
use wanderbot::fsm::TerminationReason;
use wanderbot::fsm::context::FloorClass;

// ── Fake peripherals ──────────────────────────────────────────

#[derive(Clone, Default)]
struct Pin(Rc<Cell<bool>>);

impl PinErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Pwm(Rc<Cell<u16>>);

impl PwmErrorType for Pwm {
    type Error = Infallible;
}

impl SetDutyCycle for Pwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set(duty);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Clock(Rc<Cell<u64>>);

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

impl Clock {
    fn elapsed_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

/// Fixed range and floor; headings replayed in read order.
struct Sensors {
    distance: f32,
    headings: VecDeque<i32>,
}

impl SensorPort for Sensors {
    fn read_distance(&mut self) -> f32 {
        self.distance
    }

    fn read_floor(&mut self) -> FloorClass {
        FloorClass::White
    }

    fn read_heading(&mut self) -> i32 {
        self.headings.pop_front().unwrap_or(0)
    }

    fn reset_heading_hard(&mut self) {}

    fn reset_heading_angle(&mut self) {}
}

struct Wheel {
    duty: Pwm,
    in_a: Pin,
    in_b: Pin,
}

impl Wheel {
    fn new() -> Self {
        Self {
            duty: Pwm::default(),
            in_a: Pin::default(),
            in_b: Pin::default(),
        }
    }

    fn motor(&self, inverted: bool) -> HBridgeMotor<Pwm, Pin, Pin> {
        HBridgeMotor::new(self.duty.clone(), self.in_a.clone(), self.in_b.clone(), inverted)
    }

    fn coasting(&self) -> bool {
        self.duty.0.get() == 0 && !self.in_a.0.get() && !self.in_b.0.get()
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn dead_end_on_hardware_stack_leaves_wheels_coasting() {
    let left = Wheel::new();
    let right = Wheel::new();
    let clock = Clock::default();
    let latch = StopLatch::new();

    let drive = DifferentialDrive::new(left.motor(false), right.motor(true), clock.clone());
    // Entry frame, then (rotation sample, probe frame) per probe.
    let sensors = Sensors {
        distance: 10.0,
        headings: VecDeque::from([0, 84, 84, -174, -174, -84, -84]),
    };
    let mut hw = HardwareAdapter::new(sensors, drive, &latch);
    let mut nav = Navigator::new(NavConfig::default()).expect("defaults are valid");
    let mut sink = RecordingSink::new();

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::DeadEnd);
    assert_eq!(hw.motion().last_command(), MotionCommand::STOP);
    assert!(left.coasting());
    assert!(right.coasting());
    // Evade 1000, back-up 500 + 2000 + 500, three probe settles, final 1000.
    assert_eq!(clock.elapsed_ms(), 6500);
}

#[test]
fn tripped_latch_stops_before_any_motion() {
    let left = Wheel::new();
    let right = Wheel::new();
    let clock = Clock::default();
    let latch = StopLatch::new();
    latch.trip();

    let drive = DifferentialDrive::new(left.motor(false), right.motor(true), clock.clone());
    let sensors = Sensors {
        distance: 100.0,
        headings: VecDeque::new(),
    };
    let mut hw = HardwareAdapter::new(sensors, drive, &latch);
    let mut nav = Navigator::new(NavConfig::default()).expect("defaults are valid");
    let mut sink = RecordingSink::new();

    let reason = nav.run(&mut hw, &mut sink);

    assert_eq!(reason, TerminationReason::UserRequested);
    assert!(left.coasting());
    assert_eq!(clock.elapsed_ms(), 1000);
}

#[test]
fn drive_commands_reach_the_pins() {
    let left = Wheel::new();
    let right = Wheel::new();
    let latch = StopLatch::new();

    let drive = DifferentialDrive::new(left.motor(false), right.motor(true), Clock::default());
    let sensors = Sensors {
        distance: 100.0,
        headings: VecDeque::new(),
    };
    let mut hw = HardwareAdapter::new(sensors, drive, &latch);

    hw.drive(MotionCommand::new(25, 24));
    assert_eq!(left.duty.0.get(), 25);
    assert!(left.in_a.0.get() && !left.in_b.0.get());
    // Mirrored motor: forward drives IN_B.
    assert_eq!(right.duty.0.get(), 24);
    assert!(!right.in_a.0.get() && right.in_b.0.get());

    hw.stop(0);
    assert!(left.coasting());
    assert!(right.coasting());

    let (sensors, drive, _) = hw.into_parts();
    assert_eq!(sensors.distance, 100.0);
    assert_eq!(drive.last_command(), MotionCommand::STOP);
}
