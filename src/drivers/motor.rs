//! Wheel motor driver for one channel of a dual H-bridge (L298N / TB6612
//! style).
//!
//! Speed via a PWM enable line, direction via two input pins:
//!
//! | IN_A | IN_B | effect   |
//! |------|------|----------|
//! | H    | L    | forward  |
//! | L    | H    | reverse  |
//! | L    | L    | coast    |
//!
//! Written against `embedded-hal` 1.0 traits so any HAL can supply the pins.
//! `inverted` swaps forward and reverse for the mirrored motor.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Running { duty: u8, dir: Direction },
}

/// A single drive wheel that accepts a signed percentage.
pub trait WheelMotor {
    fn set_speed(&mut self, percent: i8) -> Result<(), ActuatorError>;
}

pub struct HBridgeMotor<PWM, A, B> {
    pwm: PWM,
    in_a: A,
    in_b: B,
    inverted: bool,
    state: MotorState,
}

impl<PWM, A, B> HBridgeMotor<PWM, A, B>
where
    PWM: SetDutyCycle,
    A: OutputPin,
    B: OutputPin,
{
    pub fn new(pwm: PWM, in_a: A, in_b: B, inverted: bool) -> Self {
        Self {
            pwm,
            in_a,
            in_b,
            inverted,
            state: MotorState::Stopped,
        }
    }

    /// Zero duty and both inputs low (coast).
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.in_a
            .set_low()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.in_b
            .set_low()
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.state = MotorState::Stopped;
        Ok(())
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }

    fn set_direction(&mut self, dir: Direction) -> Result<(), ActuatorError> {
        let forward = matches!(dir, Direction::Forward) != self.inverted;
        self.in_a
            .set_state(PinState::from(forward))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.in_b
            .set_state(PinState::from(!forward))
            .map_err(|_| ActuatorError::GpioWriteFailed)
    }
}

impl<PWM, A, B> WheelMotor for HBridgeMotor<PWM, A, B>
where
    PWM: SetDutyCycle,
    A: OutputPin,
    B: OutputPin,
{
    fn set_speed(&mut self, percent: i8) -> Result<(), ActuatorError> {
        let percent = percent.clamp(-100, 100);
        if percent == 0 {
            return self.stop();
        }

        let dir = if percent > 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        let duty = percent.unsigned_abs();

        self.set_direction(dir)?;
        self.pwm
            .set_duty_cycle_percent(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;

        self.state = MotorState::Running { duty, dir };
        Ok(())
    }
}
