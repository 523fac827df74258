//! Wanderbot navigation library.
//!
//! Obstacle-avoiding wander controller for a two-wheeled differential-drive
//! robot.  The navigator drives straight with drift compensation until the
//! range sensor or the floor colour says stop, backs off, then probes right,
//! about and left with a gyro-closed rotate before giving up at a dead end.
//!
//! The pure logic (`app`, `control`, `fsm`, `config`) talks to the robot
//! only through the traits in [`app::ports`].  `drivers` and `adapters`
//! provide the `embedded-hal` drive train and a host-side simulator.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod fsm;

pub use error::{ActuatorError, ConfigError, Error, Result, StopRequested};
