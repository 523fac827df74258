//! Application core: navigation logic, zero direct I/O.
//!
//! The orchestrator, its outbound events, and the port traits it drives.
//! All interaction with hardware happens through the traits in [`ports`],
//! keeping this layer testable without a robot.

pub mod events;
pub mod ports;
pub mod service;
