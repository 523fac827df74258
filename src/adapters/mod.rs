//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                        |
//! |------------|--------------------|------------------------------------|
//! | `hardware` | SensorPort         | Gyro, ultrasonic and colour stack  |
//! |            | MotionPort         | `DifferentialDrive` (H-bridges)    |
//! |            | StopSignal         | `StopButtons` / `StopLatch`        |
//! | `log_sink` | EventSink          | `log` facade                       |
//! | `sim`      | SensorPort         | Kinematic arena model              |
//! |            | MotionPort         |                                    |
//! |            | StopSignal         | Simulated-time budget              |

pub mod hardware;
pub mod log_sink;
pub mod sim;
