//! Outbound navigation events.
//!
//! The [`Navigator`](super::service::Navigator) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them; the stock adapter writes them to the log.

use crate::fsm::context::SensorFrame;
use crate::fsm::{Phase, Probe, TerminationReason};

/// Structured events emitted by the navigation core.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Heading calibrated; the navigator is about to start driving.
    Started,

    /// The navigator moved between phases.
    PhaseChanged { from: Phase, to: Phase },

    /// A straight segment of at least one drive command ended because an
    /// obstacle or the boundary was seen.
    SegmentFinished { commands: u32, final_distance: f32 },

    /// A probe rotation finished and the new heading was sampled.
    ProbeFinished {
        probe: Probe,
        frame: SensorFrame,
        clear: bool,
    },

    /// Final stop issued.
    Terminated(TerminationReason),
}
