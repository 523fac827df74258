//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each navigation event as one
//! structured line through the `log` facade.

use log::{info, warn};

use crate::app::events::NavEvent;
use crate::app::ports::EventSink;
use crate::fsm::TerminationReason;

/// Adapter that logs every [`NavEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    segments: u32,
    probes: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Straight segments seen so far.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Probes seen so far.
    pub fn probes(&self) -> u32 {
        self.probes
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NavEvent) {
        match event {
            NavEvent::Started => {
                info!("START | heading calibrated");
            }
            NavEvent::PhaseChanged { from, to } => {
                info!("PHASE | {} -> {}", from.name(), to.name());
            }
            NavEvent::SegmentFinished {
                commands,
                final_distance,
            } => {
                self.segments += 1;
                info!(
                    "DRIVE | segment #{} | {} commands | final distance {:.1}",
                    self.segments, commands, final_distance
                );
            }
            NavEvent::ProbeFinished {
                probe,
                frame,
                clear,
            } => {
                self.probes += 1;
                info!(
                    "PROBE | {} | heading={}\u{00b0} distance={:.1} floor={:?} | {}",
                    probe.name(),
                    frame.heading_deg,
                    frame.distance,
                    frame.floor,
                    if *clear { "CLEAR" } else { "BLOCKED" },
                );
            }
            NavEvent::Terminated(reason @ TerminationReason::DeadEnd) => {
                warn!("STOP  | {} after {} probes", reason.name(), self.probes);
            }
            NavEvent::Terminated(reason) => {
                info!("STOP  | {}", reason.name());
            }
        }
    }
}
