//! Navigation service: the hexagonal core.
//!
//! [`Navigator`] owns the configuration, the two motion controllers, and
//! the navigation state.  Robot I/O flows through port traits passed in at
//! each call, so the whole service runs against mock adapters in tests.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  StopSignal ──▶ │        Navigator          │
//!  MotionPort ◀── │ ForwardDriver · Heading   │
//!                 └──────────────────────────┘
//! ```
//!
//! Single-threaded and synchronous.  The only deliberate delays are the
//! settle pauses inside `MotionPort::stop` and the back-up hold.

use log::{info, warn};

use crate::config::NavConfig;
use crate::control::forward::ForwardDriver;
use crate::control::heading::HeadingController;
use crate::error::{Result, StopRequested};
use crate::fsm::context::NavigationState;
use crate::fsm::{Phase, Probe, TerminationReason};

use super::events::NavEvent;
use super::ports::{EventSink, MotionCommand, RobotIo};

// ───────────────────────────────────────────────────────────────
// Navigator
// ───────────────────────────────────────────────────────────────

/// Obstacle-avoidance orchestrator.
pub struct Navigator {
    config: NavConfig,
    forward: ForwardDriver,
    heading: HeadingController,
    state: NavigationState,
}

impl Navigator {
    /// Construct the navigator from a validated configuration.
    ///
    /// Does **not** touch the robot; call [`start`](Self::start) or
    /// [`run`](Self::run) next.
    pub fn new(config: NavConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            forward: ForwardDriver::new(&config),
            heading: HeadingController::new(&config),
            state: NavigationState::new(),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Calibrate the gyro and enter `Driving`.
    pub fn start(&mut self, hw: &mut impl RobotIo, sink: &mut impl EventSink) {
        hw.calibrate_heading();
        self.state = NavigationState::new();
        sink.emit(&NavEvent::Started);
        info!(
            "Navigator started (stop distance {:.1} {:?}, boundary {:?})",
            self.config.stop_distance, self.config.distance_unit, self.config.boundary_floor
        );
    }

    /// `start`, then step until a terminal phase is reached.
    pub fn run(&mut self, hw: &mut impl RobotIo, sink: &mut impl EventSink) -> TerminationReason {
        self.start(hw, sink);
        loop {
            if let Phase::Terminated(reason) = self.step(hw, sink) {
                return reason;
            }
        }
    }

    // ── Per-phase orchestration ───────────────────────────────

    /// Execute the current phase once and return the phase it led to.
    ///
    /// A stop request observed anywhere inside the phase ends navigation
    /// with [`TerminationReason::UserRequested`].
    pub fn step(&mut self, hw: &mut impl RobotIo, sink: &mut impl EventSink) -> Phase {
        let outcome = match self.state.phase {
            Phase::Driving => self.drive_cycle(hw, sink),
            Phase::BackingUp => self.back_up(hw),
            Phase::Probing(probe) => self.probe(probe, hw, sink),
            Phase::Terminated(_) => return self.state.phase,
        };

        let next = outcome.unwrap_or(Phase::Terminated(TerminationReason::UserRequested));
        self.transition(next, hw, sink);
        self.state.phase
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    // ── Phases ────────────────────────────────────────────────

    /// One poll cycle: sample, then either drive a straight segment or
    /// stop and start evading.
    fn drive_cycle(
        &mut self,
        hw: &mut impl RobotIo,
        sink: &mut impl EventSink,
    ) -> core::result::Result<Phase, StopRequested> {
        if hw.stop_requested() {
            return Err(StopRequested);
        }

        let frame = hw.read_frame();
        self.state.last_frame = frame;
        self.state.cycles += 1;

        if frame.is_clear(&self.config) {
            let seg = self
                .forward
                .drive_until_blocked(hw, frame.distance, frame.floor)?;
            self.state.last_frame.distance = seg.final_distance;
            self.state.last_frame.floor = seg.final_floor;
            if seg.commands > 0 {
                sink.emit(&NavEvent::SegmentFinished {
                    commands: seg.commands,
                    final_distance: seg.final_distance,
                });
            }
            return Ok(Phase::Driving);
        }

        info!(
            "Blocked: distance {:.1}, floor {:?}; evading",
            frame.distance, frame.floor
        );
        hw.stop(self.config.evade_stop_ms);
        Ok(Phase::BackingUp)
    }

    /// Stop, reverse slowly for a fixed time, stop.
    fn back_up(&mut self, hw: &mut impl RobotIo) -> core::result::Result<Phase, StopRequested> {
        if hw.stop_requested() {
            return Err(StopRequested);
        }

        let reverse = -i32::from(self.config.backup_speed);
        hw.stop(self.config.backup_settle_ms);
        hw.drive_for(
            MotionCommand::new(reverse, reverse),
            self.config.backup_duration_ms,
        );
        hw.stop(self.config.backup_settle_ms);
        Ok(Phase::Probing(Probe::first()))
    }

    /// Recalibrate, rotate to the probe heading, settle, and re-sample.
    fn probe(
        &mut self,
        probe: Probe,
        hw: &mut impl RobotIo,
        sink: &mut impl EventSink,
    ) -> core::result::Result<Phase, StopRequested> {
        if hw.stop_requested() {
            return Err(StopRequested);
        }

        hw.calibrate_heading();
        let rotated = self.heading.turn(hw, probe.turn())?;
        hw.stop(self.config.probe_settle_ms);

        let frame = hw.read_frame();
        self.state.last_frame = frame;
        let clear = !frame.is_blocked(&self.config);

        info!(
            "Probe {}: turned {}° in {} commands, distance {:.1}, floor {:?} -> {}",
            probe.name(),
            rotated.heading_deg,
            rotated.commands,
            frame.distance,
            frame.floor,
            if clear { "clear" } else { "blocked" }
        );
        sink.emit(&NavEvent::ProbeFinished {
            probe,
            frame,
            clear,
        });

        Ok(Phase::after_probe(probe, clear))
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(&mut self, next: Phase, hw: &mut impl RobotIo, sink: &mut impl EventSink) {
        let prev = self.state.phase;
        if next == prev {
            return;
        }

        info!("Phase transition: {} -> {}", prev.name(), next.name());
        self.state.phase = next;
        sink.emit(&NavEvent::PhaseChanged {
            from: prev,
            to: next,
        });

        if let Phase::Terminated(reason) = next {
            hw.stop(self.config.final_stop_ms);
            match reason {
                TerminationReason::DeadEnd => warn!("Dead end: every probe blocked, stopping"),
                TerminationReason::UserRequested => info!("Stop requested, stopping"),
            }
            sink.emit(&NavEvent::Terminated(reason));
        }
    }
}
