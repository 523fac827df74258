//! Navigation phases and the fixed escape sequence.
//!
//! ```text
//!            ┌──────────[probe clear]──────────────────────────┐
//!            ▼                                                 │
//!  ─▶ DRIVING ──[blocked]──▶ BACKING_UP ──▶ PROBE(right) ──▶ PROBE(about) ──▶ PROBE(left)
//!       │                        │               │                │                │
//!       │                        │               │                │          [still blocked]
//!       │                        │               │                │                ▼
//!       └───────[stop request]───┴───────────────┴────────────────┴──────▶ TERMINATED
//! ```
//!
//! The escape sequence is a tagged, ordered list consumed front to back.
//! There is no search: after each probe the only question is "did it clear?".

pub mod context;

use crate::control::heading::Turn;

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

/// One evasive manoeuvre used to test whether a heading offers a clear path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Probe {
    Right = 0,
    About = 1,
    Left = 2,
}

/// Probes in the order the navigator tries them.
pub const ESCAPE_SEQUENCE: [Probe; 3] = [Probe::Right, Probe::About, Probe::Left];

impl Probe {
    /// First probe of the escape sequence.
    pub const fn first() -> Self {
        ESCAPE_SEQUENCE[0]
    }

    /// The probe after this one, or `None` once the sequence is exhausted.
    pub fn next(self) -> Option<Self> {
        ESCAPE_SEQUENCE.get(self as usize + 1).copied()
    }

    /// The rotation this probe performs.
    pub fn turn(self) -> Turn {
        match self {
            Self::Right => Turn::Right,
            Self::About => Turn::About,
            Self::Left => Turn::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::About => "about",
            Self::Left => "left",
        }
    }
}

// ---------------------------------------------------------------------------
// Termination
// ---------------------------------------------------------------------------

/// Why the navigator stopped for good.  Both are normal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every probe of the escape sequence came back blocked.
    DeadEnd,
    /// An operator stop request was observed.
    UserRequested,
}

impl TerminationReason {
    pub fn name(self) -> &'static str {
        match self {
            Self::DeadEnd => "dead_end",
            Self::UserRequested => "user_requested",
        }
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// Navigator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Polling sensors and driving straight while the path is clear.
    Driving,
    /// Stop, reverse a short distance, stop.
    BackingUp,
    /// Rotating to a probe heading and re-sampling.
    Probing(Probe),
    /// Final stop issued; nothing else will run.
    Terminated(TerminationReason),
}

impl Phase {
    /// Phase after a probe, given whether it cleared.
    ///
    /// A clear probe returns to `Driving`.  A blocked probe moves to the next
    /// probe of the sequence, or to a dead end once the sequence is spent.
    pub fn after_probe(probe: Probe, clear: bool) -> Self {
        if clear {
            return Self::Driving;
        }
        match probe.next() {
            Some(next) => Self::Probing(next),
            None => Self::Terminated(TerminationReason::DeadEnd),
        }
    }

    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::BackingUp => "BackingUp",
            Self::Probing(Probe::Right) => "ProbeRight",
            Self::Probing(Probe::About) => "ProbeAbout",
            Self::Probing(Probe::Left) => "ProbeLeft",
            Self::Terminated(_) => "Terminated",
        }
    }
}
