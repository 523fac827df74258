//! Operator stop inputs.
//!
//! ## Hardware
//!
//! Momentary switches, active-low with pull-ups.  Any pressed button means
//! "stop"; the sources are not distinguished.  Reads are level-sensitive
//! and rely on the switch hardware for debouncing.  A pin that cannot be
//! read counts as pressed, and the fault is logged once.
//!
//! ## Software latch
//!
//! [`StopLatch`] is a lock-free flag that an ISR, a signal handler, or a
//! supervising thread can trip.  Once tripped it stays set until cleared.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::StopSignal;

/// Most stop buttons a single [`StopButtons`] polls.
pub const MAX_STOP_BUTTONS: usize = 4;

/// A set of active-low stop buttons collapsed into one signal.
pub struct StopButtons<P> {
    pins: heapless::Vec<P, MAX_STOP_BUTTONS>,
    faulted: bool,
}

impl<P: InputPin> StopButtons<P> {
    pub fn new() -> Self {
        Self {
            pins: heapless::Vec::new(),
            faulted: false,
        }
    }

    /// Add a button.  Hands the pin back if the set is full.
    pub fn add(&mut self, pin: P) -> Result<(), P> {
        self.pins.push(pin)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// True once any pin has failed a read.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

impl<P: InputPin> Default for StopButtons<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> StopSignal for StopButtons<P> {
    fn stop_requested(&mut self) -> bool {
        let mut pressed = false;
        let mut faulted = false;
        for pin in self.pins.iter_mut() {
            match pin.is_low() {
                Ok(true) => pressed = true,
                Ok(false) => {}
                Err(_) => faulted = true,
            }
        }
        if faulted && !self.faulted {
            warn!("stop button read failed, treating as pressed");
            self.faulted = true;
        }
        pressed || faulted
    }
}

/// Lock-free stop flag.  `const`-constructible so it can live in a `static`.
#[derive(Debug, Default)]
pub struct StopLatch {
    tripped: AtomicBool,
}

impl StopLatch {
    pub const fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
        }
    }

    /// Request a stop.  Safe from interrupt context.
    pub fn trip(&self) {
        self.tripped.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.tripped.store(false, Ordering::Release);
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }
}

impl StopSignal for StopLatch {
    fn stop_requested(&mut self) -> bool {
        self.is_tripped()
    }
}

impl StopSignal for &StopLatch {
    fn stop_requested(&mut self) -> bool {
        self.is_tripped()
    }
}
