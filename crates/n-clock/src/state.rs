//! The clock's run state — one struct, owned by the main loop.
//!
//! There is exactly one clock per process, and everything the per-second
//! tick needs lives here: the current [`TimeValue`], the snapshot it can
//! be reset to, the direction it steps ([`Mode`]), and the user's pause
//! toggle. The main loop owns the struct and passes it by reference;
//! nothing here is global and nothing mutates it from a signal context.

use std::fmt;

use crate::digit::ParsedDigits;
use crate::time::TimeValue;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which direction the clock steps.
///
/// Pure data — dispatch lives in [`ClockState::tick`] and the binary's
/// key handling, not here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Count down to zero from a given value, then hold (and blink).
    Timer,
    /// Count up from the start value, hours unbounded.
    #[default]
    Stopwatch,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer => f.write_str("timer"),
            Self::Stopwatch => f.write_str("stopwatch"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClockState
// ---------------------------------------------------------------------------

/// The process-wide clock state.
///
/// Created once at startup from the parsed time argument (or from nothing,
/// for a bare stopwatch), ticked once per elapsed wall-clock second, and
/// dropped at exit.
#[derive(Debug, Clone, Copy)]
pub struct ClockState {
    /// The value on display.
    pub time: TimeValue,
    /// Step direction.
    pub mode: Mode,
    /// The user's pause toggle (space bar). Orthogonal to
    /// [`TimeValue::is_zero`] — a paused clock is not "done", and a
    /// finished countdown is not "paused".
    pub stopped: bool,
    /// The digits the clock started from; `reset()` rebuilds from these.
    initial: ParsedDigits,
}

impl ClockState {
    /// Build the startup state. The given digits are both the initial
    /// value and the snapshot that [`reset`](Self::reset) restores.
    #[must_use]
    pub const fn new(mode: Mode, initial: ParsedDigits) -> Self {
        Self {
            time: TimeValue::from_digits(&initial),
            mode,
            stopped: false,
            initial,
        }
    }

    /// Restore the value the clock started with.
    ///
    /// The startup value is itself the snapshot, so reset before any tick
    /// is a no-op.
    pub fn reset(&mut self) {
        self.time = TimeValue::from_digits(&self.initial);
    }

    /// The startup value, formatted — the `-d` label under the clock.
    #[must_use]
    pub fn start_label(&self) -> String {
        TimeValue::from_digits(&self.initial).to_string()
    }

    /// Flip the pause toggle.
    pub const fn toggle_stopped(&mut self) {
        self.stopped = !self.stopped;
    }

    /// One per-second step. Returns whether the value changed.
    ///
    /// Paused clocks do not step. A countdown that has reached zero holds
    /// there — the zero check happens *before* the decrement, because the
    /// decrement itself wraps rather than saturating.
    pub fn tick(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        match self.mode {
            Mode::Timer => {
                if self.time.is_zero() {
                    false
                } else {
                    self.time.decrement();
                    true
                }
            }
            Mode::Stopwatch => {
                self.time.increment();
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
