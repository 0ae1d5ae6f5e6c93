//! The clock value — three digit pairs stepped once per second.
//!
//! A [`TimeValue`] is agnostic about what it represents: a countdown
//! remainder, a stopwatch total, or a wall-clock time-of-day all use the
//! same three pairs. The mode logic in [`state`](crate::state) decides
//! which direction it steps.
//!
//! Both step operations are total functions with pure wraparound — no
//! saturation, no error paths. The countdown caller checks
//! [`is_zero`](TimeValue::is_zero) *before* stepping to stop at zero;
//! decrementing straight through zero wraps.

use std::fmt;

use crate::digit::{DigitPair, ParsedDigits};

// ---------------------------------------------------------------------------
// TimeValue
// ---------------------------------------------------------------------------

/// A clock value: hours, minutes, seconds, each as a [`DigitPair`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeValue {
    /// Hours. Unbounded above in stopwatch use.
    pub hours: DigitPair,
    /// Minutes, 0–59 when well-formed.
    pub minutes: DigitPair,
    /// Seconds, 0–59 when well-formed.
    pub seconds: DigitPair,
}

impl TimeValue {
    /// `00:00:00`.
    pub const ZERO: Self = Self {
        hours: DigitPair::new(0, 0),
        minutes: DigitPair::new(0, 0),
        seconds: DigitPair::new(0, 0),
    };

    /// Build a value from parsed digits, filling each field independently
    /// per [`DigitPair::fill`].
    #[must_use]
    pub const fn from_digits(parsed: &ParsedDigits) -> Self {
        Self {
            hours: parsed.hours(),
            minutes: parsed.minutes(),
            seconds: parsed.seconds(),
        }
    }

    /// True iff all six digits are zero.
    ///
    /// A query, not a mutation — and not the same thing as "stopped",
    /// which is the user's pause toggle in
    /// [`ClockState`](crate::state::ClockState).
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.hours.tens == 0
            && self.hours.ones == 0
            && self.minutes.tens == 0
            && self.minutes.ones == 0
            && self.seconds.tens == 0
            && self.seconds.ones == 0
    }

    /// Step one second down, odometer-style.
    ///
    /// Borrow propagates seconds → minutes → hours. Minutes and seconds
    /// wrap 0 → 59 on borrow. Hours also wrap 0 → 59, not 0 → 23 — so
    /// `00:00:00` steps to `59:59:59`. See DESIGN.md; this is shipped
    /// behavior, kept literally pending product review.
    pub fn decrement(&mut self) {
        let mut seconds = self.seconds.value();
        let mut minutes = self.minutes.value();
        let mut hours = self.hours.value();

        if minutes == 0 && seconds == 0 {
            hours = if hours == 0 { 59 } else { hours - 1 };
        }
        if seconds == 0 {
            minutes = if minutes == 0 { 59 } else { minutes - 1 };
        }
        seconds = if seconds == 0 { 59 } else { seconds - 1 };

        self.hours = DigitPair::from_value(hours);
        self.minutes = DigitPair::from_value(minutes);
        self.seconds = DigitPair::from_value(seconds);
    }

    /// Step one second up.
    ///
    /// Seconds carry into minutes at 59, minutes into hours when both
    /// roll in the same tick. Hours have no modulus — a stopwatch runs
    /// past `24:00:00` and past `99:00:00` without complaint.
    pub fn increment(&mut self) {
        let mut seconds = self.seconds.value();
        let mut minutes = self.minutes.value();
        let mut hours = self.hours.value();

        if seconds == 59 {
            seconds = 0;
            if minutes == 59 {
                minutes = 0;
                hours += 1;
            } else {
                minutes += 1;
            }
        } else {
            seconds += 1;
        }

        self.hours = DigitPair::from_value(hours);
        self.minutes = DigitPair::from_value(minutes);
        self.seconds = DigitPair::from_value(seconds);
    }
}

/// Fixed `hh:mm:ss` rendering — digit characters joined by colons.
///
/// Digits past 9 render as the next ASCII characters after `'9'`; the
/// stopwatch accepts that artifact once hours outgrow two digits rather
/// than reflowing the layout.
impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(8);
        for (i, pair) in [self.hours, self.minutes, self.seconds].iter().enumerate() {
            if i > 0 {
                out.push(':');
            }
            out.push(char::from(b'0'.wrapping_add(pair.tens)));
            out.push(char::from(b'0'.wrapping_add(pair.ones)));
        }
        f.write_str(&out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
