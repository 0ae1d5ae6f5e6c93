//! Digit-wise time differences with the 24-hour fold — the `-t` path.
//!
//! Subtraction runs over the six digits from least significant upward,
//! borrowing when the subtrahend digit exceeds the minuend digit. The
//! borrow amount depends on the digit's place: a ones digit borrows 10
//! from its tens neighbor, but a tens-of-seconds or tens-of-minutes digit
//! borrows **6** from the field above it, because those digits only range
//! 0–5. The asymmetry is the sexagesimal field structure itself — do not
//! "generalize" it to a uniform base.
//!
//! Hour digits have nothing above them to cap the borrow: a negative
//! result digit there is the signal that the whole difference is
//! negative, i.e. the reference time-of-day is earlier than now. In that
//! case the difference is recomputed the other way around and subtracted
//! from 24:00:00 — folding it into "time remaining until the reference
//! next occurs, wrapping past midnight".

use crate::digit::{DigitPair, N_TIME_DIGITS, ParsedDigits};
use crate::time::TimeValue;

/// 24:00:00 as six digits — the fold constant.
const FULL_DAY: [i32; N_TIME_DIGITS] = [2, 4, 0, 0, 0, 0];

/// Digit-wise `minuend - subtrahend` with place-dependent borrows.
///
/// Positions (display order): `[hour-tens, hour-ones, minute-tens,
/// minute-ones, second-tens, second-ones]`. Every position below the
/// hour-tens digit borrows from its left neighbor; the hour-tens digit
/// simply goes negative when the subtrahend wins overall.
fn subtract(mut minuend: [i32; N_TIME_DIGITS], subtrahend: [i32; N_TIME_DIGITS]) -> [i32; N_TIME_DIGITS] {
    let mut diff = [0; N_TIME_DIGITS];

    // Second ones: borrow 10 from second tens.
    while subtrahend[5] > minuend[5] {
        minuend[4] -= 1;
        minuend[5] += 10;
    }
    diff[5] = minuend[5] - subtrahend[5];

    // Second tens ranges 0–5: borrow 6 from minute ones.
    while subtrahend[4] > minuend[4] {
        minuend[3] -= 1;
        minuend[4] += 6;
    }
    diff[4] = minuend[4] - subtrahend[4];

    // Minute ones: borrow 10 from minute tens.
    while subtrahend[3] > minuend[3] {
        minuend[2] -= 1;
        minuend[3] += 10;
    }
    diff[3] = minuend[3] - subtrahend[3];

    // Minute tens ranges 0–5: borrow 6 from hour ones.
    while subtrahend[2] > minuend[2] {
        minuend[1] -= 1;
        minuend[2] += 6;
    }
    diff[2] = minuend[2] - subtrahend[2];

    // Hour ones: borrow 10 from hour tens.
    while subtrahend[1] > minuend[1] {
        minuend[0] -= 1;
        minuend[1] += 10;
    }
    diff[1] = minuend[1] - subtrahend[1];

    // Hour tens: no borrow left — may go negative.
    diff[0] = minuend[0] - subtrahend[0];

    diff
}

/// The filled six-digit array for a parsed reference time.
fn to_digit_array(parsed: &ParsedDigits) -> [i32; N_TIME_DIGITS] {
    let pairs = [parsed.hours(), parsed.minutes(), parsed.seconds()];
    let mut out = [0; N_TIME_DIGITS];
    for (i, pair) in pairs.iter().enumerate() {
        out[i * 2] = i32::from(pair.tens);
        out[i * 2 + 1] = i32::from(pair.ones);
    }
    out
}

/// Duration from `now` until the reference time-of-day, folded to a
/// positive same-day value.
///
/// `reference - now` when the reference is still ahead today; otherwise
/// `24:00:00 - (now - reference)` — the time until the reference recurs
/// tomorrow. Equal operands yield `00:00:00`.
#[must_use]
pub fn time_until(reference: &ParsedDigits, now: [i32; N_TIME_DIGITS]) -> TimeValue {
    let reference = to_digit_array(reference);

    let mut diff = subtract(reference, now);
    if diff.iter().any(|&d| d < 0) {
        diff = subtract(FULL_DAY, subtract(now, reference));
    }

    // All digits are non-negative and single-digit after the fold.
    let digit = |d: i32| u8::try_from(d).unwrap_or(0);
    TimeValue {
        hours: DigitPair::new(digit(diff[0]), digit(diff[1])),
        minutes: DigitPair::new(digit(diff[2]), digit(diff[3])),
        seconds: DigitPair::new(digit(diff[4]), digit(diff[5])),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
