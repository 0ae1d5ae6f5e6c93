//! The local wall clock, sampled as six display digits.
//!
//! The difference mode needs "now" in the same decomposed-digit shape the
//! rest of the crate speaks. Local time comes from `localtime_r` — the
//! standard POSIX interface, and reentrant, unlike `localtime`. No
//! calendar fields are kept; only the time-of-day survives.
#![allow(unsafe_code)]

use crate::digit::N_TIME_DIGITS;

/// Decompose hours/minutes/seconds into the six-digit display order.
fn split(hour: i32, minute: i32, second: i32) -> [i32; N_TIME_DIGITS] {
    [
        hour / 10,
        hour % 10,
        minute / 10,
        minute % 10,
        second / 10,
        second % 10,
    ]
}

/// The current local time-of-day as six digits.
#[cfg(unix)]
#[must_use]
pub fn now_digits() -> [i32; N_TIME_DIGITS] {
    let now: libc::time_t = unsafe { libc::time(std::ptr::null_mut()) };
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    unsafe {
        libc::localtime_r(&raw const now, &raw mut tm);
    }
    split(tm.tm_hour, tm.tm_min, tm.tm_sec)
}

/// Non-unix fallback: UTC time-of-day from the system clock.
#[cfg(not(unix))]
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Day seconds are bounded by 86_400.
pub fn now_digits() -> [i32; N_TIME_DIGITS] {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let day = i64::try_from(secs % 86_400).unwrap_or(0);

    split(
        (day / 3600) as i32,
        (day / 60 % 60) as i32,
        (day % 60) as i32,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
