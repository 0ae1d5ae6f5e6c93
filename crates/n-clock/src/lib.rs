//! # n-clock — the time-value core of n-timer
//!
//! Everything here is the arithmetic behind the display: clock values kept
//! as decomposed decimal digits, per-second increment/decrement with carry
//! and borrow, the parsing grammar for `hh:mm:ss` arguments, and the
//! digit-wise difference between a reference time-of-day and now.
//!
//! # Architecture
//!
//! ```text
//! digit.rs:  DigitPair + ParsedDigits — one clock field as (tens, ones),
//!            and the parse / field-filling grammar
//!     │
//!     ▼
//! time.rs:   TimeValue — three digit pairs, odometer-style step up/down
//!     │
//!     ▼
//! state.rs:  Mode + ClockState — the one struct the main loop owns,
//!            ticked once per wall-clock second
//!
//! span.rs:   digit-wise subtraction with the 24-hour fold (the `-t` path)
//! wall.rs:   local time-of-day sampled as six digits
//! ```
//!
//! The crate is deliberately free of terminal concerns. Rendering, input,
//! and signals live in `n-tty`; this crate only ever hands back values and
//! formatted strings. Every operation past startup parsing is total — the
//! per-second loop has no error paths.

pub mod digit;
pub mod span;
pub mod state;
pub mod time;
pub mod wall;

pub use digit::{DigitPair, ParseError, ParsedDigits};
pub use state::{ClockState, Mode};
pub use time::TimeValue;
