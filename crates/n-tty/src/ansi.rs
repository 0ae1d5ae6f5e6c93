// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write` — the
// byte-level encoding of every terminal command the clock needs, and
// nothing else. When to emit is the `Screen`'s business.
//
// Cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI CUP is 1-based).
//
// All functions return `io::Result` propagated from the underlying
// writer. In practice they never fail when writing to the `Screen`'s
// buffer (backed by a Vec).

use std::io::{self, Write};

use crate::color::Color;

// ─── Cursor ─────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ─────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Switch to the alternate screen buffer.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Return to the normal screen buffer.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ─────────────────────────────────────────────────────────────────

/// Set the foreground color; `None` is the terminal's default (SGR 39).
#[inline]
pub fn fg(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    match color {
        Some(c) => write!(w, "\x1b[{}m", 30 + u16::from(c.code())),
        None => w.write_all(b"\x1b[39m"),
    }
}

/// Set the background color; `None` is the terminal's default (SGR 49).
#[inline]
pub fn bg(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    match color {
        Some(c) => write!(w, "\x1b[{}m", 40 + u16::from(c.code())),
        None => w.write_all(b"\x1b[49m"),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
