// SPDX-License-Identifier: MIT
//
// n-tty — Terminal layer for n-timer.
//
// Direct terminal control sized for a clock: raw mode via termios,
// ANSI escape output, a background stdin reader, a once-per-second
// event loop, and the block glyphs the big digits are painted with.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm, ncurses bindings). A 54×7 window repainted once per second
// needs no diff renderer, no mouse protocol, no keyboard enhancement
// handshake — just a raw terminal, a handful of escape codes, and a
// loop that wakes on keypress or second boundary, whichever comes
// first. Every escape code is earned.

pub mod ansi;
pub mod color;
pub mod event_loop;
pub mod glyph;
pub mod input;
pub mod reader;
pub mod screen;
pub mod terminal;
