// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the once-per-second heartbeat.
//
// The loop blocks on the stdin channel with a timeout equal to the time
// left until the next second boundary. Three behaviors fall out of that
// one call:
//
//   1. **Instant response**: a keypress arrives on the channel and is
//      handled immediately, mid-second.
//
//   2. **Zero CPU idle**: with no input, `recv_timeout` parks the
//      thread until the boundary. A clock that repaints once a second
//      should cost nothing in between.
//
//   3. **Ticks on the second**: the timeout expires exactly when the
//      next tick is due, so the displayed value steps on whole-second
//      boundaries instead of drifting with input activity.
//
// # Signals
//
// Terminal resize (SIGWINCH) and interruption (SIGINT/SIGTERM) are
// delivered as flags: the handlers store into an `AtomicBool` — one of
// the few things a signal handler may legally do — and the loop checks
// both flags once per iteration. Nothing re-enters the renderer or
// mutates clock state from handler context; a resize becomes an
// explicit re-measure + repaint at the top of the loop, and an
// interrupt becomes an orderly return through terminal restore.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::input::{Key, KeyDecoder};
use crate::reader::InputReader;
use crate::screen::Screen;
use crate::terminal::{Size, Terminal};

/// One clock tick.
const TICK: Duration = Duration::from_secs(1);

// ─── Signal flags ───────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler; drained once per loop iteration.
static RESIZE_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Set by the SIGINT/SIGTERM handler; ends the loop at the next
/// iteration boundary.
static INTERRUPT_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_signal_handlers() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);

        sa.sa_sigaction = resize_handler as *const () as usize;
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());

        sa.sa_sigaction = interrupt_handler as *const () as usize;
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn resize_handler(_sig: libc::c_int) {
    RESIZE_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(unix)]
extern "C" fn interrupt_handler(_sig: libc::c_int) {
    INTERRUPT_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_signal_handlers() {}

// ─── App trait ──────────────────────────────────────────────────────────────

/// What the application tells the loop after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Exit the loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Only [`paint`](App::paint) is required; the rest default to no-ops.
/// The loop calls, per iteration: `on_key` for each decoded key,
/// `on_resize` when the terminal size changed, `on_tick` once per
/// elapsed second, and `paint` when anything marked the frame dirty.
pub trait App {
    /// Handle one decoded key. Return [`Action::Quit`] to exit.
    fn on_key(&mut self, _key: &Key) -> Action {
        Action::Continue
    }

    /// The terminal was resized; the screen has been cleared already.
    fn on_resize(&mut self, _size: Size) {}

    /// One second elapsed. Return `true` if a repaint is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the current state.
    ///
    /// # Errors
    ///
    /// Propagated out of the loop, which restores the terminal first.
    fn paint(&mut self, screen: &mut Screen, size: Size) -> io::Result<()>;
}

// ─── EventLoop ──────────────────────────────────────────────────────────────

/// The terminal event loop: owns the terminal, the key decoder, and the
/// frame buffer. [`run`](Self::run) returns when the app quits, stdin
/// closes, or an interrupt lands.
pub struct EventLoop {
    terminal: Terminal,
    decoder: KeyDecoder,
    screen: Screen,
}

impl EventLoop {
    /// Create the loop and size up the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            decoder: KeyDecoder::new(),
            screen: Screen::new(),
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the app returns [`Action::Quit`], stdin closes, or
    /// SIGINT/SIGTERM arrives. Enters raw mode and the alternate screen
    /// on the way in; restores the terminal on the way out, error or not.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal control or painting fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_signal_handlers();

        let (mut reader, rx) = InputReader::spawn();

        let result = self.run_inner(app, &rx);

        // Always clean up, even if the loop errored.
        reader.stop();
        self.terminal.leave()?;

        result
    }

    /// The inner loop, separated so cleanup runs regardless of outcome.
    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let mut size = self.terminal.size();
        let mut dirty = true; // First frame always paints.
        let mut next_tick = Instant::now() + TICK;

        loop {
            // ── Wait for input, at most until the next tick ──────
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(bytes) => {
                    for key in self.decoder.advance(&bytes) {
                        if app.on_key(&key) == Action::Quit {
                            return Ok(());
                        }
                        dirty = true;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Quiet wire: a pending lone ESC is the Escape key.
                    if self.decoder.has_pending() {
                        for key in self.decoder.flush() {
                            if app.on_key(&key) == Action::Quit {
                                return Ok(());
                            }
                            dirty = true;
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    // Reader thread died (EOF) — exit gracefully.
                    return Ok(());
                }
            }

            // ── Cooperative signal checks ────────────────────────
            if INTERRUPT_RECEIVED.swap(false, Ordering::Relaxed) {
                return Ok(());
            }

            if RESIZE_RECEIVED.swap(false, Ordering::Relaxed) {
                size = self.terminal.refresh_size();
                self.screen.clear()?;
                app.on_resize(size);
                dirty = true;
            }

            // ── Tick on the second boundary ──────────────────────
            let now = Instant::now();
            if now >= next_tick {
                if app.on_tick() {
                    dirty = true;
                }
                // Skip boundaries lost to a suspend instead of
                // replaying them in a burst.
                while next_tick <= now {
                    next_tick += TICK;
                }
            }

            // ── Paint if anything changed ────────────────────────
            if dirty {
                app.paint(&mut self.screen, size)?;
                self.screen.flush()?;
                dirty = false;
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
