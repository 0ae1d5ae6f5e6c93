// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background stdin reader — keypresses off a blocking fd.
//
// `read()` on stdin blocks, and the event loop must keep ticking the
// clock once per second whether or not the user touches the keyboard.
// So a dedicated thread owns the blocking read and forwards byte chunks
// over a channel; the loop then waits on `recv_timeout` with the time
// left until the next second boundary.
//
// Shutdown is cooperative: the thread `poll()`s stdin with a short
// timeout and checks a stop flag between polls, so `stop()` never waits
// on a read that may never return.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Read buffer size. A keypress is 1–6 bytes; a clock receives
/// keypresses, not pastes.
const READ_BUF_SIZE: usize = 64;

/// Poll interval between stop-flag checks (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

/// Handle to the reader thread.
///
/// Spawn with [`spawn`](Self::spawn); the thread runs until [`stop`]
/// is called or the handle is dropped. The channel closes on EOF or
/// shutdown.
///
/// [`stop`]: Self::stop
pub struct InputReader {
    /// Thread handle, `None` once joined.
    handle: Option<JoinHandle<()>>,
    /// Shared stop flag.
    stop: Arc<AtomicBool>,
}

impl InputReader {
    /// Spawn the reader thread. Each received `Vec<u8>` is a non-empty
    /// chunk of raw stdin bytes.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a thread.
    #[must_use]
    pub fn spawn() -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("stdin-reader".into())
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        match read_chunk() {
                            ReadOutcome::Data(chunk) => {
                                if tx.send(chunk).is_err() {
                                    break; // Receiver dropped.
                                }
                            }
                            ReadOutcome::Idle => {}
                            ReadOutcome::Closed => break,
                        }
                    }
                })
                .expect("failed to spawn stdin reader thread")
        };

        (
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        )
    }

    /// Signal the thread to stop and join it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll-and-read round on stdin.
enum ReadOutcome {
    /// Bytes arrived.
    Data(Vec<u8>),
    /// Poll timed out — check the stop flag and go again.
    Idle,
    /// EOF or error — the reader is done.
    Closed,
}

#[cfg(unix)]
fn read_chunk() -> ReadOutcome {
    use std::io;
    use std::os::unix::io::AsRawFd;

    let fd = io::stdin().as_raw_fd();

    let ready = unsafe {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
    };
    if ready <= 0 {
        return ReadOutcome::Idle;
    }

    let mut buf = [0u8; READ_BUF_SIZE];
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n <= 0 {
        return ReadOutcome::Closed;
    }

    #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
    ReadOutcome::Data(buf[..n as usize].to_vec())
}

/// Non-unix fallback: a plain blocking read, so shutdown may lag until
/// the next keypress. Functional, not graceful.
#[cfg(not(unix))]
fn read_chunk() -> ReadOutcome {
    use std::io::Read;

    let mut buf = [0u8; READ_BUF_SIZE];
    match std::io::stdin().lock().read(&mut buf) {
        Ok(0) | Err(_) => ReadOutcome::Closed,
        Ok(n) => ReadOutcome::Data(buf[..n].to_vec()),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
