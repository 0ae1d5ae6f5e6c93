// SPDX-License-Identifier: MIT
//
// Keyboard input decoding.
//
// The clock consumes exactly three kinds of key: printable characters
// (`q`, `r`, space, the color digits), control bytes (Ctrl-C must quit,
// because raw mode turns ISIG off and nobody else will), and Escape.
// Arrow keys, function keys and the rest of the CSI zoo are recognized
// only far enough to be swallowed whole — half a `CSI A` leaking into
// the key stream as a stray `A` would look like a keypress.
//
// Escape sequences can split across `read()` calls, so the decoder
// keeps undecoded bytes pending. A lone ESC is ambiguous — the Escape
// key, or the head of a sequence still in flight — and is resolved by
// [`KeyDecoder::flush`], which the event loop calls when its receive
// times out with nothing more on the wire.

// ─── Key ────────────────────────────────────────────────────────────────────

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (UTF-8 aware).
    Char(char),
    /// A control byte, named by its letter: 0x03 is `Ctrl('c')`.
    Ctrl(char),
    /// The Escape key.
    Escape,
}

// ─── KeyDecoder ─────────────────────────────────────────────────────────────

/// Incremental byte-stream to key decoder.
///
/// Feed chunks with [`advance`](Self::advance); call
/// [`flush`](Self::flush) after a quiet timeout to resolve a pending
/// lone ESC into a real Escape keypress.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    /// Bytes received but not yet decoded (truncated sequences).
    buf: Vec<u8>,
}

impl KeyDecoder {
    /// A decoder with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Whether undecoded bytes are pending (a sequence still in flight).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Feed bytes, returning every key completed by them.
    pub fn advance(&mut self, bytes: &[u8]) -> Vec<Key> {
        self.buf.extend_from_slice(bytes);
        self.drain(false)
    }

    /// Decode what's pending as if no more bytes are coming: a lone ESC
    /// becomes [`Key::Escape`], truncated sequences are discarded.
    pub fn flush(&mut self) -> Vec<Key> {
        self.drain(true)
    }

    fn drain(&mut self, at_timeout: bool) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut i = 0;

        while i < self.buf.len() {
            let b = self.buf[i];
            match b {
                0x1b => match self.buf.get(i + 1) {
                    // ESC with nothing after it yet: Escape on timeout,
                    // otherwise wait for the rest.
                    None => {
                        if at_timeout {
                            keys.push(Key::Escape);
                            i += 1;
                        } else {
                            break;
                        }
                    }
                    // CSI / SS3 — swallow through the final byte.
                    Some(&b'[' | &b'O') => {
                        let mut j = i + 2;
                        while j < self.buf.len() && !(0x40..=0x7e).contains(&self.buf[j]) {
                            j += 1;
                        }
                        if j < self.buf.len() {
                            i = j + 1;
                        } else if at_timeout {
                            i = self.buf.len();
                        } else {
                            break;
                        }
                    }
                    // ESC followed by anything else: the Escape key,
                    // then decode the rest normally.
                    Some(_) => {
                        keys.push(Key::Escape);
                        i += 1;
                    }
                },
                // Control bytes, named by letter (0x03 → Ctrl('c')).
                0x01..=0x1a => {
                    keys.push(Key::Ctrl(char::from(b'a' + b - 1)));
                    i += 1;
                }
                // NUL, the 0x1c–0x1f leftovers, and DEL: nothing the
                // clock answers to.
                0x00 | 0x1c..=0x1f | 0x7f => {
                    i += 1;
                }
                // Printable — possibly a multi-byte UTF-8 scalar.
                _ => {
                    let width = utf8_width(b);
                    if i + width > self.buf.len() {
                        if at_timeout {
                            i = self.buf.len(); // Truncated scalar; drop it.
                        } else {
                            break;
                        }
                    } else {
                        if let Ok(s) = std::str::from_utf8(&self.buf[i..i + width]) {
                            if let Some(ch) = s.chars().next() {
                                keys.push(Key::Char(ch));
                            }
                        }
                        i += width;
                    }
                }
            }
        }

        self.buf.drain(..i);
        keys
    }
}

/// Expected byte length of a UTF-8 scalar from its first byte.
const fn utf8_width(b: u8) -> usize {
    match b {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_characters() {
        let mut d = KeyDecoder::new();
        assert_eq!(
            d.advance(b"qR 5"),
            vec![
                Key::Char('q'),
                Key::Char('R'),
                Key::Char(' '),
                Key::Char('5'),
            ]
        );
        assert!(!d.has_pending());
    }

    #[test]
    fn control_bytes_are_named_by_letter() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(&[0x03]), vec![Key::Ctrl('c')]);
        assert_eq!(d.advance(&[0x01]), vec![Key::Ctrl('a')]);
    }

    #[test]
    fn lone_esc_waits_for_timeout() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(&[0x1b]), vec![]);
        assert!(d.has_pending());
        assert_eq!(d.flush(), vec![Key::Escape]);
        assert!(!d.has_pending());
    }

    #[test]
    fn csi_sequences_are_swallowed() {
        let mut d = KeyDecoder::new();
        // Up arrow, then a real key.
        assert_eq!(d.advance(b"\x1b[Aq"), vec![Key::Char('q')]);
    }

    #[test]
    fn split_csi_sequence_stays_pending() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(b"\x1b["), vec![]);
        assert!(d.has_pending());
        assert_eq!(d.advance(b"B"), vec![]);
        assert!(!d.has_pending());
    }

    #[test]
    fn truncated_csi_is_discarded_on_flush() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(b"\x1b[1"), vec![]);
        assert_eq!(d.flush(), vec![]);
        assert!(!d.has_pending());
    }

    #[test]
    fn esc_then_character_is_escape_plus_key() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(b"\x1bq"), vec![Key::Escape, Key::Char('q')]);
    }

    #[test]
    fn multibyte_character_decodes() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance("é".as_bytes()), vec![Key::Char('é')]);
    }

    #[test]
    fn split_multibyte_character_reassembles() {
        let bytes = "é".as_bytes();
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(&bytes[..1]), vec![]);
        assert!(d.has_pending());
        assert_eq!(d.advance(&bytes[1..]), vec![Key::Char('é')]);
    }

    #[test]
    fn del_and_nul_are_ignored() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.advance(&[0x7f, 0x00]), vec![]);
    }
}
