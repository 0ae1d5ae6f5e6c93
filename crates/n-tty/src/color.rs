// SPDX-License-Identifier: MIT
//
// The eight standard terminal colors, by name and by number.
//
// The clock draws its digits as runs of background-colored blanks, so
// "color" here means one of the eight ANSI palette entries every
// terminal has had since the VT days — no 256-color palette, no
// TrueColor. The `-C` flag resolves a name at startup; the digit keys
// 0–7 switch entries at runtime.

use std::fmt;

// ─── Color ──────────────────────────────────────────────────────────────────

/// One of the eight standard ANSI colors.
///
/// Discriminants are the SGR palette numbers: add 30 for foreground,
/// 40 for background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// The ANSI palette number, 0–7.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a color by name, case-insensitively.
    ///
    /// Returns `None` for anything outside the eight canonical names —
    /// the caller turns that into its own diagnostic.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            _ => return None,
        })
    }

    /// The color behind a runtime color key, `0`–`7`.
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        Some(match digit {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            7 => Self::White,
            _ => return None,
        })
    }

    /// All recognized names, in palette order — for the usage text.
    #[must_use]
    pub const fn names() -> &'static [&'static str] {
        &[
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
        ]
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::names()[self as usize]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_ansi_palette() {
        assert_eq!(Color::Black.code(), 0);
        assert_eq!(Color::Green.code(), 2);
        assert_eq!(Color::White.code(), 7);
    }

    #[test]
    fn all_names_resolve() {
        for (i, name) in Color::names().iter().enumerate() {
            let color = Color::from_name(name).expect("canonical name must resolve");
            assert_eq!(usize::from(color.code()), i);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Color::from_name("GREEN"), Color::from_name("green"));
        assert_eq!(Color::from_name("MaGeNtA"), Some(Color::Magenta));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Color::from_name("purple"), None);
        assert_eq!(Color::from_name(""), None);
        assert_eq!(Color::from_name("greenish"), None);
    }

    #[test]
    fn digit_keys_cover_the_palette() {
        for d in 0..8 {
            let color = Color::from_digit(d).expect("0-7 must map to a color");
            assert_eq!(color.code(), d);
        }
        assert_eq!(Color::from_digit(8), None);
        assert_eq!(Color::from_digit(255), None);
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Color::Yellow.to_string(), "yellow");
    }
}
