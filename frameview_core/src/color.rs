// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 24-bit RGB colors.

use core::fmt;

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses exactly six hex digits (`rrggbb`, no prefix).
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() != 6 {
            return None;
        }
        let channel =
            |i: usize| -> Option<u8> { Some((hex_digit(b[i])? << 4) | hex_digit(b[i + 1])?) };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Widens each channel to 16 bits (`0xff` becomes `0xffff`).
    #[inline]
    #[must_use]
    pub const fn to_u16(self) -> [u16; 3] {
        [
            self.red as u16 * 257,
            self.green as u16 * 257,
            self.blue as u16 * 257,
        ]
    }
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn parses_hex() {
        assert_eq!(Rgb::from_hex("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("00FFaa"), Some(Rgb::new(0, 255, 170)));
        assert_eq!(Rgb::from_hex("ff800"), None);
        assert_eq!(Rgb::from_hex("gg0000"), None);
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
    }

    #[test]
    fn widens_to_u16() {
        assert_eq!(Rgb::new(255, 1, 0).to_u16(), [0xffff, 257, 0]);
    }
}
