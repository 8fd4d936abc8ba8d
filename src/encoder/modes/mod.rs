//! QR data mode encoders
//!
//! This module contains packers for the supported QR data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Digits, uppercase letters, space and `$%*+-./:`
//! - Byte: 8-bit data (UTF-8, binary, etc.)

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

use crate::models::Version;

/// Data encoding mode of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Mode 0001
    Numeric,
    /// Mode 0010
    Alphanumeric,
    /// Mode 0100
    Byte,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field, which grows at versions 10 and 27
    pub fn char_count_bits(&self, version: Version) -> usize {
        let ver = version.number();
        let idx = if ver <= 9 {
            0
        } else if ver <= 26 {
            1
        } else {
            2
        };
        match self {
            Mode::Numeric => [10, 12, 14][idx],
            Mode::Alphanumeric => [9, 11, 13][idx],
            Mode::Byte => [8, 16, 16][idx],
        }
    }

    /// Whether `byte` can be carried by this mode
    pub fn accepts(&self, byte: u8) -> bool {
        match self {
            Mode::Numeric => byte.is_ascii_digit(),
            Mode::Alphanumeric => alphanumeric::value_of(byte).is_some(),
            Mode::Byte => true,
        }
    }

    /// Payload bits (excluding indicator and count) for `chars` characters
    pub fn data_bits(&self, chars: usize) -> usize {
        match self {
            Mode::Numeric => numeric::bit_length(chars),
            Mode::Alphanumeric => alphanumeric::bit_length(chars),
            Mode::Byte => byte::bit_length(chars),
        }
    }

    /// The narrowest mode able to carry every byte of `data`
    pub fn narrowest_for(data: &[u8]) -> Mode {
        if data.iter().all(|&b| Mode::Numeric.accepts(b)) {
            Mode::Numeric
        } else if data.iter().all(|&b| Mode::Alphanumeric.accepts(b)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_bits_ranges() {
        let v9 = Version::new(9).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(Mode::Numeric.char_count_bits(v9), 10);
        assert_eq!(Mode::Numeric.char_count_bits(v10), 12);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v27), 13);
        assert_eq!(Mode::Byte.char_count_bits(v9), 8);
        assert_eq!(Mode::Byte.char_count_bits(v27), 16);
    }

    #[test]
    fn test_narrowest_mode() {
        assert_eq!(Mode::narrowest_for(b"0123"), Mode::Numeric);
        assert_eq!(Mode::narrowest_for(b"HELLO WORLD"), Mode::Alphanumeric);
        assert_eq!(Mode::narrowest_for(b"hello"), Mode::Byte);
        assert_eq!(Mode::narrowest_for(b""), Mode::Numeric);
    }
}
