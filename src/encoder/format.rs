//! Format information placement

use crate::encoder::bch::BchEncoder;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Format info is 15 bits (5 data + 10 ECC)
/// Written twice: around the top-left finder, and split between the other two
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Masked 15-bit codeword, bit 14 first in reading order
    pub fn bits(&self) -> u16 {
        let data = (self.ec_level.format_bits() << 3) | self.mask_pattern.bits();
        BchEncoder::encode_format(data)
    }

    /// Write both copies into `matrix`
    pub fn write(&self, matrix: &mut BitMatrix) {
        let bits = self.bits();
        let size = matrix.width();
        let bit = |i: usize| (bits >> i) & 1 != 0;

        // First copy: column 8 going down, then row 8 going left (skipping timing)
        for i in 0..6 {
            matrix.set(8, i, bit(i));
        }
        matrix.set(8, 7, bit(6));
        matrix.set(8, 8, bit(7));
        matrix.set(7, 8, bit(8));
        for i in 9..15 {
            matrix.set(14 - i, 8, bit(i));
        }

        // Second copy: row 8 under the top-right finder, column 8 beside the bottom-left
        for i in 0..8 {
            matrix.set(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            matrix.set(8, size - 15 + i, bit(i));
        }

        // Always dark
        matrix.set(8, size - 8, true);
    }
}
