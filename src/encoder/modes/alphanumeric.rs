/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bitstream::BitBuffer;

const ALPHANUMERIC_TABLE: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Position of `byte` in the 45-symbol alphabet
pub fn value_of(byte: u8) -> Option<u32> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&c| c == byte)
        .map(|i| i as u32)
}

/// Pack alphanumeric data
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Append packed characters to `out`. Every byte must satisfy [`value_of`].
    pub fn encode(text: &[u8], out: &mut BitBuffer) {
        // Bits stay aligned with the character count even for unchecked input
        let value = |c: u8| value_of(c).unwrap_or(0);
        let mut pairs = text.chunks_exact(2);
        for pair in &mut pairs {
            out.append_bits(value(pair[0]) * 45 + value(pair[1]), 11);
        }
        if let [last] = pairs.remainder() {
            out.append_bits(value(*last), 6);
        }
    }
}

/// Bits needed for `chars` characters
pub fn bit_length(chars: usize) -> usize {
    chars / 2 * 11 + (chars % 2) * 6
}
