/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bitstream::BitBuffer;

pub struct NumericEncoder;

impl NumericEncoder {
    /// Append packed digits to `out`. `digits` must be ASCII `0`-`9`.
    pub fn encode(digits: &[u8], out: &mut BitBuffer) {
        for group in digits.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d.wrapping_sub(b'0').min(9)));
            out.append_bits(value, group.len() * 3 + 1);
        }
    }
}

/// Bits needed for `chars` digits
pub fn bit_length(chars: usize) -> usize {
    chars / 3 * 10
        + match chars % 3 {
            1 => 4,
            2 => 7,
            _ => 0,
        }
}
