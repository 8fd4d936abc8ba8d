/// Byte mode encoder (Mode 0100): each byte packed as 8 bits
use crate::encoder::bitstream::BitBuffer;

pub struct ByteEncoder;

impl ByteEncoder {
    pub fn encode(bytes: &[u8], out: &mut BitBuffer) {
        for &byte in bytes {
            out.append_bits(u32::from(byte), 8);
        }
    }
}

pub fn bit_length(chars: usize) -> usize {
    chars * 8
}
