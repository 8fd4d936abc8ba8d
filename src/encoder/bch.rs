/// BCH codes protecting format info (15,5) and version info (18,6)
pub struct BchEncoder;

/// Format info generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// XOR applied to format info so it is never all zero
const FORMAT_MASK: u16 = 0x5412;
/// Version info generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

impl BchEncoder {
    /// 15-bit format codeword for 5 data bits (EC level bits << 3 | mask)
    pub fn encode_format(data: u8) -> u16 {
        let data = u32::from(data & 0x1F);
        let codeword = (data << 10) | Self::remainder(data, FORMAT_GENERATOR, 10);
        codeword as u16 ^ FORMAT_MASK
    }

    /// 18-bit version codeword for a version number (7-40)
    pub fn encode_version(version: u8) -> u32 {
        let data = u32::from(version & 0x3F);
        (data << 12) | Self::remainder(data, VERSION_GENERATOR, 12)
    }

    /// Remainder of `data * x^degree` divided by `generator`
    fn remainder(data: u32, generator: u32, degree: u32) -> u32 {
        let mut rem = data;
        for _ in 0..degree {
            rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
        }
        rem & ((1 << degree) - 1)
    }
}
