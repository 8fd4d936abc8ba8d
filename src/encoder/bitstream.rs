/// Data bitstream construction: segment headers, payload bits, terminator and padding
use crate::encoder::segment::Segment;
use crate::encoder::tables::num_data_codewords;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// Pad codewords appended alternately once the payload and terminator are written
pub const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Growable MSB-first bit sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        for i in (0..count).rev() {
            self.push((value >> i) & 1 != 0);
        }
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Bit at `index`, MSB-first
    pub fn get(&self, index: usize) -> bool {
        index < self.len && (self.bytes[index / 8] >> (7 - index % 8)) & 1 != 0
    }

    /// Bytes written so far; a trailing partial byte is zero-filled
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Render as a string of `0`/`1`, handy in tests and debug output
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }
}

/// Total bits the segments occupy at `version`, headers included
pub fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|seg| seg.encoded_bits(version)).sum()
}

/// Pack segments into exactly the data codeword count of `version`/`ec_level`.
///
/// Writes each segment's mode indicator, character count and payload, then up to
/// four terminator zeros, zero bits to the next byte boundary and alternating
/// [`PAD_CODEWORDS`] until the capacity is filled.
///
/// `version` is taken as fixed: segments that do not fit it fail with
/// [`EncodeError::InvalidVersionOverride`]. Automatic version selection
/// ([`QrEncoder::choose_version`](crate::encoder::qr_encoder::QrEncoder::choose_version))
/// reports [`EncodeError::CapacityExceeded`] before packing is reached. A segment
/// holding a byte its mode cannot carry fails with
/// [`EncodeError::InvalidCharacterForMode`].
pub fn pack_data_codewords(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, EncodeError> {
    for seg in segments {
        seg.validate()?;
    }

    let capacity_bytes = num_data_codewords(version, ec_level)
        .ok_or(EncodeError::MalformedSegmentTable { version, ec_level })?;
    let capacity_bits = capacity_bytes * 8;

    let required_bits = total_bits(segments, version);
    if required_bits > capacity_bits || !segments.iter().all(|s| s.fits_count_field(version)) {
        return Err(EncodeError::InvalidVersionOverride {
            version,
            required_bits,
            capacity_bits,
        });
    }

    let mut bb = BitBuffer::with_capacity(capacity_bits);
    for seg in segments {
        seg.write_to(&mut bb, version);
    }
    debug_assert_eq!(bb.len(), required_bits);

    // Terminator may be truncated when the payload ends within 4 bits of capacity
    let terminator = (capacity_bits - bb.len()).min(4);
    bb.append_bits(0, terminator);
    let to_boundary = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, to_boundary);

    for &pad in PAD_CODEWORDS.iter().cycle() {
        if bb.len() >= capacity_bits {
            break;
        }
        bb.append_bits(u32::from(pad), 8);
    }

    let codewords = bb.into_bytes();
    if codewords.len() != capacity_bytes {
        return Err(EncodeError::MalformedSegmentTable { version, ec_level });
    }
    Ok(codewords)
}
