//! Minimal reader for clean, axis-aligned symbols.
//!
//! Only trusts the encoder for function-pattern geometry and block tables; format
//! decoding, unmasking, zigzag traversal, Reed-Solomon checking and segment parsing
//! are done independently here.

use rust_qr_gen::encoder::function_mask::FunctionMask;
use rust_qr_gen::encoder::tables::block_layout;
use rust_qr_gen::{BitMatrix, ECLevel, Mode, Version};

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Everything recovered from a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: u8,
    pub data_codewords: Vec<u8>,
    pub modes: Vec<Mode>,
    pub payload: Vec<u8>,
}

/// Read a symbol from its module matrix.
pub fn read(matrix: &BitMatrix) -> Result<Decoded, String> {
    let size = matrix.width();
    if size < 21 || (size - 17) % 4 != 0 || matrix.height() != size {
        return Err(format!("bad symbol size {size}"));
    }
    let version = Version::new(((size - 17) / 4) as u8).ok_or("version out of range")?;

    let (ec_level, mask) = read_format(matrix)?;
    if version.has_version_info() {
        check_version_info(matrix, version)?;
    }

    let func = FunctionMask::new(version);
    let bits = read_zigzag(matrix, &func, mask);

    let layout = block_layout(version, ec_level).ok_or("no block layout")?;
    let total = layout.total_codewords();
    if bits.len() < total * 8 {
        return Err(format!("only {} data bits for {} codewords", bits.len(), total));
    }
    if bits[total * 8..].iter().any(|&b| b) {
        return Err("remainder bits are not zero".into());
    }
    let codewords: Vec<u8> = bits[..total * 8]
        .chunks(8)
        .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();

    let data_codewords = deinterleave(&codewords, &layout)?;
    let (modes, payload) = parse_segments(&data_codewords, version)?;

    Ok(Decoded {
        version,
        ec_level,
        mask,
        data_codewords,
        modes,
        payload,
    })
}

fn format_codeword(data: u16) -> u16 {
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | (rem & 0x3FF)) ^ 0x5412
}

fn version_codeword(version: u32) -> u32 {
    let mut rem = version;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    (version << 12) | (rem & 0xFFF)
}

/// Read both format copies, require them to agree exactly, and decode.
fn read_format(matrix: &BitMatrix) -> Result<(ECLevel, u8), String> {
    let size = matrix.width();
    let mut first = 0u16;
    let mut second = 0u16;
    for i in 0..15 {
        let (x1, y1) = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let (x2, y2) = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
        first |= (matrix.get(x1, y1) as u16) << i;
        second |= (matrix.get(x2, y2) as u16) << i;
    }
    if first != second {
        return Err(format!("format copies differ: {first:015b} vs {second:015b}"));
    }
    if !matrix.get(8, size - 8) {
        return Err("dark module missing".into());
    }
    let data = (0..32u16)
        .find(|&d| format_codeword(d) == first)
        .ok_or_else(|| format!("format bits {first:015b} are not a valid codeword"))?;
    Ok((ECLevel::from_format_bits((data >> 3) as u8), (data & 7) as u8))
}

fn check_version_info(matrix: &BitMatrix, version: Version) -> Result<(), String> {
    let size = matrix.width();
    let mut top_right = 0u32;
    let mut bottom_left = 0u32;
    for i in 0..18 {
        top_right |= (matrix.get(size - 11 + i % 3, i / 3) as u32) << i;
        bottom_left |= (matrix.get(i / 3, size - 11 + i % 3) as u32) << i;
    }
    let expected = version_codeword(u32::from(version.number()));
    if top_right != expected || bottom_left != expected {
        return Err(format!(
            "version info {top_right:018b}/{bottom_left:018b}, expected {expected:018b}"
        ));
    }
    Ok(())
}

fn mask_bit(mask: u8, row: usize, col: usize) -> bool {
    let (i, j) = (row, col);
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}

/// Unmasked data bits in placement order, right column first in each pair.
fn read_zigzag(matrix: &BitMatrix, func: &FunctionMask, mask: u8) -> Vec<bool> {
    let size = matrix.width();
    let mut bits = Vec::new();
    let mut upward = true;
    let mut col = size as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        let rows: Vec<usize> = if upward {
            (0..size).rev().collect()
        } else {
            (0..size).collect()
        };
        for row in rows {
            for c in [col as usize, col as usize - 1] {
                if !func.is_function(c, row) {
                    bits.push(matrix.get(c, row) ^ mask_bit(mask, row, c));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    bits
}

fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1D;
        }
        b >>= 1;
    }
    product
}

/// All syndromes S_i = c(alpha^i), i in 0..ecc, must vanish.
fn syndromes_vanish(block: &[u8], ecc: usize) -> bool {
    let mut alpha_i = 1u8;
    for _ in 0..ecc {
        let value = block.iter().fold(0u8, |acc, &c| gf_mul(acc, alpha_i) ^ c);
        if value != 0 {
            return false;
        }
        alpha_i = gf_mul(alpha_i, 2);
    }
    true
}

fn deinterleave(
    codewords: &[u8],
    layout: &rust_qr_gen::encoder::tables::BlockLayout,
) -> Result<Vec<u8>, String> {
    let n = layout.num_blocks();
    let mut blocks: Vec<Vec<u8>> = (0..n).map(|_| Vec::new()).collect();
    let mut idx = 0;

    for i in 0..layout.long_data_len() {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < layout.data_len(b) {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }
    for _ in 0..layout.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(codewords[idx]);
            idx += 1;
        }
    }
    if idx != codewords.len() {
        return Err(format!("consumed {idx} of {} codewords", codewords.len()));
    }

    let mut data = Vec::new();
    for (b, block) in blocks.iter().enumerate() {
        if !syndromes_vanish(block, layout.ecc_per_block) {
            return Err(format!("block {b} fails the Reed-Solomon check"));
        }
        data.extend_from_slice(&block[..layout.data_len(b)]);
    }
    Ok(data)
}

struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    fn read(&mut self, count: usize) -> Result<u32, String> {
        if count > self.remaining() {
            return Err(format!("needed {count} bits, {} left", self.remaining()));
        }
        let mut value = 0u32;
        for _ in 0..count {
            let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        Ok(value)
    }
}

fn count_bits(mode: Mode, version: Version) -> usize {
    let range = match version.number() {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        Mode::Numeric => [10, 12, 14][range],
        Mode::Alphanumeric => [9, 11, 13][range],
        Mode::Byte => [8, 16, 16][range],
    }
}

/// Parse segments up to the terminator (or the end of the data), then check padding.
fn parse_segments(data: &[u8], version: Version) -> Result<(Vec<Mode>, Vec<u8>), String> {
    let mut reader = BitReader { bytes: data, pos: 0 };
    let mut modes = Vec::new();
    let mut payload = Vec::new();

    while reader.remaining() >= 4 {
        let mode = match reader.read(4)? {
            0 => break,
            1 => Mode::Numeric,
            2 => Mode::Alphanumeric,
            4 => Mode::Byte,
            other => return Err(format!("unexpected mode indicator {other:04b}")),
        };
        let count = reader.read(count_bits(mode, version))? as usize;
        modes.push(mode);

        match mode {
            Mode::Numeric => {
                let mut left = count;
                while left > 0 {
                    let take = left.min(3);
                    let value = reader.read(take * 3 + 1)?;
                    let text = format!("{:0width$}", value, width = take);
                    if text.len() != take {
                        return Err(format!("numeric group {value} too wide"));
                    }
                    payload.extend_from_slice(text.as_bytes());
                    left -= take;
                }
            }
            Mode::Alphanumeric => {
                let mut left = count;
                while left > 0 {
                    if left >= 2 {
                        let value = reader.read(11)? as usize;
                        payload.push(ALPHANUMERIC[value / 45]);
                        payload.push(ALPHANUMERIC[value % 45]);
                        left -= 2;
                    } else {
                        payload.push(ALPHANUMERIC[reader.read(6)? as usize]);
                        left -= 1;
                    }
                }
            }
            Mode::Byte => {
                for _ in 0..count {
                    payload.push(reader.read(8)? as u8);
                }
            }
        }
    }

    // Zero bits up to the byte boundary, then alternating pad codewords
    let first_pad = reader.pos.div_ceil(8);
    for (i, &byte) in data[first_pad..].iter().enumerate() {
        let expected = if i % 2 == 0 { 0xEC } else { 0x11 };
        if byte != expected {
            return Err(format!("pad codeword {i} is {byte:#04x}"));
        }
    }
    Ok((modes, payload))
}
