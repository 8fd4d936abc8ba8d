/// Block splitting, Reed-Solomon coding and codeword interleaving
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::{BlockLayout, block_layout, remainder_bits};
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// One error correction block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Split data codewords per the block table and compute each block's EC codewords
pub fn split_into_blocks(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<Block>, EncodeError> {
    let layout = layout_for(version, ec_level)?;
    if data.len() != layout.data_codewords() {
        return Err(EncodeError::MalformedSegmentTable { version, ec_level });
    }

    let rs = ReedSolomonEncoder::new(layout.ecc_per_block);
    let mut blocks = Vec::with_capacity(layout.num_blocks());
    let mut offset = 0;
    for b in 0..layout.num_blocks() {
        let len = layout.data_len(b);
        let chunk = &data[offset..offset + len];
        offset += len;
        blocks.push(Block {
            data: chunk.to_vec(),
            ecc: rs.encode(chunk),
        });
    }
    Ok(blocks)
}

/// Column-wise interleave: codeword 0 of every block, then codeword 1, and so on,
/// first over data codewords, then over EC codewords.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let max_ecc = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    let total = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    for i in 0..max_ecc {
        out.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    out
}

/// Full codeword sequence for placement: interleaved data and EC codewords
/// followed by the version's remainder bits.
pub fn final_bit_sequence(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<BitBuffer, EncodeError> {
    let layout = layout_for(version, ec_level)?;
    let blocks = split_into_blocks(data, version, ec_level)?;
    let codewords = interleave(&blocks);
    if codewords.len() != layout.total_codewords() {
        return Err(EncodeError::MalformedSegmentTable { version, ec_level });
    }

    let mut bits = BitBuffer::with_capacity(codewords.len() * 8 + 7);
    for &cw in &codewords {
        bits.append_bits(u32::from(cw), 8);
    }
    bits.append_bits(0, remainder_bits(version));
    Ok(bits)
}

fn layout_for(version: Version, ec_level: ECLevel) -> Result<BlockLayout, EncodeError> {
    block_layout(version, ec_level).ok_or(EncodeError::MalformedSegmentTable { version, ec_level })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::num_raw_data_modules;

    #[test]
    fn test_single_block_passthrough() {
        let data = [
            0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        let blocks = split_into_blocks(&data, Version::MIN, ECLevel::M).unwrap();
        assert_eq!(blocks.len(), 1);
        let out = interleave(&blocks);
        assert_eq!(&out[..16], &data);
        assert_eq!(out[16], 0xC4);
        assert_eq!(out.len(), 26);
    }

    #[test]
    fn test_interleave_uneven_blocks() {
        let blocks = vec![
            Block { data: vec![1, 2], ecc: vec![10, 11] },
            Block { data: vec![3, 4, 5], ecc: vec![12, 13] },
        ];
        assert_eq!(interleave(&blocks), vec![1, 3, 2, 4, 5, 10, 12, 11, 13]);
    }

    #[test]
    fn test_five_q_interleave_order() {
        let version = Version::new(5).unwrap();
        let data: Vec<u8> = (0..62).collect();
        let blocks = split_into_blocks(&data, version, ECLevel::Q).unwrap();
        assert_eq!(blocks.iter().map(|b| b.data.len()).collect::<Vec<_>>(), vec![15, 15, 16, 16]);
        let out = interleave(&blocks);
        // Block starts: 0, 15, 30, 46
        assert_eq!(&out[..8], &[0, 15, 30, 46, 1, 16, 31, 47]);
        // The last data column only exists in the long blocks
        assert_eq!(&out[60..62], &[45, 61]);
        assert_eq!(out.len(), 134);
    }

    #[test]
    fn test_bit_sequence_fills_data_region() {
        for version in Version::all() {
            for level in ECLevel::ALL {
                let n = crate::encoder::tables::num_data_codewords(version, level).unwrap();
                let bits = final_bit_sequence(&vec![0xA5; n], version, level).unwrap();
                assert_eq!(bits.len(), num_raw_data_modules(version));
            }
        }
    }

    #[test]
    fn test_wrong_data_length_is_table_error() {
        let err = split_into_blocks(&[0; 3], Version::MIN, ECLevel::L).unwrap_err();
        assert!(!err.is_client_error());
    }
}
