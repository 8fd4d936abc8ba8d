use crate::models::{ECLevel, Version};

/// Error correction block structure for one version/level pair.
///
/// Blocks come in at most two groups: `short_blocks` blocks carrying
/// `short_data_len` data codewords followed by `long_blocks` blocks carrying one
/// more. Every block gets `ecc_per_block` error correction codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub ecc_per_block: usize,
    pub short_blocks: usize,
    pub short_data_len: usize,
    pub long_blocks: usize,
}

impl BlockLayout {
    pub fn num_blocks(&self) -> usize {
        self.short_blocks + self.long_blocks
    }

    pub fn long_data_len(&self) -> usize {
        self.short_data_len + 1
    }

    /// Data codewords of block `index`
    pub fn data_len(&self, index: usize) -> usize {
        if index < self.short_blocks {
            self.short_data_len
        } else {
            self.long_data_len()
        }
    }

    pub fn data_codewords(&self) -> usize {
        self.short_blocks * self.short_data_len + self.long_blocks * self.long_data_len()
    }

    pub fn total_codewords(&self) -> usize {
        self.data_codewords() + self.num_blocks() * self.ecc_per_block
    }
}

// Block tables from ISO/IEC 18004 (Model 2), as tabulated by the Nayuki QR Code generator.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Block structure for a version/level pair, `None` if the tables disagree
/// with the module count of the version.
pub fn block_layout(version: Version, ec_level: ECLevel) -> Option<BlockLayout> {
    let idx = ec_level.index();
    let v = version.number() as usize;
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][v];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v];
    if ecc <= 0 || blocks <= 0 {
        return None;
    }
    let (ecc, blocks) = (ecc as usize, blocks as usize);

    let raw_codewords = num_raw_data_modules(version) / 8;
    if raw_codewords < blocks * (ecc + 1) {
        return None;
    }
    let long_blocks = raw_codewords % blocks;
    let short_block_len = raw_codewords / blocks;
    Some(BlockLayout {
        ecc_per_block: ecc,
        short_blocks: blocks - long_blocks,
        short_data_len: short_block_len - ecc,
        long_blocks,
    })
}

/// Number of modules available for codewords and remainder bits, i.e. the
/// full grid minus every function pattern, format and version area.
pub fn num_raw_data_modules(version: Version) -> usize {
    let ver = version.number() as usize;
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data codewords (excluding error correction) a symbol can hold
pub fn num_data_codewords(version: Version, ec_level: ECLevel) -> Option<usize> {
    block_layout(version, ec_level).map(|layout| layout.data_codewords())
}

/// Zero bits appended after the last codeword to fill the data region
pub fn remainder_bits(version: Version) -> usize {
    num_raw_data_modules(version) % 8
}
