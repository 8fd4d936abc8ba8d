//! Version information placement for QR codes v7+

use crate::encoder::bch::BchEncoder;
use crate::models::{BitMatrix, Version};

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// Write both version blocks; no-op below version 7
    pub fn write(matrix: &mut BitMatrix, version: Version) {
        if !version.has_version_info() {
            return;
        }
        let bits = BchEncoder::encode_version(version.number());
        let size = matrix.width();
        for i in 0..18 {
            let bit = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            // Top-right block (3 wide, 6 tall) and its transpose at the bottom left
            matrix.set(a, b, bit);
            matrix.set(b, a, bit);
        }
    }
}
