#![allow(dead_code)]

pub mod reader;

use rust_qr_gen::{ECLevel, EncodeOptions, QRCode, QrEncoder};

/// Encode and panic with the error text on failure.
pub fn encode_or_panic(data: &[u8], ec_level: ECLevel) -> QRCode {
    QrEncoder::encode(data, &EncodeOptions::new().with_ec_level(ec_level))
        .unwrap_or_else(|err| panic!("encode of {} bytes failed: {err}", data.len()))
}

/// Deterministic pseudo-random payload (xorshift), so failures are reproducible.
pub fn pseudo_random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}
