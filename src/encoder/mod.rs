//! QR encoding pipeline
//!
//! Payload bytes flow through:
//! 1. `segment` - split into numeric / alphanumeric / byte segments
//! 2. `bitstream` - pack segments, terminator and pad codewords
//! 3. `ecc` - split into blocks, Reed-Solomon, interleave
//! 4. `function_mask` + `placement` - draw fixed patterns, zigzag the codewords
//! 5. `mask` - score all eight masks and keep the best
//!
//! `qr_encoder::QrEncoder` runs the whole thing.

pub mod bch;
pub mod bitstream;
pub mod ecc;
pub mod format;
pub mod function_mask;
pub mod mask;
pub mod modes;
pub mod placement;
pub mod qr_encoder;
pub mod reed_solomon;
pub mod segment;
pub mod tables;
pub mod version;
