//! rust_qr_gen - QR code encoding engine
//!
//! Turns a byte payload into a finalized QR Model 2 symbol (versions 1-40,
//! levels L/M/Q/H) and optionally a pixel grid ready for an image encoder.
//! Every call is a pure computation; encodes can run in parallel freely.

/// Encoding pipeline stages (segmentation, packing, ECC, layout, masking)
pub mod encoder;
/// Error type returned by encode calls
pub mod error;
/// Core data structures (QRCode, BitMatrix, Version, etc.)
pub mod models;
/// Module matrix to pixel grid
pub mod render;
/// CLI helpers (PNG output, text art, environment defaults)
pub mod tools;

pub use encoder::modes::Mode;
pub use encoder::qr_encoder::{EncodeOptions, QrEncoder};
pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, MaskPattern, ModuleKind, QRCode, Version};
pub use render::{PixelBuffer, RenderOptions, render};

/// Encode a payload with the given options
///
/// # Example
/// ```
/// use rust_qr_gen::{ECLevel, EncodeOptions, encode};
///
/// let qr = encode(b"HELLO WORLD", &EncodeOptions::new().with_ec_level(ECLevel::Q)).unwrap();
/// assert_eq!(qr.size(), 21);
/// ```
pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<QRCode, EncodeError> {
    QrEncoder::encode(data, options)
}

/// Encode UTF-8 text with default options (level M, automatic version and segments)
pub fn encode_text(text: &str) -> Result<QRCode, EncodeError> {
    QrEncoder::encode(text.as_bytes(), &EncodeOptions::default())
}

/// Reusable encoder with fixed encode and render settings
///
/// Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncodeOptions,
    render_options: RenderOptions,
}

impl Encoder {
    /// Encoder with default settings (level M, 10 px modules, 4-module quiet zone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the encode settings
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the render settings
    pub fn with_render_options(mut self, render_options: RenderOptions) -> Self {
        self.render_options = render_options;
        self
    }

    /// Current encode settings
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Current render settings
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Encode bytes into a symbol
    pub fn encode(&self, data: &[u8]) -> Result<QRCode, EncodeError> {
        QrEncoder::encode(data, &self.options)
    }

    /// Encode UTF-8 text into a symbol
    pub fn encode_text(&self, text: &str) -> Result<QRCode, EncodeError> {
        self.encode(text.as_bytes())
    }

    /// Encode bytes and render the symbol
    pub fn render(&self, data: &[u8]) -> Result<PixelBuffer, EncodeError> {
        let qr = self.encode(data)?;
        Ok(render(&qr, &self.render_options))
    }
}
