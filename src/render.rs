//! Module matrix to pixel grid

use image::{GrayImage, Luma};

use crate::models::{BitMatrix, QRCode};

/// Pixel size of one module and quiet-zone width in modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub module_size: usize,
    pub quiet_zone: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: 10,
            quiet_zone: 4,
        }
    }
}

impl RenderOptions {
    pub fn new(module_size: usize, quiet_zone: usize) -> Self {
        Self {
            module_size,
            quiet_zone,
        }
    }

    /// Side length in pixels of a rendered symbol with `modules` modules per side
    pub fn pixel_size(&self, modules: usize) -> usize {
        (modules + 2 * self.quiet_zone) * self.module_size
    }
}

/// Rendered symbol: one bit per pixel, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: BitMatrix,
}

impl PixelBuffer {
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.pixels.get(x, y)
    }

    pub fn pixels(&self) -> &BitMatrix {
        &self.pixels
    }

    /// 8-bit grayscale image, dark = 0, light = 255
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            if self.is_dark(x as usize, y as usize) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

/// Scale each module to a `module_size` block and surround with a light quiet zone
pub fn render(qr: &QRCode, options: &RenderOptions) -> PixelBuffer {
    let scale = options.module_size;
    let offset = options.quiet_zone * scale;
    let side = options.pixel_size(qr.size());

    let mut pixels = BitMatrix::square(side);
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.is_dark(x, y) {
                pixels.fill_rect(offset + x * scale, offset + y * scale, scale, scale, true);
            }
        }
    }
    PixelBuffer { pixels }
}
