use crate::models::{BitMatrix, QRCode};
use crate::render::{PixelBuffer, RenderOptions};
use std::env;
use std::path::Path;

fn usize_from_env(key: &str) -> Option<usize> {
    match env::var(key) {
        Ok(value) => value.trim().parse::<usize>().ok(),
        Err(_) => None,
    }
}

/// Pixels per module from `QR_MODULE_SIZE`, falling back to the render default.
///
/// Zero or unparsable values are ignored.
pub fn module_size_from_env() -> usize {
    usize_from_env("QR_MODULE_SIZE")
        .filter(|&v| v > 0)
        .unwrap_or_else(|| RenderOptions::default().module_size)
}

/// Quiet-zone width in modules from `QR_QUIET_ZONE`, falling back to the render default.
pub fn quiet_zone_from_env() -> usize {
    usize_from_env("QR_QUIET_ZONE").unwrap_or_else(|| RenderOptions::default().quiet_zone)
}

/// Render options built from the environment defaults.
pub fn render_options_from_env() -> RenderOptions {
    RenderOptions::new(module_size_from_env(), quiet_zone_from_env())
}

/// Write a rendered symbol as an 8-bit grayscale PNG.
pub fn save_png<P: AsRef<Path>>(pixels: &PixelBuffer, path: P) -> Result<(), image::ImageError> {
    pixels
        .to_image()
        .save_with_format(path, image::ImageFormat::Png)
}

/// Summary statistics for a module matrix.
#[derive(Debug, Clone, Copy)]
pub struct ModuleStats {
    /// Count of dark modules.
    pub dark_modules: usize,
    /// Total modules in the matrix.
    pub total_modules: usize,
    /// Ratio of dark modules to total modules.
    pub dark_ratio: f64,
}

/// Compute dark module stats for a matrix.
pub fn module_stats(matrix: &BitMatrix) -> ModuleStats {
    let dark = matrix.count_dark();
    let total = matrix.width() * matrix.height();
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    ModuleStats {
        dark_modules: dark,
        total_modules: total,
        dark_ratio: ratio,
    }
}

/// Terminal rendering using half-block characters, two module rows per text line.
///
/// Dark modules print as ink, so the output reads correctly on a light background.
pub fn to_text_art(qr: &QRCode, quiet_zone: usize) -> String {
    let size = qr.size();
    let total = size + 2 * quiet_zone;
    let dark = |x: usize, y: usize| {
        x >= quiet_zone
            && y >= quiet_zone
            && x < quiet_zone + size
            && y < quiet_zone + size
            && qr.is_dark(x - quiet_zone, y - quiet_zone)
    };

    let mut out = String::with_capacity((total + 1) * total.div_ceil(2) * 3);
    for y in (0..total).step_by(2) {
        for x in 0..total {
            let ch = match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
