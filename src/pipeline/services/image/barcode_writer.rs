use crate::error::AppError;
use crate::pipeline::types::Color;
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{info, warn};

/// Upper bound on barcode pixels (48 MiB of RGB data).
pub const MAX_BARCODE_PIXELS: u64 = 16 * 1024 * 1024;

/// Renders the occurrence sequence as vertical stripes, one column per entry.
#[derive(Debug, Clone)]
pub struct BarcodeWriter {
    max_height: Option<u32>,
    max_pixels: u64,
}

impl Default for BarcodeWriter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BarcodeWriter {
    pub fn new(max_height: Option<u32>) -> Self {
        Self {
            max_height,
            max_pixels: MAX_BARCODE_PIXELS,
        }
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Square N×N image unless a maximum height is configured. The height is reduced
    /// further to stay within the pixel budget; `None` when not even one row fits.
    pub fn render(&self, colors: &[Color]) -> Option<RgbImage> {
        if colors.is_empty() {
            return None;
        }
        let width = u32::try_from(colors.len()).ok()?;
        let wanted = self.max_height.map_or(width, |max| width.min(max));
        let affordable = (self.max_pixels / width as u64).min(u32::MAX as u64) as u32;
        if affordable == 0 {
            warn!(
                "Barcode of {} columns exceeds the {} pixel budget, skipping",
                width, self.max_pixels
            );
            return None;
        }
        let height = wanted.min(affordable);
        if height < wanted {
            warn!(
                "Barcode height reduced from {} to {} to stay within {} pixels",
                wanted, height, self.max_pixels
            );
        }
        Some(RgbImage::from_fn(width, height, |x, _| {
            Rgb::from(colors[x as usize])
        }))
    }

    /// Returns whether an image was written.
    pub fn write(&self, colors: &[Color], path: &Path) -> Result<bool, AppError> {
        let Some(barcode) = self.render(colors) else {
            warn!("Nothing to draw, skipping barcode {}", path.display());
            return Ok(false);
        };
        barcode.save(path).map_err(|source| AppError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Barcode saved to {} ({}x{})",
            path.display(),
            barcode.width(),
            barcode.height()
        );
        Ok(true)
    }
}
