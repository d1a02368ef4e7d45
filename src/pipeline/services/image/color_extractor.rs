use crate::config::ExtractionSettings;
use crate::error::AppError;
use crate::pipeline::types::Color;
use image::DynamicImage;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// How the occurrence sequence is enumerated from the decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationMode {
    /// One entry per distinct decoded pixel value (alpha included), ordered by first
    /// occurrence in raster order. Alpha is stripped afterwards, so values differing only
    /// in alpha yield repeated colors.
    #[default]
    ColorTable,
    /// One entry per pixel, in raster order.
    PixelScan,
}

/// Reads an image and enumerates its colors.
#[derive(Debug, Clone)]
pub struct ColorExtractor {
    max_colors: usize,
    mode: EnumerationMode,
}

impl Default for ColorExtractor {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
    }
}

impl ColorExtractor {
    pub fn new(max_colors: usize, mode: EnumerationMode) -> Self {
        Self { max_colors, mode }
    }

    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self::new(settings.max_colors, settings.enumeration)
    }

    pub fn extract(&self, path: &Path) -> Result<Vec<Color>, AppError> {
        let image = image::open(path).map_err(|source| AppError::UnreadableImage {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );

        let colors = self.extract_from_image(&image)?;
        info!("Extracted {} colors from {}", colors.len(), path.display());
        Ok(colors)
    }

    pub fn extract_from_image(&self, image: &DynamicImage) -> Result<Vec<Color>, AppError> {
        // Opaque images decode with alpha 255 everywhere, so the table matches the RGB one.
        let rgba = image.to_rgba8();
        let mut table: IndexSet<[u8; 4]> = IndexSet::new();
        let mut scanned = match self.mode {
            EnumerationMode::ColorTable => Vec::new(),
            EnumerationMode::PixelScan => Vec::with_capacity(rgba.len() / 4),
        };

        for px in rgba.pixels() {
            if table.insert(px.0) && table.len() > self.max_colors {
                return Err(AppError::TooManyColors {
                    limit: self.max_colors,
                });
            }
            if self.mode == EnumerationMode::PixelScan {
                scanned.push(strip_alpha(px.0));
            }
        }

        Ok(match self.mode {
            EnumerationMode::ColorTable => table.into_iter().map(strip_alpha).collect(),
            EnumerationMode::PixelScan => scanned,
        })
    }
}

fn strip_alpha([r, g, b, _]: [u8; 4]) -> Color {
    Color::new(r, g, b)
}
