//! Scaled RGB preview of classified maps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, Rgb, RgbImage};
use thiserror::Error;

use crate::biomes::ClassificationMode;
use crate::terrain::Grid;

/// Errors that can occur during biome map export.
#[derive(Error, Debug)]
pub enum BiomeMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid scale: {0} (must be > 0)")]
    InvalidScale(u32),
    #[error("Image of {size}x{size} cells at scale {scale} is too large")]
    TooLarge { size: usize, scale: u32 },
}

/// Options for biome map export.
#[derive(Debug, Clone)]
pub struct BiomeMapOptions {
    /// Side length in pixels of the block painted for each cell.
    pub scale: u32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for BiomeMapOptions {
    fn default() -> Self {
        Self {
            scale: 5,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl BiomeMapOptions {
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }
}

/// Paints a `scale × scale` block at `(x * scale, y * scale)` for every cell,
/// colored by `color_at(x, y)`.
pub fn rasterize<F>(size: usize, scale: u32, color_at: F) -> Result<RgbImage, BiomeMapError>
where
    F: Fn(usize, usize) -> [u8; 3],
{
    if scale == 0 {
        return Err(BiomeMapError::InvalidScale(scale));
    }
    let side = u32::try_from(size)
        .ok()
        .and_then(|s| s.checked_mul(scale))
        .ok_or(BiomeMapError::TooLarge { size, scale })?;

    Ok(RgbImage::from_fn(side, side, |px, py| {
        Rgb(color_at((px / scale) as usize, (py / scale) as usize))
    }))
}

/// Exports classified band indices as a scaled RGB PNG.
pub fn export_biome_map_png(
    bands: &Grid<u8>,
    mode: &ClassificationMode,
    path: &Path,
    options: &BiomeMapOptions,
) -> Result<(), BiomeMapError> {
    let img = rasterize(bands.size(), options.scale, |x, y| mode.color(*bands.get(x, y)))?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}
