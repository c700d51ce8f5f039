//! Island heightmap generation: layered noise minus a radial mask.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{check_size, GenerationError};
use crate::noise::{generate_layered_noise, LayeredNoiseConfig, NoiseSampler, SimplexSampler};
use super::grid::Grid;
use super::mask::{radial_gradient, BANDED_MASK_DIVISOR, BINARY_MASK_DIVISOR};
use super::normalize::normalize_grid;

/// Configuration for the full heightmap pipeline.
///
/// The two normalization flags select between the signed-difference output
/// (land where the value is above zero) and the fully normalized [0, 1] output
/// that banded classification expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapConfig {
    /// Noise layering parameters.
    pub noise: LayeredNoiseConfig,
    /// Divisor `k` in `distance / (size / k)`.
    pub mask_divisor: f32,
    /// Rescale the noise field to [0, 1] before subtracting the mask.
    pub normalize_before_mask: bool,
    /// Rescale the masked result to [0, 1].
    pub normalize_after_mask: bool,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self::banded()
    }
}

impl HeightmapConfig {
    /// Fully normalized output for banded classification.
    pub fn banded() -> Self {
        Self {
            noise: LayeredNoiseConfig::default(),
            mask_divisor: BANDED_MASK_DIVISOR,
            normalize_before_mask: true,
            normalize_after_mask: true,
        }
    }

    /// Raw signed difference of noise and mask, for land/water classification.
    pub fn binary() -> Self {
        Self {
            noise: LayeredNoiseConfig::default(),
            mask_divisor: BINARY_MASK_DIVISOR,
            normalize_before_mask: false,
            normalize_after_mask: false,
        }
    }

    /// Like [`HeightmapConfig::binary`], but the noise is normalized to [0, 1]
    /// before the mask is subtracted.
    pub fn binary_prenormalized() -> Self {
        Self {
            normalize_before_mask: true,
            ..Self::binary()
        }
    }
}

/// Generates an island heightmap with the default simplex sampler.
pub fn generate_map(
    size: usize,
    seed: i32,
    config: &HeightmapConfig,
) -> Result<Grid<f32>, GenerationError> {
    generate_map_with(&SimplexSampler::default(), size, seed, config)
}

/// Generates an island heightmap using the given noise sampler.
///
/// The mask is fully computed before it is subtracted from the noise field.
/// Any failure aborts generation and no grid is returned.
pub fn generate_map_with<S: NoiseSampler + ?Sized>(
    sampler: &S,
    size: usize,
    seed: i32,
    config: &HeightmapConfig,
) -> Result<Grid<f32>, GenerationError> {
    check_size(size)?;
    config.noise.validate()?;

    let gradient = radial_gradient(size, config.mask_divisor)?;
    let mut heights = generate_layered_noise(sampler, size, seed, &config.noise)?;
    if config.normalize_before_mask {
        heights = normalize_grid(heights)?;
    }

    heights
        .as_mut_slice()
        .par_iter_mut()
        .zip(gradient.as_slice().par_iter())
        .for_each(|(h, g)| *h -= g);
    debug!(size, "radial mask subtracted");

    let heights = if config.normalize_after_mask {
        normalize_grid(heights)?
    } else {
        heights.ensure_finite()?;
        heights
    };

    let (min, max) = heights.range();
    info!(size, seed, min, max, "heightmap generated");
    Ok(heights)
}
