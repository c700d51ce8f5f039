//! Layered noise field: several frequency/amplitude layers of one sampler.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_size, GenerationError};
use crate::terrain::Grid;
use super::simplex::NoiseSampler;

/// Deepest inner fractal octave count accepted by [`LayeredNoiseConfig::validate`].
pub const MAX_INNER_OCTAVES: u32 = 32;

/// Configuration for stacking noise layers into one elevation field.
///
/// Each layer samples at `frequency_multiplier` times the previous frequency
/// and contributes `amplitude_multiplier` times the previous amplitude. Every
/// layer is itself an `inner_octaves`-deep sample of the underlying sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeredNoiseConfig {
    /// Number of layers (at least 1).
    pub layers: u32,
    /// Frequency multiplier between layers (typically 2.0).
    pub frequency_multiplier: f32,
    /// Amplitude multiplier between layers (typically 0.5).
    pub amplitude_multiplier: f32,
    /// Fractal depth passed to the sampler for every layer.
    pub inner_octaves: u32,
}

impl Default for LayeredNoiseConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            frequency_multiplier: 2.0,
            amplitude_multiplier: 0.5,
            inner_octaves: 8,
        }
    }
}

impl LayeredNoiseConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.layers == 0 {
            return Err(GenerationError::invalid("layer count must be at least 1"));
        }
        if self.inner_octaves == 0 || self.inner_octaves > MAX_INNER_OCTAVES {
            return Err(GenerationError::invalid(format!(
                "inner octave count must be between 1 and {}, got {}",
                MAX_INNER_OCTAVES, self.inner_octaves
            )));
        }
        if !self.frequency_multiplier.is_finite() || self.frequency_multiplier <= 0.0 {
            return Err(GenerationError::invalid(format!(
                "frequency multiplier must be finite and positive, got {}",
                self.frequency_multiplier
            )));
        }
        if !self.amplitude_multiplier.is_finite() {
            return Err(GenerationError::invalid(format!(
                "amplitude multiplier must be finite, got {}",
                self.amplitude_multiplier
            )));
        }
        Ok(())
    }

    /// `(frequency, amplitude)` for each layer, starting at `(1, 1)`.
    pub fn layer_weights(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..self.layers as i32).map(move |i| {
            (
                self.frequency_multiplier.powi(i),
                self.amplitude_multiplier.powi(i),
            )
        })
    }
}

/// Samples every layer at the normalized coordinate `(nx, ny)` and sums them.
pub fn sample_layered<S: NoiseSampler + ?Sized>(
    sampler: &S,
    nx: f32,
    ny: f32,
    seed: i32,
    config: &LayeredNoiseConfig,
) -> f32 {
    config
        .layer_weights()
        .map(|(frequency, amplitude)| {
            amplitude * sampler.sample(frequency * nx, frequency * ny, seed, config.inner_octaves)
        })
        .sum()
}

/// Generates a `size × size` layered noise field.
///
/// Cell `(x, y)` is sampled at `(x / size - 0.5, y / size - 0.5)` so the noise
/// domain is centered on the grid. Fails with `NumericAnomaly` if the sampler
/// produced a non-finite value anywhere.
pub fn generate_layered_noise<S: NoiseSampler + ?Sized>(
    sampler: &S,
    size: usize,
    seed: i32,
    config: &LayeredNoiseConfig,
) -> Result<Grid<f32>, GenerationError> {
    check_size(size)?;
    config.validate()?;

    let inv_size = 1.0 / size as f32;
    let field = Grid::from_fn(size, |x, y| {
        let nx = x as f32 * inv_size - 0.5;
        let ny = y as f32 * inv_size - 0.5;
        sample_layered(sampler, nx, ny, seed, config)
    })?;
    field.ensure_finite()?;

    let (min, max) = field.range();
    debug!(size, seed, layers = config.layers, min, max, "layered noise field generated");
    Ok(field)
}
