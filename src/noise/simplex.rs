//! Seeded 2D simplex fBm sampling.

use ::noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// A deterministic, continuous 2D coherent noise function.
///
/// `seed` selects an independent noise field and `octaves` the sampler's own
/// fractal depth. Output is roughly [-1, 1] but callers must not rely on a
/// hard bound. Implementations must be pure: the same arguments always give
/// the same result, from any thread.
pub trait NoiseSampler: Send + Sync {
    fn sample(&self, x: f32, y: f32, seed: i32, octaves: u32) -> f32;
}

/// Simplex fBm sampler.
///
/// Each inner octave multiplies frequency by `lacunarity` and amplitude by
/// `persistence`; the sum is divided by the total amplitude so that adding
/// octaves adds detail without growing the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplexSampler {
    /// Frequency multiplier per inner octave.
    pub lacunarity: f32,
    /// Amplitude decay per inner octave.
    pub persistence: f32,
}

impl Default for SimplexSampler {
    fn default() -> Self {
        Self {
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl NoiseSampler for SimplexSampler {
    fn sample(&self, x: f32, y: f32, seed: i32, octaves: u32) -> f32 {
        // Each seed shuffles its own permutation table.
        let noise = Simplex::new(seed as u32);

        let mut total = 0.0f64;
        let mut amplitude = 1.0f64;
        let mut frequency = 1.0f64;
        let mut max_amplitude = 0.0f64;

        for _ in 0..octaves {
            total += noise.get([x as f64 * frequency, y as f64 * frequency]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.persistence as f64;
            frequency *= self.lacunarity as f64;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        (total / max_amplitude) as f32
    }
}
