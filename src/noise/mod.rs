//! Noise generation module for island elevation.
//!
//! Uses the noise crate's seeded simplex for fBm, layered into a heightmap field.

mod layered;
mod simplex;

pub use layered::{generate_layered_noise, sample_layered, LayeredNoiseConfig, MAX_INNER_OCTAVES};
pub use simplex::{NoiseSampler, SimplexSampler};
