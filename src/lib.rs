//! Procedural island map generator.
//!
//! This crate generates a square elevation grid from layered simplex noise,
//! sinks its edges with a radial distance mask to form an island, and
//! classifies each cell into land/water or a palette of elevation bands.

pub mod biomes;
pub mod config;
pub mod error;
pub mod export;
pub mod noise;
pub mod terrain;

pub use biomes::{classify, classify_grid, Band, BiomePalette, ClassificationMode};
pub use config::{ConfigError, GeneratorConfig, IslandMap};
pub use error::GenerationError;
pub use noise::{LayeredNoiseConfig, NoiseSampler, SimplexSampler};
pub use terrain::{
    generate_map, generate_map_with, normalize_grid, radial_gradient, Grid, HeightmapConfig,
};
