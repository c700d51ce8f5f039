//! Top-level generator configuration and the end-to-end generation run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::{classify_grid, ClassificationMode};
use crate::error::{check_size, GenerationError};
use crate::terrain::{generate_map, Grid, HeightmapConfig};

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GenerationError),
}

/// Everything needed to generate and render one island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid width and height in cells.
    pub size: usize,
    /// Pixels per cell when rasterizing.
    pub scale: u32,
    /// Noise seed.
    pub seed: i32,
    pub heightmap: HeightmapConfig,
    pub mode: ClassificationMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::banded(0)
    }
}

impl GeneratorConfig {
    /// Normalized heightmap colored by the island palette.
    pub fn banded(seed: i32) -> Self {
        Self {
            size: 256,
            scale: 5,
            seed,
            heightmap: HeightmapConfig::banded(),
            mode: ClassificationMode::banded(),
        }
    }

    /// Signed heightmap split into land and water.
    pub fn binary(seed: i32) -> Self {
        Self {
            heightmap: HeightmapConfig::binary(),
            mode: ClassificationMode::binary(),
            ..Self::banded(seed)
        }
    }

    /// Loads a JSON configuration file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        check_size(self.size)?;
        if self.scale == 0 {
            return Err(GenerationError::invalid("scale must be greater than 0"));
        }
        self.heightmap.noise.validate()?;
        self.mode.validate()
    }

    /// Runs the full pipeline: heightmap generation followed by classification.
    pub fn generate(&self) -> Result<IslandMap, GenerationError> {
        self.validate()?;
        let elevation = generate_map(self.size, self.seed, &self.heightmap)?;
        let bands = classify_grid(&elevation, &self.mode)?;
        Ok(IslandMap { elevation, bands })
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct IslandMap {
    pub elevation: Grid<f32>,
    /// Band index per cell, resolved through the run's [`ClassificationMode`].
    pub bands: Grid<u8>,
}

impl IslandMap {
    /// Fraction of cells whose band is not the lowest (water) band.
    pub fn land_fraction(&self) -> f32 {
        let land = self.bands.as_slice().iter().filter(|&&b| b != 0).count();
        land as f32 / self.bands.len() as f32
    }
}
