//! Elevation classification into discrete bands.
//!
//! Two modes match the two heightmap outputs:
//! - binary: signed elevation, land where the value is above sea level
//! - banded: normalized elevation split by an ordered [`BiomePalette`]

mod config;

pub use config::{Band, BiomePalette};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationError;
use crate::terrain::Grid;

/// Band index used for water in binary mode.
pub const WATER: u8 = 0;
/// Band index used for land in binary mode.
pub const LAND: u8 = 1;

/// How elevation values are turned into bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassificationMode {
    /// `value > sea_level` is land, everything else water.
    Binary {
        sea_level: f32,
        water: Band,
        land: Band,
    },
    /// Ordered thresholds over [0, 1] elevation.
    Banded(BiomePalette),
}

impl Default for ClassificationMode {
    fn default() -> Self {
        Self::banded()
    }
}

impl ClassificationMode {
    /// Land/water split at zero.
    pub fn binary() -> Self {
        ClassificationMode::Binary {
            sea_level: 0.0,
            water: Band::new("water", [0, 0, 255]),
            land: Band::new("land", [34, 139, 34]),
        }
    }

    /// Island palette from deep water up to snow.
    pub fn banded() -> Self {
        ClassificationMode::Banded(BiomePalette::island())
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        match self {
            ClassificationMode::Binary { sea_level, .. } if !sea_level.is_finite() => Err(
                GenerationError::invalid(format!("sea level must be finite, got {}", sea_level)),
            ),
            ClassificationMode::Binary { .. } => Ok(()),
            ClassificationMode::Banded(palette) => palette.validate(),
        }
    }

    /// Band index for `value`. Total over all inputs; NaN lands in the lowest
    /// binary band or the highest palette band.
    pub fn classify_index(&self, value: f32) -> u8 {
        match self {
            ClassificationMode::Binary { sea_level, .. } => {
                if value > *sea_level { LAND } else { WATER }
            }
            ClassificationMode::Banded(palette) => palette.band_index(value) as u8,
        }
    }

    /// Looks up a band by index.
    pub fn band(&self, index: u8) -> Option<&Band> {
        match self {
            ClassificationMode::Binary { water, land, .. } => match index {
                WATER => Some(water),
                LAND => Some(land),
                _ => None,
            },
            ClassificationMode::Banded(palette) => palette.bands.get(index as usize),
        }
    }

    pub fn band_count(&self) -> usize {
        match self {
            ClassificationMode::Binary { .. } => 2,
            ClassificationMode::Banded(palette) => palette.bands.len(),
        }
    }

    /// RGB color for a band index; magenta flags an index outside the mode.
    pub fn color(&self, index: u8) -> [u8; 3] {
        self.band(index).map(|b| b.color).unwrap_or([255, 0, 255])
    }
}

/// Classifies a single elevation value. Only a malformed `mode` can fail.
pub fn classify(value: f32, mode: &ClassificationMode) -> Result<&Band, GenerationError> {
    mode.validate()?;
    let index = mode.classify_index(value);
    mode.band(index)
        .ok_or_else(|| GenerationError::invalid(format!("band index {} out of range", index)))
}

/// Classifies every cell of an elevation grid into band indices.
///
/// Fails with `NumericAnomaly` rather than classifying a non-finite cell.
pub fn classify_grid(
    heights: &Grid<f32>,
    mode: &ClassificationMode,
) -> Result<Grid<u8>, GenerationError> {
    mode.validate()?;
    heights.ensure_finite()?;

    let bands = heights.map(|&h| mode.classify_index(h));
    debug!(size = bands.size(), bands = mode.band_count(), "heightmap classified");
    Ok(bands)
}
