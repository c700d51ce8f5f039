//! Band and palette configuration for elevation classification.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A discrete output category with its preview color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub name: String,
    pub color: [u8; 3],
}

impl Band {
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Ordered elevation bands.
///
/// `thresholds[i]` is the exclusive upper bound of `bands[i]`; the last band has
/// no upper bound and catches every value at or above the highest threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomePalette {
    pub thresholds: Vec<f32>,
    pub bands: Vec<Band>,
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self::island()
    }
}

impl BiomePalette {
    /// Builds a palette, checking that it is well formed.
    pub fn new(thresholds: Vec<f32>, bands: Vec<Band>) -> Result<Self, GenerationError> {
        let palette = Self { thresholds, bands };
        palette.validate()?;
        Ok(palette)
    }

    /// Deep water, beach, grassland, forest, highland, rock and snow.
    pub fn island() -> Self {
        Self {
            thresholds: vec![0.55, 0.60, 0.70, 0.80, 0.85, 0.95],
            bands: vec![
                Band::new("deep water", [0, 0, 255]),
                Band::new("beach", [237, 201, 175]),
                Band::new("grassland", [116, 169, 99]),
                Band::new("forest", [34, 139, 34]),
                Band::new("highland", [164, 189, 125]),
                Band::new("rock", [206, 210, 208]),
                Band::new("snow", [255, 255, 255]),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.bands.is_empty() {
            return Err(GenerationError::invalid("palette needs at least one band"));
        }
        if self.bands.len() > u8::MAX as usize + 1 {
            return Err(GenerationError::invalid(format!(
                "palette has {} bands, at most 256 are supported",
                self.bands.len()
            )));
        }
        if self.thresholds.len() + 1 != self.bands.len() {
            return Err(GenerationError::invalid(format!(
                "{} bands need {} thresholds, got {}",
                self.bands.len(),
                self.bands.len() - 1,
                self.thresholds.len()
            )));
        }
        if self.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(GenerationError::invalid("palette thresholds must be finite"));
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GenerationError::invalid(
                "palette thresholds must be strictly increasing",
            ));
        }
        Ok(())
    }

    /// Index of the first band whose threshold exceeds `value`, else the last band.
    pub fn band_index(&self, value: f32) -> usize {
        self.thresholds
            .iter()
            .position(|&t| value < t)
            .unwrap_or(self.thresholds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_island_palette_is_valid() {
        let palette = BiomePalette::island();
        assert!(palette.validate().is_ok());
        assert_eq!(palette.bands.len(), 7);
        assert_eq!(palette.bands[0].color, [0, 0, 255]);
        assert_eq!(palette.bands[6].name, "snow");
    }

    #[test]
    fn test_band_index_boundaries() {
        let palette = BiomePalette::island();
        assert_eq!(palette.band_index(0.0), 0);
        assert_eq!(palette.band_index(0.5499), 0);
        assert_eq!(palette.band_index(0.55), 1);
        assert_eq!(palette.band_index(0.95), 6);
        assert_eq!(palette.band_index(1.0), 6);
        assert_eq!(palette.band_index(-1.0e9), 0);
        assert_eq!(palette.band_index(1.0e9), 6);
    }

    #[test]
    fn test_invalid_palettes() {
        let water = Band::new("water", [0, 0, 255]);
        let land = Band::new("land", [0, 255, 0]);

        assert!(BiomePalette::new(vec![], vec![]).is_err());
        assert!(BiomePalette::new(vec![0.5, 0.6], vec![water.clone(), land.clone()]).is_err());
        assert!(BiomePalette::new(vec![f32::NAN], vec![water.clone(), land.clone()]).is_err());
        assert!(BiomePalette::new(
            vec![0.6, 0.6],
            vec![water.clone(), land.clone(), land.clone()]
        )
        .is_err());
        assert!(BiomePalette::new(vec![0.5], vec![water, land]).is_ok());
    }

    #[test]
    fn test_single_band_palette_catches_everything() {
        let palette = BiomePalette::new(vec![], vec![Band::new("flat", [1, 2, 3])]).unwrap();
        assert_eq!(palette.band_index(-5.0), 0);
        assert_eq!(palette.band_index(5.0), 0);
    }
}
