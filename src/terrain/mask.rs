//! Radial distance mask used to sink the edges of the map into the sea.

use glam::Vec2;
use tracing::debug;

use crate::error::{check_size, GenerationError};
use super::grid::Grid;

/// Mask divisor used by the banded (fully normalized) preset.
pub const BANDED_MASK_DIVISOR: f32 = 1.5;
/// Mask divisor used by the binary land/water presets.
pub const BINARY_MASK_DIVISOR: f32 = 2.0;

/// Center of the radial mask for a grid of the given size.
pub fn mask_center(size: usize) -> Vec2 {
    Vec2::splat(size as f32 / 2.0 - 1.0)
}

/// Computes each cell's Euclidean distance from the grid center divided by
/// `size / divisor`.
///
/// A larger `divisor` gives a steeper falloff and a smaller island; a smaller
/// one lets land reach closer to the map edge.
pub fn radial_gradient(size: usize, divisor: f32) -> Result<Grid<f32>, GenerationError> {
    check_size(size)?;
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(GenerationError::invalid(format!(
            "mask divisor must be finite and positive, got {}",
            divisor
        )));
    }

    let center = mask_center(size);
    let scale = divisor / size as f32;
    let gradient = Grid::from_fn(size, |x, y| {
        Vec2::new(x as f32, y as f32).distance(center) * scale
    })?;

    debug!(size, divisor, "radial mask generated");
    Ok(gradient)
}
