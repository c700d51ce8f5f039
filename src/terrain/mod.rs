//! Terrain generation module.
//!
//! Provides the square [`Grid`] container and the stages that turn layered
//! noise into an island heightmap: radial masking and min-max normalization.

mod grid;
mod heightmap;
mod mask;
mod normalize;

pub use grid::Grid;
pub use heightmap::{generate_map, generate_map_with, HeightmapConfig};
pub use mask::{mask_center, radial_gradient, BANDED_MASK_DIVISOR, BINARY_MASK_DIVISOR};
pub use normalize::normalize_grid;
