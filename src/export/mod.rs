//! Export module for rendering generated maps to image files.
//!
//! Heightmaps are written as 16-bit grayscale PNG; classified maps as scaled
//! RGB previews.

mod biome_map;
mod png;

pub use biome_map::{export_biome_map_png, rasterize, BiomeMapError, BiomeMapOptions};
pub use png::{export_heightmap_png, PngExportError, PngExportOptions};
