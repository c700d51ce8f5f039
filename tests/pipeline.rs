//! End-to-end checks of island generation through the public API.

use islandgen::biomes::{classify, classify_grid, ClassificationMode, LAND, WATER};
use islandgen::export::{export_biome_map_png, BiomeMapOptions};
use islandgen::noise::{generate_layered_noise, LayeredNoiseConfig, SimplexSampler};
use islandgen::terrain::{generate_map, normalize_grid, radial_gradient, Grid, HeightmapConfig};
use islandgen::{GenerationError, GeneratorConfig};
use tempfile::tempdir;

fn all_presets() -> [HeightmapConfig; 3] {
    [
        HeightmapConfig::banded(),
        HeightmapConfig::binary(),
        HeightmapConfig::binary_prenormalized(),
    ]
}

#[test]
fn same_seed_reproduces_grid() {
    for config in all_presets() {
        let a = generate_map(4, 42, &config).unwrap();
        let b = generate_map(4, 42, &config).unwrap();
        assert_eq!(a.size(), 4);
        for (va, vb) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((va - vb).abs() <= 1e-9, "{} != {}", va, vb);
        }
    }
}

#[test]
fn different_seed_changes_grid() {
    let config = HeightmapConfig::binary();
    let a = generate_map(4, 42, &config).unwrap();
    let b = generate_map(4, 43, &config).unwrap();
    let max_diff = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(va, vb)| (va - vb).abs())
        .fold(0.0f32, f32::max);
    assert!(max_diff > 0.01, "seeds 42 and 43 differ by at most {}", max_diff);
}

#[test]
fn seeds_select_independent_noise_fields() {
    let sampler = SimplexSampler::default();
    let config = LayeredNoiseConfig::default();
    let fields: Vec<Grid<f32>> = (0..24)
        .map(|seed| {
            let field = generate_layered_noise(&sampler, 32, seed, &config).unwrap();
            normalize_grid(field).unwrap()
        })
        .collect();

    for a in 0..fields.len() {
        for b in (a + 1)..fields.len() {
            let cells = fields[a].as_slice().iter().zip(fields[b].as_slice());
            let max_diff = cells
                .clone()
                .map(|(va, vb)| (va - vb).abs())
                .fold(0.0f32, f32::max);
            let max_mirror = cells
                .map(|(va, vb)| (va + vb - 1.0).abs())
                .fold(0.0f32, f32::max);
            assert!(max_diff > 0.05, "seeds {} and {} share a field", a, b);
            assert!(max_mirror > 0.05, "seeds {} and {} mirror each other", a, b);
        }
    }
}

#[test]
fn raw_difference_mode_produces_land() {
    let config = HeightmapConfig::binary();
    let mode = ClassificationMode::binary();
    let seeds_with_land = (0..8)
        .filter(|&seed| {
            let heights = generate_map(64, seed, &config).unwrap();
            let bands = classify_grid(&heights, &mode).unwrap();
            bands.as_slice().contains(&LAND)
        })
        .count();
    assert!(seeds_with_land >= 2, "only {} of 8 seeds produced land", seeds_with_land);
}

#[test]
fn banded_seeds_classify_differently() {
    let mode = ClassificationMode::banded();
    let classify_seed = |seed| {
        let heights = generate_map(64, seed, &HeightmapConfig::banded()).unwrap();
        classify_grid(&heights, &mode).unwrap()
    };

    let a = classify_seed(0);
    let b = classify_seed(200);
    let changed = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .filter(|(x, y)| x != y)
        .count();
    assert!(changed > 64, "only {} of 4096 cells changed band", changed);

    let land_counts: Vec<usize> = (0..8)
        .map(|i| {
            let bands = classify_seed(i * 32);
            bands.as_slice().iter().filter(|&&band| band != 0).count()
        })
        .collect();
    assert!(
        land_counts.iter().any(|&count| count != land_counts[0]),
        "every seed produced {} land cells",
        land_counts[0]
    );
}

#[test]
fn every_stage_preserves_shape() {
    for size in [1usize, 2, 7, 32] {
        assert_eq!(radial_gradient(size, 1.5).unwrap().size(), size);
        let heights = generate_map(size, 1, &HeightmapConfig::binary()).unwrap();
        assert_eq!(heights.size(), size);
        assert_eq!(heights.rows().count(), size);
        assert!(heights.rows().all(|row| row.len() == size));
    }
}

#[test]
fn banded_output_spans_unit_interval() {
    let heights = generate_map(48, 17, &HeightmapConfig::banded()).unwrap();
    assert!(heights.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    assert!(heights.as_slice().contains(&0.0));
    assert!(heights.as_slice().contains(&1.0));
}

#[test]
fn degenerate_grid_is_reported() {
    let flat = Grid::from_vec(3, vec![2.0f32; 9]).unwrap();
    assert_eq!(
        normalize_grid(flat),
        Err(GenerationError::DegenerateInput { value: 2.0 })
    );
}

#[test]
fn zero_size_fails_fast() {
    for config in all_presets() {
        assert!(matches!(
            generate_map(0, 1, &config),
            Err(GenerationError::InvalidArgument(_))
        ));
    }
}

#[test]
fn boundary_values_take_the_upper_band() {
    let mode = ClassificationMode::banded();
    assert_eq!(classify(0.55, &mode).unwrap().name, "beach");
    assert_eq!(classify(0.85, &mode).unwrap().name, "rock");
    assert_eq!(classify(-1.0e30, &mode).unwrap().name, "deep water");
    assert_eq!(classify(1.0e30, &mode).unwrap().name, "snow");
}

#[test]
fn binary_island_has_land_and_water() {
    let config = GeneratorConfig {
        size: 64,
        heightmap: HeightmapConfig::binary_prenormalized(),
        ..GeneratorConfig::binary(8)
    };
    let map = config.generate().unwrap();

    assert_eq!(*map.bands.get(0, 0), WATER);
    assert_eq!(*map.bands.get(63, 0), WATER);
    // Mask is zero at the center, and normalized noise is at least 0 there.
    let center = *map.elevation.get(31, 31);
    assert_eq!(*map.bands.get(31, 31), if center > 0.0 { LAND } else { WATER });
}

#[test]
fn rasterized_map_matches_scale() {
    let config = GeneratorConfig {
        size: 16,
        scale: 3,
        ..GeneratorConfig::banded(4)
    };
    let map = config.generate().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("island.png");
    let options = BiomeMapOptions::with_scale(config.scale);
    export_biome_map_png(&map.bands, &config.mode, &path, &options).unwrap();

    let img = image::open(&path).unwrap().into_rgb8();
    assert_eq!(img.dimensions(), (48, 48));
    for (x, y) in map.bands.coords() {
        let expected = config.mode.color(*map.bands.get(x, y));
        let px = img.get_pixel((x * 3 + 1) as u32, (y * 3 + 2) as u32);
        assert_eq!(px.0, expected, "cell ({}, {})", x, y);
    }
}
