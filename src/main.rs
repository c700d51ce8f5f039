//! Islandgen CLI - procedural island map generator.
//!
//! Generates an island heightmap from layered simplex noise and a radial mask,
//! then renders it as a scaled biome preview PNG.

use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use islandgen::biomes::ClassificationMode;
use islandgen::config::GeneratorConfig;
use islandgen::export::{
    export_biome_map_png, export_heightmap_png, BiomeMapOptions, PngExportOptions,
};
use islandgen::terrain::HeightmapConfig;

/// Procedural island map generator.
#[derive(Parser)]
#[command(name = "islandgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug events from every generation stage.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an island map.
    Generate {
        /// Grid size in cells (width and height).
        #[arg(long, default_value = "256")]
        size: usize,

        /// Pixels per cell in the output image.
        #[arg(long, default_value = "5")]
        scale: u32,

        /// Random seed for reproducible generation (random in 0..=255 if omitted).
        #[arg(short, long)]
        seed: Option<i32>,

        /// Classification mode.
        #[arg(short, long, default_value = "banded")]
        mode: Mode,

        /// Mask divisor; larger values give a smaller island (default depends on mode).
        #[arg(long)]
        mask_divisor: Option<f32>,

        /// Number of noise layers.
        #[arg(long, default_value = "3")]
        layers: u32,

        /// Fractal octaves inside each noise layer.
        #[arg(long, default_value = "8")]
        inner_octaves: u32,

        /// Normalize the noise to [0, 1] before subtracting the mask (binary mode).
        #[arg(long)]
        prenormalize: bool,

        /// Output image path.
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,

        /// Also write a 16-bit grayscale heightmap to this path.
        #[arg(long)]
        heightmap: Option<PathBuf>,

        /// Load settings from a JSON config file instead of the flags above.
        #[arg(
            long,
            conflicts_with_all = [
                "size",
                "scale",
                "seed",
                "mode",
                "mask_divisor",
                "layers",
                "inner_octaves",
                "prenormalize",
            ]
        )]
        config: Option<PathBuf>,

        /// Print the effective configuration as JSON and exit.
        #[arg(long)]
        dump_config: bool,
    },

    /// Display information about a map configuration.
    Info {
        /// Grid size in cells.
        #[arg(long, default_value = "256")]
        size: usize,

        /// Pixels per cell.
        #[arg(long, default_value = "5")]
        scale: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Signed elevation split into land and water.
    Binary,
    /// Normalized elevation colored from deep water to snow.
    Banded,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            size,
            scale,
            seed,
            mode,
            mask_divisor,
            layers,
            inner_octaves,
            prenormalize,
            output,
            heightmap,
            config,
            dump_config,
        } => {
            if let Err(e) = check_mode_flags(mode, prenormalize) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            let config = match config {
                Some(path) => GeneratorConfig::from_json_file(&path).unwrap_or_else(|e| {
                    eprintln!("Error loading config {}: {}", path.display(), e);
                    std::process::exit(1);
                }),
                None => build_config(
                    size,
                    scale,
                    seed,
                    mode,
                    mask_divisor,
                    layers,
                    inner_octaves,
                    prenormalize,
                ),
            };

            if dump_config {
                match config.to_json_string() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            run_generate(&config, output, heightmap);
        }
        Commands::Info { size, scale } => {
            run_info(size, scale);
        }
    }
}

/// Rejects flag combinations that would otherwise be silently ignored.
fn check_mode_flags(mode: Mode, prenormalize: bool) -> Result<(), String> {
    if prenormalize && matches!(mode, Mode::Banded) {
        return Err("--prenormalize only applies to --mode binary".to_string());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    size: usize,
    scale: u32,
    seed: Option<i32>,
    mode: Mode,
    mask_divisor: Option<f32>,
    layers: u32,
    inner_octaves: u32,
    prenormalize: bool,
) -> GeneratorConfig {
    let seed = seed.unwrap_or_else(|| rand::rng().random_range(0..=255));

    let mut config = match mode {
        Mode::Banded => GeneratorConfig::banded(seed),
        Mode::Binary if prenormalize => GeneratorConfig {
            heightmap: HeightmapConfig::binary_prenormalized(),
            ..GeneratorConfig::binary(seed)
        },
        Mode::Binary => GeneratorConfig::binary(seed),
    };

    config.size = size;
    config.scale = scale;
    config.heightmap.noise.layers = layers;
    config.heightmap.noise.inner_octaves = inner_octaves;
    if let Some(divisor) = mask_divisor {
        config.heightmap.mask_divisor = divisor;
    }
    config
}

fn run_generate(config: &GeneratorConfig, output: PathBuf, heightmap: Option<PathBuf>) {
    let mode_name = match config.mode {
        ClassificationMode::Binary { .. } => "binary",
        ClassificationMode::Banded(_) => "banded",
    };

    println!("Islandgen - Procedural Island Generator");
    println!("=======================================");
    println!("Size: {}x{} cells", config.size, config.size);
    println!("Seed: {}", config.seed);
    println!("Mode: {}", mode_name);
    println!("Mask divisor: {}", config.heightmap.mask_divisor);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let map = config.generate().unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });
    println!("Generation completed in {:.2?}", start.elapsed());

    let (min_h, max_h) = map.elevation.range();
    println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
    println!("Land fraction: {:.1}%", map.land_fraction() * 100.0);

    if let Some(dir) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).unwrap_or_else(|e| {
            eprintln!("Error creating output directory: {}", e);
            std::process::exit(1);
        });
    }

    let options = BiomeMapOptions::with_scale(config.scale);
    export_biome_map_png(&map.bands, &config.mode, &output, &options).unwrap_or_else(|e| {
        eprintln!("Error exporting map: {}", e);
        std::process::exit(1);
    });
    println!("  Exported map: {}", output.display());

    if let Some(path) = heightmap {
        let options = PngExportOptions::auto_range(&map.elevation);
        export_heightmap_png(&map.elevation, &path, &options).unwrap_or_else(|e| {
            eprintln!("Error exporting heightmap: {}", e);
            std::process::exit(1);
        });
        println!("  Exported heightmap: {}", path.display());
    }
}

fn run_info(size: usize, scale: u32) {
    let cells = (size as u64) * (size as u64);
    let side = (size as u64) * (scale as u64);

    let bytes_heights = cells * 4; // f32
    let bytes_bands = cells; // u8
    let bytes_rgb = side * side * 3;
    let bytes_gray16 = cells * 2;
    let mb = |b: u64| b as f64 / 1024.0 / 1024.0;

    println!("Islandgen - Map Configuration Info");
    println!("==================================");
    println!();
    println!("Grid: {}x{} cells ({} total)", size, size, cells);
    println!("Image: {}x{} pixels at scale {}", side, side, scale);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Heights:  {:>12} bytes ({:.2} MB)", bytes_heights, mb(bytes_heights));
    println!("  Bands:    {:>12} bytes ({:.2} MB)", bytes_bands, mb(bytes_bands));
    println!("  RGB map:  {:>12} bytes ({:.2} MB)", bytes_rgb, mb(bytes_rgb));
    println!();
    println!("Uncompressed export sizes:");
    println!("  Biome map (RGB8):   {:>10} bytes ({:.2} MB)", bytes_rgb, mb(bytes_rgb));
    println!("  Heightmap (L16):    {:>10} bytes ({:.2} MB)", bytes_gray16, mb(bytes_gray16));

    if size == 0 || scale == 0 {
        println!();
        println!("Warning: size and scale must both be greater than 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_conflicts_with_generation_flags() {
        let parse = |extra: &[&str]| {
            let mut args = vec!["islandgen", "generate", "--config", "a.json"];
            args.extend_from_slice(extra);
            Cli::try_parse_from(args)
        };

        assert!(parse(&["--size", "32"]).is_err());
        assert!(parse(&["--mode", "binary"]).is_err());
        assert!(parse(&["--prenormalize"]).is_err());
        assert!(parse(&["--dump-config"]).is_ok());
        assert!(parse(&[]).is_ok());
    }

    #[test]
    fn test_prenormalize_requires_binary_mode() {
        assert!(check_mode_flags(Mode::Banded, true).is_err());
        assert!(check_mode_flags(Mode::Binary, true).is_ok());
        assert!(check_mode_flags(Mode::Banded, false).is_ok());
    }

    #[test]
    fn test_build_config_applies_flags() {
        let config = build_config(64, 2, Some(7), Mode::Binary, Some(1.75), 4, 6, true);
        assert_eq!(config.size, 64);
        assert_eq!(config.scale, 2);
        assert_eq!(config.seed, 7);
        assert_eq!(config.heightmap.mask_divisor, 1.75);
        assert_eq!(config.heightmap.noise.layers, 4);
        assert_eq!(config.heightmap.noise.inner_octaves, 6);
        assert!(config.heightmap.normalize_before_mask);
        assert!(!config.heightmap.normalize_after_mask);
    }
}
