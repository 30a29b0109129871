//! Hollowgen - Entry Point
//!
//! Generates a single map from the command line and prints it as text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hollowgen::data::{self, GeneratorProfile};
use hollowgen::world::generation::{CellularAutomataGenerator, DungeonGenerator, NoiseGenerator};
use hollowgen::world::Grid;

/// Characters used to shade noise, from lowest to highest
const NOISE_SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Generator {
    /// Rooms joined by winding corridors
    Dungeon,
    /// Cellular automata caves
    Caves,
    /// Value noise
    Noise,
}

/// Generate a map and print it to the terminal.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// RON profile with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible maps; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in cells
    #[arg(
        short = 'W',
        long,
        default_value_t = 61,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    width: i32,

    /// Map height in cells
    #[arg(
        short = 'H',
        long,
        default_value_t = 31,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    height: i32,

    /// Generator to run
    #[arg(value_enum, short, long, default_value_t = Generator::Dungeon)]
    generator: Generator,

    /// Write the default profile to this path and exit
    #[arg(long)]
    export_config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Some(path) = &args.export_config {
        data::export_default_profile(path)
            .with_context(|| format!("Failed to export profile to {}", path.display()))?;
        log::info!("Wrote default profile to {}", path.display());
        return Ok(());
    }

    let profile: GeneratorProfile = match &args.config {
        Some(path) => data::load_config(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => GeneratorProfile::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Generating {:?} map {}x{} with seed {}",
        args.generator,
        args.width,
        args.height,
        seed
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(args.width, args.height);

    let rows = match args.generator {
        Generator::Dungeon => {
            let tiles = profile.dungeon.tiles;
            let mut generator = DungeonGenerator::with_config(profile.dungeon);
            let layout = generator
                .generate(&mut grid, &mut rng)
                .context("Dungeon generation failed")?;
            if layout.unjoined_regions > 1 {
                log::warn!("{} groups of regions could not be joined", layout.unjoined_regions);
            }
            render(&grid, |value| tiles.classify(value).glyph())
        }
        Generator::Caves => {
            let marker = profile.caves.marker;
            CellularAutomataGenerator::new(profile.caves).generate(&mut grid, &mut rng);
            render(&grid, |value| if value >= marker { '#' } else { '.' })
        }
        Generator::Noise => {
            let modifier = profile.noise.modifier;
            let mut generator = NoiseGenerator::new(profile.noise);
            generator.generate(&mut grid, &mut rng).context("Noise generation failed")?;
            log::debug!("Noise seed {}", generator.seed());
            render(&grid, |value| shade(value, modifier))
        }
    };

    for row in rows {
        println!("{}", row);
    }
    Ok(())
}

/// Turn every grid row into a line of text
fn render(grid: &Grid, glyph: impl Fn(f32) -> char) -> Vec<String> {
    (0..grid.height())
        .map(|y| (0..grid.width()).map(|x| glyph(grid.get(x, y))).collect())
        .collect()
}

fn shade(value: f32, modifier: f32) -> char {
    if modifier <= 0.0 {
        return NOISE_SHADES[0];
    }
    let level = (value / modifier * NOISE_SHADES.len() as f32) as usize;
    NOISE_SHADES[level.min(NOISE_SHADES.len() - 1)]
}
