//! Builders for the first generation.

use crate::format::{parse_grid, write_grid};
use crate::grid::Grid;
use life_core::{
    Cell, Error, FormatConfig, InitialSource, Position, RandomConfig, Region, Result, RunConfig,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, instrument, warn};

/// Build the initial grid described by `config.source`
#[instrument(skip(config), fields(width = config.grid.width, height = config.grid.height))]
pub fn load_initial(config: &RunConfig) -> Result<Grid> {
    let (width, height) = (config.grid.width, config.grid.height);

    let grid = match &config.source {
        InitialSource::File { path } => load_file(path, &config.format, width, height)?,
        InitialSource::Random(random) => random_grid(random, &config.format, width, height)?,
        InitialSource::Coordinates { cells } => from_coordinates(cells, width, height)?,
    };

    info!(population = grid.population(), "Initial grid ready");
    Ok(grid)
}

/// Read a grid from a file in the textual format
pub fn load_file(path: &Path, format: &FormatConfig, width: i32, height: i32) -> Result<Grid> {
    info!("Reading {}", path.display());

    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_grid(BufReader::new(file), format, width, height).map_err(|source| {
        Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Write a grid to a file in the textual format
pub fn save_grid(path: &Path, grid: &Grid, format: &FormatConfig) -> Result<()> {
    info!("Writing {}", path.display());

    let unwritable = |source| Error::FileUnwritable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(unwritable)?;
    write_grid(BufWriter::new(file), grid, format).map_err(unwritable)
}

/// Seed used when none is configured
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Generate a random grid and persist it if a save path is configured
pub fn random_grid(
    config: &RandomConfig,
    format: &FormatConfig,
    width: i32,
    height: i32,
) -> Result<Grid> {
    let seed = config.seed.unwrap_or_else(time_seed);
    info!(seed, spawn_chance = config.spawn_chance, "Generating random grid");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid = generate_random(config, width, height, &mut rng);

    if let Some(path) = &config.save_path {
        save_grid(path, &grid, format)?;
    }

    Ok(grid)
}

/// Populate the configured region at random.
///
/// A cell spawns when `rng.gen_range(0..9) < spawn_chance - 1`, so a spawn
/// chance of `k` gives a probability of `(k - 1) / 9`. Cells outside the
/// region stay dead.
pub fn generate_random<R: Rng>(config: &RandomConfig, width: i32, height: i32, rng: &mut R) -> Grid {
    let mut grid = Grid::new(width, height);
    let threshold = config.spawn_chance.saturating_sub(1);

    let region = config
        .region
        .unwrap_or_else(|| Region::full(width, height))
        .clip(width, height);
    if region.is_empty() {
        warn!(region = ?config.region, "Spawn region lies outside the grid");
    }

    for pos in region.positions() {
        if rng.gen_range(0..9u32) < threshold {
            let index = grid.pos_to_index(pos);
            grid.set_index(index, Cell::Alive);
        }
    }

    debug!(population = grid.population(), ?region, "Random grid generated");
    grid
}

/// Build a grid with exactly `coords` alive.
///
/// Every coordinate is validated before any cell is set; a single invalid
/// coordinate fails the whole call.
pub fn from_coordinates(coords: &[Position], width: i32, height: i32) -> Result<Grid> {
    if let Some(bad) = coords.iter().find(|pos| !pos.in_bounds(width, height)) {
        return Err(Error::InvalidCoordinate {
            x: bad.x,
            y: bad.y,
            width,
            height,
        });
    }

    let mut grid = Grid::new(width, height);
    for &pos in coords {
        grid.set(pos, Cell::Alive)?;
    }
    Ok(grid)
}
