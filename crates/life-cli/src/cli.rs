//! Command-line arguments and their mapping onto [`RunConfig`].

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use life_core::{EdgePolicy, InitialSource, LineDelimiter, Position, RandomConfig, Region, RunConfig};
use std::path::PathBuf;
use std::str::FromStr;

/// Where `--save` writes when given without a path
pub const DEFAULT_SAVE_PATH: &str = "cells/random.cells";

/// Conway's Game of Life in the terminal.
///
/// Loads a starting grid from a file, generates a random one, or plots a
/// list of cells, then prints every generation.
#[derive(Debug, Parser)]
#[command(name = "life", author, version, about)]
#[command(group(ArgGroup::new("source").args(["file", "random", "cells"])))]
pub struct Args {
    /// Grid file to start from
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Generate random starting cells
    #[arg(short, long)]
    pub random: bool,

    /// Start with these cells alive (repeatable)
    #[arg(short = 'c', long = "cell", value_name = "X,Y")]
    pub cells: Vec<CellArg>,

    /// JSON run configuration; other flags override it
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grid dimensions expressed as WIDTHxHEIGHT (for example 200x100)
    #[arg(short = 's', long = "size", value_name = "WIDTHxHEIGHT")]
    pub size: Option<GridSizeArg>,

    /// Behaviour at the grid edges
    #[arg(long, value_enum, value_name = "POLICY")]
    pub edges: Option<EdgeArg>,

    /// Seed for random mode
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Spawn chance for random mode; a value of k spawns with probability (k-1)/9
    #[arg(
        long,
        value_name = "K",
        requires = "random",
        value_parser = clap::value_parser!(u32).range(0..=10)
    )]
    pub spawn_chance: Option<u32>,

    /// Only populate this part of the grid in random mode
    #[arg(long, value_name = "X,Y,WxH", requires = "random")]
    pub region: Option<RegionArg>,

    /// Save the random grid so the run can be replayed
    #[arg(
        long,
        value_name = "PATH",
        requires = "random",
        num_args = 0..=1,
        default_missing_value = DEFAULT_SAVE_PATH
    )]
    pub save: Option<PathBuf>,

    /// Character for live cells
    #[arg(long, value_name = "CHAR")]
    pub alive: Option<char>,

    /// Character for dead cells
    #[arg(long, value_name = "CHAR")]
    pub dead: Option<char>,

    /// End a row at any non-marker character instead of only at newlines
    #[arg(long)]
    pub legacy_rows: bool,

    /// Milliseconds between generations
    #[arg(short, long, value_name = "MILLISECONDS")]
    pub delay: Option<u64>,

    /// Stop after this many generations
    #[arg(short, long, value_name = "COUNT")]
    pub generations: Option<u64>,

    /// Do not clear the screen between frames
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeArg {
    Clipped,
    Toroidal,
}

impl From<EdgeArg> for EdgePolicy {
    fn from(arg: EdgeArg) -> Self {
        match arg {
            EdgeArg::Clipped => EdgePolicy::Clipped,
            EdgeArg::Toroidal => EdgePolicy::Toroidal,
        }
    }
}

/// Grid dimensions parsed from a WIDTHxHEIGHT argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSizeArg {
    pub width: i32,
    pub height: i32,
}

impl FromStr for GridSizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format WIDTHxHEIGHT".to_string())?;

        let width = parse_dimension(width, "width")?;
        let height = parse_dimension(height, "height")?;

        Ok(Self { width, height })
    }
}

/// A cell parsed from an `X,Y` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArg(pub Position);

impl FromStr for CellArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| "expected format X,Y".to_string())?;
        let x = x.trim().parse::<i32>().map_err(|error| format!("invalid x: {error}"))?;
        let y = y.trim().parse::<i32>().map_err(|error| format!("invalid y: {error}"))?;
        Ok(Self(Position::new(x, y)))
    }
}

/// A region parsed from an `X,Y,WxH` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionArg(pub Region);

impl FromStr for RegionArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(3, ',');
        let (Some(x), Some(y), Some(size)) = (parts.next(), parts.next(), parts.next()) else {
            return Err("expected format X,Y,WxH".to_string());
        };

        let CellArg(origin) = format!("{x},{y}").parse::<CellArg>()?;
        let size = size.parse::<GridSizeArg>()?;
        Ok(Self(Region::new(origin.x, origin.y, size.width, size.height)))
    }
}

fn parse_dimension(value: &str, name: &str) -> Result<i32, String> {
    let parsed = value
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid {name}: {error}"))?;
    if parsed <= 0 {
        return Err(format!("{name} must be positive"));
    }
    Ok(parsed)
}

impl Args {
    /// Merge the optional config file with the flags given on the command line
    pub fn into_run_config(self) -> Result<(RunConfig, bool)> {
        let has_source = self.file.is_some() || self.random || !self.cells.is_empty();

        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None if has_source => RunConfig::default(),
            None => bail!("no starting state: pass --file, --random, --cell or --config"),
        };

        if let Some(size) = self.size {
            config.grid.width = size.width;
            config.grid.height = size.height;
        }
        if let Some(edges) = self.edges {
            config.grid.edge_policy = edges.into();
        }
        if let Some(alive) = self.alive {
            config.format.alive = alive;
        }
        if let Some(dead) = self.dead {
            config.format.dead = dead;
        }
        if self.legacy_rows {
            config.format.delimiter = LineDelimiter::AnyNonMarker;
        }
        if let Some(delay) = self.delay {
            config.delay_ms = delay;
        }
        if self.generations.is_some() {
            config.max_generations = self.generations;
        }

        if let Some(path) = self.file {
            config.source = InitialSource::File { path };
        } else if self.random {
            let mut random = match config.source {
                InitialSource::Random(random) => random,
                _ => RandomConfig::default(),
            };
            random.seed = self.seed.or(random.seed);
            random.spawn_chance = self.spawn_chance.unwrap_or(random.spawn_chance);
            random.region = self.region.map(|RegionArg(region)| region).or(random.region);
            random.save_path = self.save.or(random.save_path);
            config.source = InitialSource::Random(random);
        } else if !self.cells.is_empty() {
            config.source = InitialSource::Coordinates {
                cells: self.cells.into_iter().map(|CellArg(pos)| pos).collect(),
            };
        }

        config.validate().context("Invalid run configuration")?;
        Ok((config, !self.no_clear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("life").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_file_mode() {
        let (config, clear) = parse(&["-f", "cells/glider.cells", "--size", "40x20"])
            .into_run_config()
            .unwrap();
        assert!(clear);
        assert_eq!(config.grid.width, 40);
        assert_eq!(config.grid.height, 20);
        match config.source {
            InitialSource::File { path } => assert_eq!(path, PathBuf::from("cells/glider.cells")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_random_mode_with_options() {
        let (config, _) = parse(&[
            "-r",
            "--seed",
            "7",
            "--spawn-chance",
            "6",
            "--region",
            "0,0,100x50",
            "--save",
            "--edges",
            "toroidal",
        ])
        .into_run_config()
        .unwrap();

        assert_eq!(config.grid.edge_policy, EdgePolicy::Toroidal);
        match config.source {
            InitialSource::Random(random) => {
                assert_eq!(random.seed, Some(7));
                assert_eq!(random.spawn_chance, 6);
                assert_eq!(random.region, Some(Region::new(0, 0, 100, 50)));
                assert_eq!(random.save_path, Some(PathBuf::from(DEFAULT_SAVE_PATH)));
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_cell_mode() {
        let (config, clear) = parse(&["-c", "1,2", "-c", "2,2", "--cell", "3,2", "--no-clear", "-g", "4"])
            .into_run_config()
            .unwrap();
        assert!(!clear);
        assert_eq!(config.max_generations, Some(4));
        match config.source {
            InitialSource::Coordinates { cells } => assert_eq!(
                cells,
                vec![Position::new(1, 2), Position::new(2, 2), Position::new(3, 2)]
            ),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_sources_conflict() {
        let result = Args::try_parse_from(["life", "-r", "-f", "x.cells"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_requires_random() {
        let result = Args::try_parse_from(["life", "-f", "x.cells", "--seed", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_source() {
        assert!(parse(&["--size", "10x10"]).into_run_config().is_err());
    }

    #[test]
    fn test_same_markers_rejected() {
        let result = parse(&["-r", "--alive", "x", "--dead", "x"]).into_run_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_argument_parsers() {
        assert_eq!(
            "12x18".parse::<GridSizeArg>(),
            Ok(GridSizeArg { width: 12, height: 18 })
        );
        assert!("12x0".parse::<GridSizeArg>().is_err());
        assert!("12".parse::<GridSizeArg>().is_err());

        assert_eq!("-1, 4".parse::<CellArg>(), Ok(CellArg(Position::new(-1, 4))));
        assert!("1;4".parse::<CellArg>().is_err());

        assert_eq!(
            "5,6,10x3".parse::<RegionArg>(),
            Ok(RegionArg(Region::new(5, 6, 10, 3)))
        );
        assert!("5,6".parse::<RegionArg>().is_err());
    }
}
