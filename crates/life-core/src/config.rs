//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::{EdgePolicy, LineDelimiter, Position, Region};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest number of cells a grid may hold
pub const MAX_CELLS: i64 = i32::MAX as i64;

/// Grid dimensions and boundary behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// Neighbour lookup past the edges
    pub edge_policy: EdgePolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            edge_policy: EdgePolicy::Clipped,
        }
    }
}

/// Characters used by the textual grid format and the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub alive: char,
    pub dead: char,
    pub delimiter: LineDelimiter,
}

impl FormatConfig {
    pub fn marker(&self, alive: bool) -> char {
        if alive {
            self.alive
        } else {
            self.dead
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            alive: 'O',
            dead: '.',
            delimiter: LineDelimiter::Newline,
        }
    }
}

/// Random initial state parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Explicit seed; a time-derived one is used when absent
    pub seed: Option<u64>,
    /// A cell spawns when `roll(0..9) < spawn_chance - 1`
    pub spawn_chance: u32,
    /// Area to populate; the full grid when absent
    pub region: Option<Region>,
    /// Where to persist the generated grid, if anywhere
    pub save_path: Option<PathBuf>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_chance: 4,
            region: None,
            save_path: None,
        }
    }
}

/// Where the first generation comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InitialSource {
    File { path: PathBuf },
    Random(RandomConfig),
    Coordinates { cells: Vec<Position> },
}

impl Default for InitialSource {
    fn default() -> Self {
        InitialSource::Random(RandomConfig::default())
    }
}

/// Everything needed to start a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub format: FormatConfig,
    pub source: InitialSource,
    pub delay_ms: u64,
    /// Stop after this many generations; runs forever when absent
    pub max_generations: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            format: FormatConfig::default(),
            source: InitialSource::default(),
            delay_ms: 100,
            max_generations: None,
        }
    }
}

impl RunConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading run configuration from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::FileUnreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let config: RunConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.width <= 0 || self.grid.height <= 0 {
            return Err(Error::Validation(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.grid.width as i64 * self.grid.height as i64 > MAX_CELLS {
            return Err(Error::Validation(format!(
                "grid of {}x{} exceeds {} cells",
                self.grid.width, self.grid.height, MAX_CELLS
            )));
        }

        let FormatConfig { alive, dead, .. } = self.format;
        if alive == dead {
            return Err(Error::Validation(format!(
                "alive and dead markers must differ, both are {:?}",
                alive
            )));
        }
        if [alive, dead].iter().any(|c| matches!(c, '\n' | '\r')) {
            return Err(Error::Validation(
                "markers cannot be line terminators".to_string(),
            ));
        }

        if let InitialSource::Random(random) = &self.source {
            if random.spawn_chance > 10 {
                return Err(Error::Validation(format!(
                    "spawn chance must be in 0..=10, got {}",
                    random.spawn_chance
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = RunConfig::default();
        assert_eq!(config.grid.width, 200);
        assert_eq!(config.grid.height, 100);
        assert_eq!(config.grid.edge_policy, EdgePolicy::Clipped);
        assert_eq!(config.format.alive, 'O');
        assert_eq!(config.format.dead, '.');
        assert_eq!(config.delay_ms, 100);
        assert!(config.max_generations.is_none());

        match config.source {
            InitialSource::Random(random) => {
                assert_eq!(random.spawn_chance, 4);
                assert!(random.seed.is_none());
            }
            other => panic!("unexpected default source: {:?}", other),
        }
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = RunConfig::default();
        config.grid.width = 0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunConfig::default();
        config.grid.width = 65536;
        config.grid.height = 32769;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        config.grid.height = 32767;
        assert!(config.validate().is_ok());

        let mut config = RunConfig::default();
        config.format.dead = 'O';
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunConfig::default();
        config.format.alive = '\n';
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = RunConfig::default();
        config.source = InitialSource::Random(RandomConfig {
            spawn_chance: 11,
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_run_config_serialization() {
        let json = r#"{
            "grid": { "width": 40, "height": 20, "edge_policy": "toroidal" },
            "format": { "alive": "*" },
            "source": { "mode": "coordinates", "cells": [{ "x": 1, "y": 2 }] },
            "delay_ms": 50
        }"#;

        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.width, 40);
        assert_eq!(config.grid.edge_policy, EdgePolicy::Toroidal);
        assert_eq!(config.format.alive, '*');
        assert_eq!(config.format.dead, '.');
        assert_eq!(config.delay_ms, 50);
        match &config.source {
            InitialSource::Coordinates { cells } => assert_eq!(cells, &vec![Position::new(1, 2)]),
            other => panic!("unexpected source: {:?}", other),
        }

        let round = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&round).unwrap();
        assert_eq!(deserialized.grid.height, 20);
    }

    #[test]
    fn test_demo_configs_load() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");

        let config = RunConfig::from_json_file(demos.join("toroidal-glider.json")).unwrap();
        assert_eq!(config.grid.edge_policy, EdgePolicy::Toroidal);
        assert_eq!(config.max_generations, Some(200));
        assert!(matches!(config.source, InitialSource::File { .. }));

        let config = RunConfig::from_json_file(demos.join("random-quadrant.json")).unwrap();
        assert_eq!(config.delay_ms, 100);
        match config.source {
            InitialSource::Random(random) => {
                assert_eq!(random.seed, Some(2023));
                assert_eq!(random.region, Some(Region::new(0, 0, 100, 50)));
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_missing_config_file() {
        let err = RunConfig::from_json_file("/nonexistent/life/config.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
