//! Simulation driver owning the generation buffers.

use crate::grid::Grid;
use crate::loader::load_initial;
use crate::stepper::advance_into;
use life_core::{EdgePolicy, Result, RunConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, event, info, instrument, Level};

/// Outcome of a single generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub population: usize,
    /// False when the new generation equals the previous one
    pub changed: bool,
}

/// Totals for a bounded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generations: u64,
    pub final_population: usize,
    /// First generation with no live cells
    pub extinct_at: Option<u64>,
    /// First generation identical to its predecessor
    pub static_at: Option<u64>,
}

pub struct Simulation {
    current: Grid,
    next: Grid,
    policy: EdgePolicy,
    generation: u64,
    population: usize,
}

impl Simulation {
    pub fn new(grid: Grid, policy: EdgePolicy) -> Self {
        let next = Grid::new(grid.width(), grid.height());
        let population = grid.population();
        Self {
            current: grid,
            next,
            policy,
            generation: 0,
            population,
        }
    }

    /// Load the initial grid from `config` and wrap it in a simulation
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        config.validate()?;
        let grid = load_initial(config)?;
        Ok(Self::new(grid, config.grid.edge_policy))
    }

    /// Current generation, read-only
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Advance one generation, swapping the buffers afterwards
    pub fn step(&mut self) -> StepReport {
        self.population = advance_into(&self.current, &mut self.next, self.policy);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            population: self.population,
            changed: self.current != self.next,
        };
        debug!(
            generation = report.generation,
            population = report.population,
            changed = report.changed,
            "Generation advanced"
        );
        report
    }

    /// Run `generations` steps and summarize
    #[instrument(skip(self), fields(start = self.generation))]
    pub fn run(&mut self, generations: u64) -> SimulationResult {
        info!("Running {} generations", generations);

        let mut extinct_at = None;
        let mut static_at = None;

        for i in 0..generations {
            let report = self.step();

            if report.population == 0 && extinct_at.is_none() {
                extinct_at = Some(report.generation);
            }
            if !report.changed && static_at.is_none() {
                static_at = Some(report.generation);
            }

            if i % 1000 == 0 {
                info!(
                    "Generation {}: {} cells alive",
                    report.generation, report.population
                );
            }
        }

        event!(
            Level::INFO,
            gauge_name = "final_population",
            gauge_value = self.population,
            "Final population gauge"
        );

        SimulationResult {
            generations,
            final_population: self.population,
            extinct_at,
            static_at,
        }
    }
}
