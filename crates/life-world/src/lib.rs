//! Game of Life simulation engine.
//!
//! This crate holds the grid, the neighbour counter, the generation stepper,
//! the textual grid format and the loaders that build the first generation.

pub mod grid;
pub mod neighbors;
pub mod stepper;
pub mod format;
pub mod loader;
pub mod simulation;

pub use grid::Grid;
pub use neighbors::count_live_neighbors;
pub use stepper::{advance, advance_into};
pub use loader::load_initial;
pub use simulation::{Simulation, SimulationResult, StepReport};
