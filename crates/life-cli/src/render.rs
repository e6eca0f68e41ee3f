//! Text frames for the terminal.

use life_core::FormatConfig;
use life_world::format::push_rows;
use life_world::Grid;
use std::io::{self, Write};

/// Move the cursor home and clear the screen
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// One frame: a status line, the grid, and a blank line
pub fn frame(grid: &Grid, generation: u64, population: usize, format: &FormatConfig) -> String {
    let mut out = format!("T {} Population: {}\n", generation, population);
    push_rows(&mut out, grid, format);
    out.push('\n');
    out
}

pub fn draw<W: Write>(
    mut out: W,
    grid: &Grid,
    generation: u64,
    population: usize,
    format: &FormatConfig,
    clear: bool,
) -> io::Result<()> {
    if clear {
        out.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    out.write_all(frame(grid, generation, population, format).as_bytes())?;
    out.flush()
}
