//! Fixed-size 2D grid of cells.

use crate::format::push_rows;
use life_core::{Cell, Error, FormatConfig, Position, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size rectangular grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Dead; size],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// Cell at an in-bounds position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid; every rule-evaluation path clips
    /// or wraps before reading.
    pub fn get(&self, pos: Position) -> Cell {
        match self.try_get(pos) {
            Some(cell) => cell,
            None => panic!(
                "read of {} outside {}x{} grid",
                pos, self.width, self.height
            ),
        }
    }

    pub fn try_get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.pos_to_index(pos)])
    }

    /// Set a cell, failing without writing anything if `pos` is off the grid
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
        Ok(())
    }

    /// Reset every cell to dead
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Number of live cells, counted fresh
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub(crate) fn set_index(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Row-major index of an in-bounds position
    pub(crate) fn pos_to_index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Positions of every live cell
    pub fn alive(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
    }
}

impl fmt::Display for Grid {
    /// Renders with the default markers, one line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        push_rows(&mut text, self, &FormatConfig::default());
        f.write_str(&text)
    }
}
