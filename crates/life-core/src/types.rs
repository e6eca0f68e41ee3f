//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(&self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Next state under the B3/S23 rule given the live-neighbour count
    pub fn next(self, live_neighbors: u8) -> Cell {
        match (self, live_neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
            (Cell::Dead, 3) => Cell::Alive,                     // Birth
            _ => Cell::Dead,                                    // Death or stays dead
        }
    }
}

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight Moore-neighbourhood directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// How neighbour lookups behave past the grid edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Off-grid neighbours are dead
    #[default]
    Clipped,
    /// Off-grid neighbours wrap to the opposite edge
    Toroidal,
}

impl EdgePolicy {
    /// Map a neighbour position onto the grid, or `None` if it falls off
    pub fn resolve(&self, pos: Position, width: i32, height: i32) -> Option<Position> {
        match self {
            EdgePolicy::Clipped => pos.in_bounds(width, height).then_some(pos),
            EdgePolicy::Toroidal => Some(pos.wrap(width, height)),
        }
    }
}

/// What ends a row when reading the textual grid format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDelimiter {
    /// `'\n'` ends a row, `'\r'` is ignored, anything else is dead filler
    #[default]
    Newline,
    /// Any character that is not a marker ends the row
    AnyNonMarker,
}

/// Rectangular sub-region of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn full(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Intersect with a `width` x `height` grid; may come back empty
    pub fn clip(&self, width: i32, height: i32) -> Region {
        let x0 = self.x.clamp(0, width);
        let y0 = self.y.clamp(0, height);
        let x1 = self.x.saturating_add(self.width).clamp(x0, width);
        let y1 = self.y.saturating_add(self.height).clamp(y0, height);
        Region::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let Region { x, y, width, height } = *self;
        let (x_end, y_end) = (x.saturating_add(width.max(0)), y.saturating_add(height.max(0)));
        (y..y_end).flat_map(move |py| (x..x_end).map(move |px| Position::new(px, py)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10, 10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10, 10), Position::new(9, 9));

        let pos = Position::new(10, 10);
        assert_eq!(pos.wrap(10, 10), Position::new(0, 0));

        let pos = Position::new(-21, 33);
        assert_eq!(pos.wrap(10, 10), Position::new(9, 3));
    }

    #[test]
    fn test_cell_rule() {
        for n in 0..=8 {
            let expected = if n == 2 || n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(Cell::Alive.next(n), expected, "alive with {} neighbours", n);

            let expected = if n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(Cell::Dead.next(n), expected, "dead with {} neighbours", n);
        }
    }

    #[test]
    fn test_edge_policy_resolve() {
        let off = Position::new(-1, 4);
        assert_eq!(EdgePolicy::Clipped.resolve(off, 5, 5), None);
        assert_eq!(EdgePolicy::Toroidal.resolve(off, 5, 5), Some(Position::new(4, 4)));

        let inside = Position::new(2, 2);
        assert_eq!(EdgePolicy::Clipped.resolve(inside, 5, 5), Some(inside));
    }

    #[test]
    fn test_region_clip() {
        let quadrant = Region::new(0, 0, 100, 50).clip(200, 100);
        assert_eq!(quadrant, Region::new(0, 0, 100, 50));

        let overhanging = Region::new(-3, 8, 6, 6).clip(10, 10);
        assert_eq!(overhanging, Region::new(0, 8, 3, 2));

        let outside = Region::new(20, 20, 5, 5).clip(10, 10);
        assert!(outside.is_empty());
        assert_eq!(outside.positions().count(), 0);
    }

    #[test]
    fn test_region_positions_near_i32_max() {
        let region = Region::new(i32::MAX - 1, i32::MAX - 1, 10, 10);
        let positions: Vec<_> = region.positions().collect();
        assert_eq!(
            positions,
            vec![Position::new(i32::MAX - 1, i32::MAX - 1)]
        );
    }

    #[test]
    fn test_region_positions() {
        let positions: Vec<_> = Region::new(1, 2, 2, 2).positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(1, 3),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));

        let deltas: std::collections::HashSet<_> =
            Direction::all().iter().map(|d| d.to_delta()).collect();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
    }
}
