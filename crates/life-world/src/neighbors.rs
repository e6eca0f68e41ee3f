//! Moore-neighbourhood counting.

use crate::grid::Grid;
use life_core::{Direction, EdgePolicy, Position};

/// Number of live cells among the eight neighbours of `pos`.
///
/// Under [`EdgePolicy::Clipped`] neighbours past the edge count as dead.
/// Under [`EdgePolicy::Toroidal`] every one of the eight slots is resolved by
/// wrapping, so on grids narrower than three cells a slot may land on the
/// same cell as another slot, or on `pos` itself.
pub fn count_live_neighbors(grid: &Grid, pos: Position, policy: EdgePolicy) -> u8 {
    neighbor_positions(grid, pos, policy)
        .filter(|&neighbor| grid.get(neighbor).is_alive())
        .count() as u8
}

/// Neighbour positions that `policy` actually examines for `pos`
pub fn neighbor_positions(
    grid: &Grid,
    pos: Position,
    policy: EdgePolicy,
) -> impl Iterator<Item = Position> {
    let (width, height) = (grid.width(), grid.height());
    Direction::all().into_iter().filter_map(move |dir| {
        let (dx, dy) = dir.to_delta();
        policy.resolve(pos.add(dx, dy), width, height)
    })
}
