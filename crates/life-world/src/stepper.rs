//! Generation advance under the B3/S23 rule.

use crate::grid::Grid;
use crate::neighbors::count_live_neighbors;
use life_core::EdgePolicy;

/// Compute the next generation into a fresh grid.
///
/// Returns the new grid and its population.
pub fn advance(grid: &Grid, policy: EdgePolicy) -> (Grid, usize) {
    let mut next = Grid::new(grid.width(), grid.height());
    let population = advance_into(grid, &mut next, policy);
    (next, population)
}

/// Compute the next generation of `current` into `next`, overwriting every
/// cell of `next`. Returns the population of `next`.
///
/// # Panics
///
/// Panics if the two grids differ in size.
pub fn advance_into(current: &Grid, next: &mut Grid, policy: EdgePolicy) -> usize {
    assert_eq!(
        (current.width(), current.height()),
        (next.width(), next.height()),
        "generation buffers must have the same dimensions"
    );

    for (index, (pos, cell)) in current.iter().enumerate() {
        let live_neighbors = count_live_neighbors(current, pos, policy);
        next.set_index(index, cell.next(live_neighbors));
    }

    next.population()
}
