//! Conway's Game of Life on a torus
//!
//! The update only needs the population of each 3x3 block *including* the
//! cell itself: 0-2 dies, 3 lives, 4 keeps its state, 5-9 dies. That sum is
//! separable, so it takes two row shifts and two column shifts instead of
//! nine lookups per cell.

use crate::grid::Grid;

/// Population of every 3x3 neighborhood, the center cell included (0-9).
pub fn neighborhood_count(grid: &Grid) -> Grid {
    let mut vertical = grid.clone();
    vertical.add_row_shift(grid, -1);
    vertical.add_row_shift(grid, 1);

    let mut count = vertical.clone();
    count.add_col_shift(&vertical, -1);
    count.add_col_shift(&vertical, 1);
    count
}

/// Next state for a cell given its self-inclusive neighborhood count
#[inline]
pub fn next_state(current: u8, count: u8) -> u8 {
    match count {
        3 => 1,
        4 => current,
        _ => 0,
    }
}

/// Apply the rule element-wise, writing the next generation back into `grid`.
pub fn apply_rule(grid: &mut Grid, counts: &Grid) {
    for (cell, &count) in grid.cells_mut().iter_mut().zip(counts.cells()) {
        *cell = next_state(*cell, count);
    }
}

/// Advance `grid` by one generation
pub fn step(grid: &mut Grid) {
    let counts = neighborhood_count(grid);
    apply_rule(grid, &counts);
}
