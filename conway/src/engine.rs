// engine.rs - One generation of Conway's Game of Life on a bounded grid

use crate::grid::{Grid, TRow};

/// Moore neighbourhood as (row, column) deltas.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// Live cells around `(row, col)`. Neighbours past the edge are skipped,
/// the grid does not wrap.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let dims = grid.dimensions();
    let mut count = 0;
    for &(dr, dc) in &NEIGHBOR_OFFSETS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if dims.contains(nr, nc) && grid.is_alive(nr, nc) {
            count += 1;
        }
    }
    count
}

/// B3/S23.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Isolation, overcrowding, or stays dead
    }
}

/// Next state of one row, read entirely from `current`.
fn next_row(current: &Grid, row: usize) -> TRow {
    (0..current.dimensions().columns())
        .map(|col| next_state(current.is_alive(row, col), live_neighbors(current, row, col)))
        .collect()
}

/// Computes the following generation into a fresh grid of the same size.
/// Every cell is evaluated against the input, so updates are simultaneous.
pub fn next_generation(current: &Grid) -> Grid {
    let dims = current.dimensions();
    let rows = (0..dims.rows()).map(|row| next_row(current, row)).collect();
    Grid::from_rows(dims, rows)
}
