// grid.rs - Bounded grid types for Conway's Game of Life

use rand::Rng;
use serde::Deserialize;

use crate::error::{LifeError, Result};

/// Threshold used by the "random" button: a cell is born when a uniform
/// draw exceeds it, giving roughly 30% live cells.
pub const DEFAULT_RANDOM_THRESHOLD: f64 = 0.7;

pub type TRow = Vec<bool>;

/// Number of rows and columns of a grid. Both are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct GridDimensions {
    rows: usize,
    columns: usize,
}

#[derive(Deserialize)]
struct RawDimensions {
    rows: usize,
    columns: usize,
}

impl TryFrom<RawDimensions> for GridDimensions {
    type Error = LifeError;

    fn try_from(raw: RawDimensions) -> Result<Self> {
        GridDimensions::new(raw.rows, raw.columns)
    }
}

impl GridDimensions {
    /// Sizes offered by the grid size selector.
    pub const PRESETS: [GridDimensions; 4] = [
        GridDimensions { rows: 10, columns: 10 },
        GridDimensions { rows: 20, columns: 20 },
        GridDimensions { rows: 30, columns: 30 },
        GridDimensions { rows: 40, columns: 40 },
    ];

    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(LifeError::InvalidDimensions { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::PRESETS[1]
    }
}

impl std::fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.rows, self.columns)
    }
}

/// A bounded grid of cells, `true` meaning alive.
///
/// Grids are values: every edit returns a new grid and leaves the
/// original untouched, so a grid handed to the renderer never changes
/// underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dims: GridDimensions,
    rows: Vec<TRow>,
}

impl Grid {
    pub fn empty(dims: GridDimensions) -> Self {
        Self {
            dims,
            rows: vec![vec![false; dims.columns]; dims.rows],
        }
    }

    /// Random grid where each cell is alive when a uniform draw in
    /// `[0, 1)` exceeds `threshold`.
    pub fn random(dims: GridDimensions, threshold: f64) -> Result<Self> {
        Self::random_with(dims, threshold, &mut rand::thread_rng())
    }

    pub fn random_with<R: Rng>(
        dims: GridDimensions,
        threshold: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(LifeError::InvalidThreshold(threshold));
        }
        let rows = (0..dims.rows)
            .map(|_| {
                (0..dims.columns)
                    .map(|_| rng.gen_range(0.0..1.0) > threshold)
                    .collect()
            })
            .collect();
        Ok(Self { dims, rows })
    }

    /// Builds a grid from row vectors. Used by the engine, which always
    /// produces rows matching `dims`.
    pub(crate) fn from_rows(dims: GridDimensions, rows: Vec<TRow>) -> Self {
        debug_assert_eq!(rows.len(), dims.rows);
        debug_assert!(rows.iter().all(|r| r.len() == dims.columns));
        Self { dims, rows }
    }

    /// Grid with the listed cells alive. Out-of-range cells are rejected.
    pub fn with_alive(dims: GridDimensions, cells: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::empty(dims);
        for &(row, col) in cells {
            dims.check(row, col)?;
            grid.rows[row][col] = true;
        }
        Ok(grid)
    }

    /// Grid with the listed cells alive, dropping any that fall outside.
    pub(crate) fn with_alive_clipped(
        dims: GridDimensions,
        cells: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut grid = Self::empty(dims);
        for (row, col) in cells {
            if dims.contains(row, col) {
                grid.rows[row][col] = true;
            }
        }
        grid
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn rows(&self) -> &[TRow] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Copy of this grid with cell `(row, col)` set to `alive`.
    pub fn set(&self, row: usize, col: usize, alive: bool) -> Result<Self> {
        self.dims.check(row, col)?;
        let mut next = self.clone();
        next.rows[row][col] = alive;
        Ok(next)
    }

    /// Copy of this grid with cell `(row, col)` flipped.
    pub fn toggle(&self, row: usize, col: usize) -> Result<Self> {
        self.dims.check(row, col)?;
        let mut next = self.clone();
        next.rows[row][col] = !next.rows[row][col];
        Ok(next)
    }

    pub fn population(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Coordinates of every live cell, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, alive)| **alive)
                .map(move |(c, _)| (r, c))
        })
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dims(rows: usize, columns: usize) -> GridDimensions {
        GridDimensions::new(rows, columns).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            GridDimensions::new(0, 5),
            Err(LifeError::InvalidDimensions { rows: 0, columns: 5 })
        ));
        assert!(GridDimensions::new(3, 0).is_err());
    }

    #[test]
    fn default_dimensions_are_twenty_square() {
        let d = GridDimensions::default();
        assert_eq!((d.rows(), d.columns()), (20, 20));
    }

    #[test]
    fn set_leaves_original_untouched() {
        let grid = Grid::empty(dims(3, 4));
        let next = grid.set(1, 2, true).unwrap();
        assert!(!grid.is_alive(1, 2));
        assert!(next.is_alive(1, 2));
        assert_eq!(next.population(), 1);
    }

    #[test]
    fn out_of_bounds_edits_are_rejected() {
        let grid = Grid::empty(dims(3, 4));
        assert!(matches!(
            grid.set(3, 0, true),
            Err(LifeError::OutOfBounds { row: 3, col: 0, rows: 3, columns: 4 })
        ));
        assert!(grid.toggle(0, 4).is_err());
        assert!(Grid::with_alive(dims(2, 2), &[(2, 2)]).is_err());
    }

    #[test]
    fn random_threshold_is_validated() {
        assert!(matches!(
            Grid::random(dims(2, 2), 1.5),
            Err(LifeError::InvalidThreshold(_))
        ));
        assert!(Grid::random(dims(2, 2), -0.1).is_err());
    }

    #[test]
    fn random_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let all_dead = Grid::random_with(dims(6, 6), 1.0, &mut rng).unwrap();
        assert!(all_dead.is_empty());
        // A draw of exactly 0.0 stays dead.
        let dense = Grid::random_with(dims(6, 6), 0.0, &mut rng).unwrap();
        assert!(dense.population() >= 35);
    }

    #[test]
    fn random_density_is_near_thirty_percent() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random_with(dims(40, 40), DEFAULT_RANDOM_THRESHOLD, &mut rng).unwrap();
        let density = grid.population() as f64 / 1600.0;
        assert!((0.25..0.35).contains(&density), "density {density}");
    }

    #[test]
    fn clipped_constructor_drops_outside_cells() {
        let grid = Grid::with_alive_clipped(dims(2, 3), [(0, 0), (1, 2), (2, 0), (0, 3)]);
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn display_marks_live_cells() {
        let grid = Grid::with_alive(dims(2, 3), &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }

    #[test]
    fn alive_cells_are_row_major() {
        let grid = Grid::with_alive(dims(3, 3), &[(2, 0), (0, 2), (1, 1)]).unwrap();
        let cells: Vec<_> = grid.alive_cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 1), (2, 0)]);
    }

    proptest! {
        #[test]
        fn empty_grid_has_requested_shape(rows in 1usize..60, columns in 1usize..60) {
            let grid = Grid::empty(dims(rows, columns));
            prop_assert_eq!(grid.rows().len(), rows);
            prop_assert!(grid.rows().iter().all(|r| r.len() == columns && r.iter().all(|&c| !c)));
        }

        #[test]
        fn toggle_is_its_own_inverse(
            seed in any::<u64>(),
            rows in 1usize..20,
            columns in 1usize..20,
            r in 0usize..20,
            c in 0usize..20,
        ) {
            let (r, c) = (r % rows, c % columns);
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = Grid::random_with(dims(rows, columns), 0.5, &mut rng).unwrap();
            let back = grid.toggle(r, c).unwrap().toggle(r, c).unwrap();
            prop_assert_eq!(back, grid);
        }
    }
}
