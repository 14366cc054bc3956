// sim.rs - Controller the presentation layer talks to

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::{LifeError, Result};
use crate::grid::{Grid, GridDimensions};
use crate::patterns::Pattern;
use crate::ticker::{self, Board, RunFlag, SharedBoard, TickHook};
use crate::tool::{Edit, Editor, Tool};

/// Read-only view handed to the renderer once per frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
    pub running: bool,
}

/// Owns the current grid, the running flag and the editor state.
///
/// The tick loop runs as a task on `runtime` and shares the board with
/// this controller; edits and ticks take the same lock, so they
/// interleave but never overlap.
pub struct Simulation {
    board: SharedBoard,
    run: RunFlag,
    runtime: Handle,
    interval: Duration,
    threshold: f64,
    editor: Editor,
    on_tick: Option<TickHook>,
}

impl Simulation {
    pub fn new(config: &SimConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Arc::new(Mutex::new(Board::new(Grid::empty(config.grid)))),
            run: RunFlag::new(),
            runtime,
            interval: config.tick_interval(),
            threshold: config.random_threshold,
            editor: Editor::new(config.tool),
            on_tick: None,
        })
    }

    /// Registers a callback invoked after every generation published by
    /// the tick loop.
    pub fn with_tick_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tick = Some(Arc::new(hook));
        self
    }

    // ---- running state ----

    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// Sets running and spawns the tick loop, whose first tick happens
    /// immediately. No-op when already running.
    pub fn start(&self) {
        let Some(token) = self.run.start() else {
            return;
        };
        info!(interval_ms = self.interval.as_millis() as u64, "simulation started");
        self.runtime.spawn(ticker::run_simulation(
            self.board.clone(),
            token,
            self.interval,
            self.on_tick.clone(),
        ));
    }

    /// Clears running; the loop exits at its next tick.
    pub fn stop(&self) {
        if self.run.stop() {
            info!(generation = self.generation(), "simulation stopped");
        }
    }

    pub fn toggle_running(&self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Advances one generation by hand. Ignored while running.
    pub fn step(&self) {
        if self.is_running() {
            return;
        }
        ticker::lock(&self.board).advance();
    }

    // ---- grid replacement ----

    pub fn dimensions(&self) -> GridDimensions {
        ticker::lock(&self.board).grid.dimensions()
    }

    pub fn generation(&self) -> u64 {
        ticker::lock(&self.board).generation
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn randomize(&self, dims: GridDimensions, threshold: f64) -> Result<()> {
        let grid = Grid::random(dims, threshold)?;
        info!(%dims, population = grid.population(), "grid randomized");
        self.replace(grid);
        Ok(())
    }

    pub fn clear(&self, dims: GridDimensions) {
        info!(%dims, "grid cleared");
        self.replace(Grid::empty(dims));
    }

    /// Swaps in an empty grid of the new size. A running simulation keeps
    /// running on it.
    pub fn resize(&self, dims: GridDimensions) {
        info!(%dims, running = self.is_running(), "grid resized");
        self.replace(Grid::empty(dims));
    }

    pub fn load_pattern(&self, pattern: &Pattern) {
        let dims = self.dimensions();
        info!(pattern = pattern.name, %dims, "pattern loaded");
        self.replace(pattern.stamp(dims));
    }

    fn replace(&self, grid: Grid) {
        ticker::lock(&self.board).reset(grid);
    }

    // ---- editing ----

    /// Applies a single edit: brush paints the cell alive, pen flips it.
    pub fn edit_cell(&self, row: usize, col: usize, tool: Tool) -> Result<()> {
        self.apply(row, col, Edit::from(tool))
    }

    fn apply(&self, row: usize, col: usize, edit: Edit) -> Result<()> {
        let mut board = ticker::lock(&self.board);
        board.grid = match edit {
            Edit::Paint => board.grid.set(row, col, true)?,
            Edit::Toggle => board.grid.toggle(row, col)?,
        };
        debug!(row, col, ?edit, "cell edited");
        Ok(())
    }

    pub fn tool(&self) -> Tool {
        self.editor.tool()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.editor.tool() {
            return;
        }
        debug!(%tool, "tool changed");
        self.editor.set_tool(tool);
    }

    pub fn is_drawing(&self) -> bool {
        self.editor.is_drawing()
    }

    /// Pointer click on a cell. Out-of-range clicks leave the editor state
    /// untouched.
    pub fn click_cell(&mut self, row: usize, col: usize) -> Result<()> {
        let dims = self.dimensions();
        if !dims.contains(row, col) {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: dims.rows(),
                columns: dims.columns(),
            });
        }
        match self.editor.click() {
            Some(edit) => self.apply(row, col, edit),
            None => Ok(()),
        }
    }

    /// Pointer over a cell; paints while a brush stroke is active.
    pub fn hover_cell(&self, row: usize, col: usize) -> Result<()> {
        match self.editor.hover() {
            Some(edit) => self.apply(row, col, edit),
            None => Ok(()),
        }
    }

    // ---- rendering ----

    pub fn snapshot(&self) -> Snapshot {
        let board = ticker::lock(&self.board);
        Snapshot {
            grid: board.grid.clone(),
            generation: board.generation,
            running: self.run.is_running(),
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.run.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(rt: &tokio::runtime::Runtime) -> Simulation {
        Simulation::new(&SimConfig::default(), rt.handle().clone()).unwrap()
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    #[test]
    fn starts_empty_with_configured_size() {
        let rt = runtime();
        let sim = sim(&rt);
        let snap = sim.snapshot();
        assert_eq!(snap.grid.dimensions(), GridDimensions::default());
        assert!(snap.grid.is_empty());
        assert_eq!(snap.generation, 0);
        assert!(!snap.running);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let rt = runtime();
        let config = SimConfig {
            random_threshold: 3.0,
            ..SimConfig::default()
        };
        assert!(Simulation::new(&config, rt.handle().clone()).is_err());
    }

    #[test]
    fn edit_cell_follows_tool() {
        let rt = runtime();
        let sim = sim(&rt);
        sim.edit_cell(1, 1, Tool::Brush).unwrap();
        sim.edit_cell(1, 1, Tool::Brush).unwrap();
        assert!(sim.snapshot().grid.is_alive(1, 1));
        sim.edit_cell(1, 1, Tool::Pen).unwrap();
        assert!(!sim.snapshot().grid.is_alive(1, 1));
    }

    #[test]
    fn out_of_bounds_edit_leaves_grid_alone() {
        let rt = runtime();
        let sim = sim(&rt);
        sim.edit_cell(0, 0, Tool::Pen).unwrap();
        let before = sim.snapshot().grid;
        assert!(matches!(
            sim.edit_cell(20, 0, Tool::Pen),
            Err(LifeError::OutOfBounds { row: 20, .. })
        ));
        assert_eq!(sim.snapshot().grid, before);
    }

    #[test]
    fn out_of_bounds_click_keeps_stroke_state() {
        let rt = runtime();
        let mut sim = sim(&rt);
        assert!(sim.click_cell(99, 99).is_err());
        assert!(!sim.is_drawing());
    }

    #[test]
    fn step_counts_generations_while_stopped() {
        let rt = runtime();
        let sim = sim(&rt);
        sim.load_pattern(crate::patterns::find("Blinker").unwrap());
        let start = sim.snapshot().grid;
        sim.step();
        sim.step();
        let snap = sim.snapshot();
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.grid, start);
    }
}
