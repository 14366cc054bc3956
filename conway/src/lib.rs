//! Conway's Game of Life on a bounded, non-wrapping grid.
//!
//! [`Grid`] values are never mutated in place: edits and generation steps
//! return new grids. [`Simulation`] ties a grid to a tick loop running on a
//! tokio runtime and exposes the start/stop/edit operations a front end
//! needs.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod sim;
pub mod ticker;
pub mod tool;

pub use config::SimConfig;
pub use engine::{NEIGHBOR_OFFSETS, live_neighbors, next_generation, next_state};
pub use error::{LifeError, Result};
pub use grid::{DEFAULT_RANDOM_THRESHOLD, Grid, GridDimensions, TRow};
pub use patterns::{PATTERNS, Pattern};
pub use sim::{Simulation, Snapshot};
pub use ticker::{DEFAULT_TICK_INTERVAL, RunFlag, RunToken, run_simulation};
pub use tool::{Edit, Editor, Tool};
