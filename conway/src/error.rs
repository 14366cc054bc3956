// error.rs - Error type shared by the simulation core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell ({row}, {col}) is outside a {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    #[error("random threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("tick interval must be at least 1 ms")]
    InvalidInterval,

    #[error("unknown tool: {0} (expected `brush` or `pen`)")]
    UnknownTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
