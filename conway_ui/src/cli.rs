// cli.rs - Command line flags layered over the config file

use std::path::PathBuf;

use clap::Parser;
use conway::{GridDimensions, SimConfig, Tool};

/// Interactive Game of Life editor
#[derive(Parser, Debug)]
#[command(name = "conway_ui", version)]
pub struct Args {
    /// TOML settings file; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    pub columns: Option<usize>,

    /// Milliseconds between generations while running
    #[arg(long = "tick-ms")]
    pub tick_ms: Option<u64>,

    /// A random cell is alive when a uniform draw exceeds this value
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Initial editing tool: brush or pen
    #[arg(long)]
    pub tool: Option<Tool>,

    /// tracing filter, e.g. `conway=debug`; wins over RUST_LOG
    #[arg(long)]
    pub log: Option<String>,
}

pub const DEFAULT_LOG_FILTER: &str = "conway=info,conway_ui=info";

impl Args {
    /// Filter directives: `--log`, then the environment, then the default.
    pub fn log_filter(&self, env: Option<String>) -> String {
        self.log
            .clone()
            .or(env)
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    pub fn to_config(&self) -> conway::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if self.rows.is_some() || self.columns.is_some() {
            config.grid = GridDimensions::new(
                self.rows.unwrap_or(config.grid.rows()),
                self.columns.unwrap_or(config.grid.columns()),
            )?;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(threshold) = self.threshold {
            config.random_threshold = threshold;
        }
        if let Some(tool) = self.tool {
            config.tool = tool;
        }
        config.validate()?;
        Ok(config)
    }
}
