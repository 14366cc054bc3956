// config.rs - Simulation settings loaded from TOML

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LifeError, Result};
use crate::grid::{DEFAULT_RANDOM_THRESHOLD, GridDimensions};
use crate::tool::Tool;

/// ```toml
/// tick_interval_ms = 100
/// random_threshold = 0.7
/// tool = "pen"
///
/// [grid]
/// rows = 30
/// columns = 30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub grid: GridDimensions,
    pub tick_interval_ms: u64,
    pub random_threshold: f64,
    pub tool: Tool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridDimensions::default(),
            tick_interval_ms: 100,
            random_threshold: DEFAULT_RANDOM_THRESHOLD,
            tool: Tool::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Grid dimensions are checked when parsed; this covers the rest.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.random_threshold) {
            return Err(LifeError::InvalidThreshold(self.random_threshold));
        }
        if self.tick_interval_ms == 0 {
            return Err(LifeError::InvalidInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.tool, Tool::Brush);
    }

    #[test]
    fn full_file() {
        let config = SimConfig::from_toml_str(
            r#"
            tick_interval_ms = 250
            random_threshold = 0.5
            tool = "pen"

            [grid]
            rows = 30
            columns = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.grid, GridDimensions::new(30, 12).unwrap());
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.random_threshold, 0.5);
        assert_eq!(config.tool, Tool::Pen);
    }

    #[test]
    fn grid_size_lives_in_its_own_table() {
        let config = SimConfig::from_toml_str(
            r#"
            tick_interval_ms = 100
            random_threshold = 0.7
            tool = "brush"

            [grid]
            rows = 20
            columns = 20
            "#,
        )
        .unwrap();
        assert_eq!(config, SimConfig::default());

        let flat = SimConfig::from_toml_str("rows = 30\ncolumns = 30\n").unwrap_err();
        assert!(matches!(flat, LifeError::Config(_)), "{flat}");
        config.validate().unwrap();
    }

    #[test]
    fn zero_sized_grid_is_a_parse_error() {
        let err = SimConfig::from_toml_str("[grid]\nrows = 0\ncolumns = 4\n").unwrap_err();
        assert!(matches!(err, LifeError::Config(_)), "{err}");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            SimConfig::from_toml_str("random_threshold = 2.0"),
            Err(LifeError::InvalidThreshold(_))
        ));
        assert!(matches!(
            SimConfig::from_toml_str("tick_interval_ms = 0"),
            Err(LifeError::InvalidInterval)
        ));
        assert!(matches!(
            SimConfig::from_toml_str("tool = \"eraser\""),
            Err(LifeError::Config(_))
        ));
        assert!(SimConfig::from_toml_str("speed = 3").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SimConfig::load("/nonexistent/conway.toml"),
            Err(LifeError::Io(_))
        ));
    }
}
