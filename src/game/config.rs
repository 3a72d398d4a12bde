use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns in the grid
    pub cols: usize,
    /// Number of rows in the grid
    pub rows: usize,
    /// Length of the snake right after a reset
    pub initial_snake_length: usize,
    /// Points awarded for each food eaten
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 20,
            initial_snake_length: 3,
            food_reward: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Column of the snake's head after a reset
    pub fn start_head_col(&self) -> usize {
        self.cols / 2 + 1
    }

    /// Row the snake starts on
    pub fn start_row(&self) -> usize {
        self.rows / 2
    }

    /// Make sure the starting snake fits on the grid.
    pub fn validate(&self) -> Result<()> {
        if self.initial_snake_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        if self.rows == 0 {
            bail!("grid must have at least one row");
        }
        let head = self.start_head_col();
        if head >= self.cols {
            bail!(
                "grid of {} columns is too narrow for the starting snake",
                self.cols
            );
        }
        if self.initial_snake_length > head + 1 {
            bail!(
                "snake of length {} does not fit left of column {}",
                self.initial_snake_length,
                head
            );
        }
        if i32::try_from(self.cols).is_err() || i32::try_from(self.rows).is_err() {
            bail!("grid of {}x{} is too large", self.cols, self.rows);
        }
        Ok(())
    }
}
