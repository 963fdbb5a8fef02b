use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Write, path::Path};

use crate::{Rect, partition::DEFAULT_STOP_CHANCE, rooms::MIN_LEAF_EXTENT};

const DEFAULT_GRID_WIDTH: usize = 32;
const DEFAULT_GRID_HEIGHT: usize = 24;

/// Parameters for level generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid columns.
    pub grid_width: usize,
    /// Grid rows.
    pub grid_height: usize,
    /// Region partitioned into rooms; must lie inside the grid.
    pub level_rect: Rect,
    /// Chance that a non-root partition stops splitting early.
    pub stop_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            level_rect: Rect::new(1, 1, 30, 22),
            stop_chance: DEFAULT_STOP_CHANCE,
        }
    }
}

impl GenerationConfig {
    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(data).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&data)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create config {}", path.display()))?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    /// Bounds of the whole grid.
    pub fn grid_rect(&self) -> Rect {
        Rect::new(0, 0, self.grid_width as i32, self.grid_height as i32)
    }

    /// Checks the config against `level_rect`.
    pub fn validate(&self) -> Result<()> {
        self.validate_level_rect(&self.level_rect)
    }

    /// Checks that `level_rect` can be generated with this config.
    pub fn validate_level_rect(&self, level_rect: &Rect) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "Grid must not be empty, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "Grid {}x{} is too large",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            (0.0..=1.0).contains(&self.stop_chance),
            "Stop chance must lie in [0, 1], got {}",
            self.stop_chance
        );
        ensure!(
            level_rect.width >= MIN_LEAF_EXTENT && level_rect.height >= MIN_LEAF_EXTENT,
            "Level {}x{} is smaller than the minimum {MIN_LEAF_EXTENT}x{MIN_LEAF_EXTENT}",
            level_rect.width,
            level_rect.height
        );
        ensure!(
            level_rect.x.checked_add(level_rect.width).is_some()
                && level_rect.y.checked_add(level_rect.height).is_some(),
            "Level {level_rect:?} overflows the coordinate range"
        );
        ensure!(
            self.grid_rect().contains_rect(level_rect),
            "Level {level_rect:?} does not fit in the {}x{} grid",
            self.grid_width,
            self.grid_height
        );
        Ok(())
    }
}
