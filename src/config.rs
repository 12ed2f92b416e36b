use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::grid::{Grid, Position};

/// Construction-time settings. Every field has a default, so a YAML file only
/// needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks per second. Only drives the scheduler.
    pub frame_rate: u32,
    pub columns: u16,
    pub rows: u16,
    /// Items older than this many ticks are replaced.
    pub max_item_age: u32,
    /// Per-tick chance of an extra item while fewer than three are out.
    pub item_spawn_chance: f64,
    /// Board size in terminal characters, before truncation to whole cells.
    /// Unset means two characters per column and one per row.
    pub canvas_width: Option<u16>,
    pub canvas_height: Option<u16>,
    /// Characters left blank on the leading edge of every cell.
    pub border_width: u16,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 5,
            columns: 20,
            rows: 20,
            max_item_age: 25,
            item_spawn_chance: 0.3,
            canvas_width: None,
            canvas_height: None,
            border_width: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads a YAML config. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigurationError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigurationError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Checks the simulation settings. The canvas is the frontend's business
    /// and is checked by [`GameConfig::layout`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.grid()?;
        if self.frame_rate == 0 {
            return Err(ConfigurationError::ZeroFrameRate);
        }
        if !(0.0..=1.0).contains(&self.item_spawn_chance) {
            return Err(ConfigurationError::InvalidSpawnChance(self.item_spawn_chance));
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid, ConfigurationError> {
        Grid::new(i32::from(self.columns), i32::from(self.rows))
    }

    /// Wall-clock time between ticks, `ceil(1000 / frame_rate)` milliseconds.
    pub fn frame_interval(&self) -> Duration {
        let rate = u64::from(self.frame_rate.max(1));
        Duration::from_millis((1000 + rate - 1) / rate)
    }

    pub fn layout(&self) -> Result<Layout, ConfigurationError> {
        Layout::new(
            self.canvas_width.unwrap_or(self.columns.saturating_mul(2)),
            self.canvas_height.unwrap_or(self.rows),
            self.columns,
            self.rows,
            self.border_width,
        )
    }
}

/// Pixel-aligned placement of grid cells on a canvas measured in terminal
/// characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    canvas_width: u16,
    canvas_height: u16,
    cell_width: u16,
    cell_height: u16,
    border_width: u16,
}

impl Layout {
    /// Truncates each canvas dimension down to a multiple of its cell count.
    pub fn new(
        canvas_width: u16,
        canvas_height: u16,
        columns: u16,
        rows: u16,
        border_width: u16,
    ) -> Result<Self, ConfigurationError> {
        let too_small = ConfigurationError::CanvasTooSmall {
            width: canvas_width,
            height: canvas_height,
            columns,
            rows,
        };
        if columns == 0 || rows == 0 {
            return Err(too_small);
        }

        let cell_width = canvas_width / columns;
        let cell_height = canvas_height / rows;
        if cell_width == 0 || cell_height == 0 {
            return Err(too_small);
        }
        if border_width >= cell_width || border_width >= cell_height {
            return Err(ConfigurationError::BorderTooWide {
                border: border_width,
                cell_width,
                cell_height,
            });
        }

        Ok(Layout {
            canvas_width: cell_width * columns,
            canvas_height: cell_height * rows,
            cell_width,
            cell_height,
            border_width,
        })
    }

    pub fn canvas_size(&self) -> (u16, u16) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_width, self.cell_height)
    }

    /// Canvas rectangle painted for `pos`: top-left corner, width, height.
    pub fn cell_rect(&self, pos: Position) -> ((u16, u16), u16, u16) {
        let left = pos.x as u16 * self.cell_width + self.border_width;
        let top = pos.y as u16 * self.cell_height + self.border_width;
        (
            (left, top),
            self.cell_width - self.border_width,
            self.cell_height - self.border_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.layout().unwrap().canvas_size(), (40, 20));
        assert_eq!(config.frame_interval(), Duration::from_millis(200));
        assert_eq!(config.grid().unwrap().columns(), 20);
    }

    #[test]
    fn test_frame_interval_rounds_up() {
        let config = GameConfig { frame_rate: 3, ..GameConfig::default() };
        assert_eq!(config.frame_interval(), Duration::from_millis(334));
    }

    #[test]
    fn test_rejects_unplayable_settings() {
        let zero_rows = GameConfig { rows: 0, ..GameConfig::default() };
        assert!(matches!(zero_rows.validate(), Err(ConfigurationError::EmptyGrid { .. })));

        let zero_rate = GameConfig { frame_rate: 0, ..GameConfig::default() };
        assert!(matches!(zero_rate.validate(), Err(ConfigurationError::ZeroFrameRate)));

        let bad_chance = GameConfig { item_spawn_chance: 1.5, ..GameConfig::default() };
        assert!(matches!(
            bad_chance.validate(),
            Err(ConfigurationError::InvalidSpawnChance(_))
        ));

        let tiny_canvas = GameConfig { canvas_width: Some(10), ..GameConfig::default() };
        tiny_canvas.validate().unwrap();
        assert!(matches!(
            tiny_canvas.layout(),
            Err(ConfigurationError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn test_canvas_follows_grid_when_unset() {
        let config = GameConfig { columns: 50, rows: 30, ..GameConfig::default() };
        config.validate().unwrap();
        let layout = config.layout().unwrap();
        assert_eq!(layout.canvas_size(), (100, 30));
        assert_eq!(layout.cell_size(), (2, 1));
    }

    #[test]
    fn test_layout_truncates_canvas() {
        let layout = Layout::new(45, 23, 20, 10, 0).unwrap();
        assert_eq!(layout.canvas_size(), (40, 20));
        assert_eq!(layout.cell_size(), (2, 2));
    }

    #[test]
    fn test_cell_rect_insets_border() {
        let layout = Layout::new(60, 30, 20, 10, 1).unwrap();
        assert_eq!(layout.cell_rect(Position::new(2, 1)), ((7, 4), 2, 2));
        assert!(Layout::new(40, 20, 20, 20, 1).is_err());
    }

    #[test]
    fn test_yaml_overrides_some_fields() {
        let config = GameConfig::from_yaml("columns: 30\nmax_item_age: 10\nseed: 9\n").unwrap();
        assert_eq!(config.columns, 30);
        assert_eq!(config.max_item_age, 10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rows, 20);
        assert_eq!(config.frame_rate, 5);

        assert!(GameConfig::from_yaml("columns: lots").is_err());
        assert_eq!(GameConfig::from_yaml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let config = GameConfig::load(Path::new("/definitely/not/here/snake.yaml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
