use thiserror::Error;

/// Rejected construction-time settings. A session never starts with one of
/// these outstanding.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: i32, rows: i32 },
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    #[error("item spawn chance {0} must be between 0.0 and 1.0")]
    InvalidSpawnChance(f64),
    #[error("canvas {width}x{height} is too small for a {columns}x{rows} grid")]
    CanvasTooSmall {
        width: u16,
        height: u16,
        columns: u16,
        rows: u16,
    },
    #[error("border width {border} leaves nothing of a {cell_width}x{cell_height} cell")]
    BorderTooWide {
        border: u16,
        cell_width: u16,
        cell_height: u16,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

#[derive(Debug, Error)]
pub enum GameError {
    /// Every cell is occupied or adjacent to something occupied.
    #[error("no safe cell left to spawn an item ({unsafe_cells} unsafe cells, {attempts} random draws)")]
    SpawnExhausted { unsafe_cells: usize, attempts: usize },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
