use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pixel::Color;

const APP_DIR_NAME: &str = "pixel-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 25;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 25;

/// Cornflower blue board.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::rgb(0x64, 0x95, 0xed);

pub const DEFAULT_APPLE_COLOR: Color = Color::rgb(0xff, 0xff, 0x00);

pub const DEFAULT_SNAKE_COLOR: Color = Color::rgb(0x00, 0xff, 0x00);

/// Segments in a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Where the HTTP sink posts frames unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Everything fixed for the lifetime of one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub size: GridSize,
    pub background: Color,
    pub apple: Color,
    pub snake: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            background: DEFAULT_BACKGROUND_COLOR,
            apple: DEFAULT_APPLE_COLOR,
            snake: DEFAULT_SNAKE_COLOR,
        }
    }
}

impl GameConfig {
    /// Checks that the board can hold the initial snake plus one apple.
    ///
    /// The initial snake lies horizontally with its head on the centre
    /// column, so the left half of the board must fit its body.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        let fits_snake = usize::from(width / 2) + 1 >= INITIAL_SNAKE_LENGTH;
        if !fits_snake || self.size.total_cells() <= INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        Ok(())
    }

    /// Overlays the values present in `file` on top of `self`.
    #[must_use]
    pub fn with_file(self, file: &ConfigFile) -> Self {
        Self {
            size: GridSize {
                width: file.width.unwrap_or(self.size.width),
                height: file.height.unwrap_or(self.size.height),
            },
            background: file.background.unwrap_or(self.background),
            apple: file.apple.unwrap_or(self.apple),
            snake: file.snake.unwrap_or(self.snake),
        }
    }
}

/// Optional on-disk overrides, all fields optional.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub background: Option<Color>,
    pub apple: Option<Color>,
    pub snake: Option<Color>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must not be empty (got {width}x{height})")]
    EmptyGrid { width: u16, height: u16 },

    #[error("grid {width}x{height} is too small for the initial snake and an apple")]
    GridTooSmall { width: u16, height: u16 },

    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("pixel-snake.log");
    base
}

/// Loads config overrides from disk.
///
/// Returns an empty `ConfigFile` when the file does not exist. Returns `Err`
/// when it exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
