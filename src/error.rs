use std::path::PathBuf;

/// Validation failures reported by the game engine.
///
/// Every variant is an expected, user-correctable input problem. A rejected
/// operation leaves the game state untouched and does not count as a used
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The slot index is outside the sequence.
    #[error("index {index} is out of bounds (valid: 0-{max_index})")]
    OutOfBounds { index: i32, max_index: usize },

    /// The digit value is outside the configured range.
    #[error("value {value} is outside the digit range {min}-{max}")]
    InvalidValue { value: i32, min: u8, max: u8 },

    /// Delete was asked to remove a digit from an empty slot.
    #[error("no digit at index {index}")]
    EmptySlot { index: i32 },

    /// The search pattern is empty or contains out-of-range digits.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Insert, delete, search, and sequence reset require an active round.
    #[error("the round is over")]
    RoundOver,

    /// Advancing requires a won round below the highest level.
    #[error("no next level to advance to")]
    CannotAdvance,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
