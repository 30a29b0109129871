//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Invalid generator settings, detected before the grid is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("min and max room sizes have to be odd (got {min} and {max})")]
    EvenRoomSize { min: i32, max: i32 },

    #[error("room size range {min}..={max} is invalid: sizes must be positive and min <= max")]
    InvalidRoomSizeRange { min: i32, max: i32 },

    #[error("room size tolerance cannot be negative (got {0})")]
    NegativeTolerance(i32),

    #[error("max room size {max_room_size} does not fit in a {width}x{height} grid")]
    RoomTooLarge { max_room_size: i32, width: i32, height: i32 },

    #[error("noise radius has to be positive (got {0})")]
    InvalidNoiseRadius(i32),
}

/// Failure to read or write a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] ron::Error),

    #[error("failed to write config file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
