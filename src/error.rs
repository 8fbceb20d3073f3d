//! Error types
//!
//! Level geometry problems are fatal for the level being loaded. Sampling
//! errors are recovered inside the tick by halting the actor. Ladder errors
//! reject a single player command.

use thiserror::Error;

/// Malformed or missing level geometry, raised while building a session.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level pack contains no levels")]
    EmptyPack,

    #[error("level index {index} out of range (pack has {len} levels)")]
    NoSuchLevel { index: usize, len: usize },

    #[error("board must be at least 2x2 grid units, got {cols}x{rows}")]
    BoardTooSmall { cols: u32, rows: u32 },

    #[error("{what} at column {col}, row {row} lies outside the {cols}x{rows} board")]
    OutOfBoard {
        what: &'static str,
        col: i32,
        row: i32,
        cols: u32,
        rows: u32,
    },

    #[error("teleports come in pairs: found {0}")]
    TeleportCount(usize),

    #[error("ladder attached to slot {index} but level has {len} slots")]
    LadderSlot { index: usize, len: usize },

    #[error("board bitmap is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BitmapSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A ground sample fell outside the walkability mask.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("sample point ({x:.1}, {y:.1}) is outside the {width}x{height} board")]
    OutOfBounds { x: f32, y: f32, width: u32, height: u32 },
}

/// A rejected ladder command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("no slot with index {index} (level has {len})")]
    NoSuchSlot { index: usize, len: usize },

    #[error("the ladder cannot move while the actor is on it")]
    Occupied,
}

/// Failure reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
