//! ROM accessor error types

use thiserror::Error;

use super::layout::{MAX_HEIGHT, MAX_WIDTH};

/// Errors that can occur while accessing the puzzle table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    #[error("puzzle {puzzle}: record ends at {end:#x} but the ROM is {len:#x} bytes")]
    PuzzleOutOfRange {
        puzzle: usize,
        end: usize,
        len: usize,
    },

    #[error("puzzle {puzzle}: cell ({row}, {col}) is outside the {width}x{height} grid")]
    CellOutOfRange {
        puzzle: usize,
        row: usize,
        col: usize,
        width: u8,
        height: u8,
    },

    #[error("invalid width {0}: must be 1-{MAX_WIDTH}")]
    InvalidWidth(u8),

    #[error("invalid height {0}: must be 1-{MAX_HEIGHT}")]
    InvalidHeight(u8),
}

impl From<RomError> for String {
    fn from(err: RomError) -> Self {
        err.to_string()
    }
}
