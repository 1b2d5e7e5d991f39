//! Typed errors for every recoverable failure in the core.

use thiserror::Error;

/// Malformed position text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected 4 or 6 space-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("board has {found} rows, need at least {min} and at most {max}")]
    RowCount { found: usize, min: u8, max: u8 },
    #[error("row {row} covers {found} squares, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} contains an empty run of length zero")]
    EmptyRun { row: usize },
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    SideToMove(String),
    #[error("invalid castling rights character '{0}'")]
    Castling(char),
    #[error("invalid en-passant target '{0}'")]
    EnPassant(String),
    #[error("invalid {field} '{value}'")]
    Counter { field: &'static str, value: String },
    #[error("board width {width} is outside {min}..={max}")]
    Dimensions { width: usize, min: u8, max: u8 },
}

/// A start position that cannot be built from the requested configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("board {width}x{height} is below the minimum size {min}")]
    TooSmall { width: u8, height: u8, min: u8 },
    #[error("board {width}x{height} exceeds the maximum size {max}")]
    TooLarge { width: u8, height: u8, max: u8 },
    #[error("shrinking to {width}x{height} without refilling would drop pieces")]
    WouldDropPieces { width: u8, height: u8 },
    #[error("no Chess960 back rank satisfies the constraints on {width} files")]
    Chess960Unsatisfiable { width: u8 },
    #[error("base position is malformed: {0}")]
    Format(#[from] FormatError),
}

/// Failure to start a game from a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
