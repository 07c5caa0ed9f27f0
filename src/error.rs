//! Error types for the tic-tac-toe engine

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("position ({row}, {col}) is out of range (row and column must be 0-2)")]
    OutOfRange { row: usize, col: usize },

    #[error("invalid coordinate '{input}' (expected a column a-c followed by a row 1-3, e.g. 'A1')")]
    InvalidCoordinate { input: String },

    #[error("invalid board string: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid symbol '{input}' (expected 'X' or 'O')")]
    InvalidSymbol { input: String },

    #[error("invalid render format '{input}'. Expected one of: {expected}")]
    ParseRenderFormat { input: String, expected: String },

    #[error("game already over")]
    GameOver,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{tool} failed: {message}")]
    RendererFailed { tool: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
