//! Crate-wide error type.
//!
//! None of these conditions are retried internally: they indicate malformed
//! input data or a contract violation by the caller. A search that finds no
//! solution is not an error; it is an ordinary `None` result.

use std::{fmt, io};

#[derive(Debug)]
pub enum Error {
    /// A region token outside the letters A-Z.
    InvalidRegion { token: char },
    /// A legality or placement query outside the board bounds.
    OutOfBounds { row: usize, col: usize, size: usize },
    /// `place_queen` called on a coordinate that is not currently legal.
    IllegalPlacement { row: usize, col: usize },
    /// Malformed or incomplete level data.
    InvalidLevel { reason: String },
    /// I/O failure while reading level data or writing records.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion { token } => {
                write!(f, "region token {token:?} is not a letter A-Z")
            }
            Self::OutOfBounds { row, col, size } => {
                write!(f, "cell ({row}, {col}) is out of bounds for a {size}x{size} board")
            }
            Self::IllegalPlacement { row, col } => {
                write!(f, "cannot place a queen at ({row}, {col})")
            }
            Self::InvalidLevel { reason } => {
                write!(f, "invalid level: {reason}")
            }
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
