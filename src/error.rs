//! Error types.

use thiserror::Error;

/// Errors returned when building a tree or running a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Point data, a query or a parameter is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The arena addresses nodes with `u32` indices.
    #[error("too many points for a single tree: {0}")]
    TooManyPoints(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn dimension_mismatch(what: &str, expected: usize, found: usize) -> Self {
        Error::InvalidInput(format!("{what} has {found} coordinates, expected {expected}"))
    }

    pub(crate) fn non_finite(what: &str) -> Self {
        Error::InvalidInput(format!("{what} has a non-finite coordinate"))
    }
}
