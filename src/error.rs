//! Error type for path text parsing and path validation.
//!
//! Drawing never fails; these errors only come out of the strict parser
//! ([`crate::parse::try_parse_path`]) and [`crate::path::Path::validate`].

use thiserror::Error;

/// Errors found while reading path text or checking a path's structure.
///
/// Offsets are byte offsets into the path text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unknown path command '{command}' at offset {offset}")]
    UnknownCommand { command: char, offset: usize },

    #[error("expected a number at offset {offset}")]
    MissingNumber { offset: usize },

    #[error("number at offset {offset} does not fit into 16 bits")]
    NumberOutOfRange { offset: usize },

    #[error("expected an arc flag (0 or 1) at offset {offset}")]
    InvalidFlag { offset: usize },

    #[error("segment {index} draws before the first move")]
    MissingMove { index: usize },
}

/// Result alias used by the fallible path operations.
pub type Result<T> = std::result::Result<T, PathError>;
