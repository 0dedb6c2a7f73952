//! Error types for Sieve operations.
//!
//! This module provides the main error type [`SieveError`] which wraps
//! every error condition a compilation can hit.

use std::{io, path::PathBuf};

use thiserror::Error;

use sieve_parser::ParseError;

/// The main error type for Sieve operations.
///
/// Every variant is fatal to the compilation it occurred in.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the list source alongside its diagnostics so
/// that callers can render source snippets.
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("cannot read `{}`: {source}", path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },

    #[error("cannot write `{}`: {source}", path.display())]
    OutputUnwritable { path: PathBuf, source: io::Error },

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("invalid base configuration: {0}")]
    Base(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid policy document: {0}")]
    Document(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SieveError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
