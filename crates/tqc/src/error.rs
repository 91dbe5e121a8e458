//! Error types for viewer operations.
//!
//! This module provides the main error type [`TqcError`] which wraps the
//! error conditions that can occur while loading circuits and driving the
//! scene.

use std::io;

use thiserror::Error;

use tqc_core::identifier::Id;
use tqc_parser::error::ParseError;

/// The main error type for viewer operations.
///
/// # Diagnostic Variants
///
/// `Parse` carries the document source alongside the diagnostics so they can
/// be rendered with source snippets. `Build` is raised for scopes that come
/// from an already parsed tree, where no source text is available.
#[derive(Debug, Error)]
pub enum TqcError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Failed to build scope `{scope_id}`: {err}")]
    Build { scope_id: Id, err: ParseError },

    #[error("Module not found: {0}")]
    ModuleNotFound(Id),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl TqcError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
