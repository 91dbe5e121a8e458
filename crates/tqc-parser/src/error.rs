//! Error and diagnostic system for circuit documents.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the document source
//! - Diagnostic collector for accumulating every problem in a scope
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error with optional error code, source locations and
//! help text. Multiple diagnostics are wrapped in [`ParseError`] for returning
//! from document parsing and scope building.
//!
//! # Example
//!
//! ```
//! # use tqc_parser::error::{Diagnostic, ErrorCode};
//! # use tqc_parser::Span;
//!
//! let diag = Diagnostic::error("edge endpoints must differ along exactly one axis")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(40..58), "second endpoint")
//!     .with_help("split diagonal runs into axis-aligned steps");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
