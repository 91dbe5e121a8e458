//! The core diagnostic type for circuit documents.
//!
//! A [`Diagnostic`] represents a single error with optional
//! error code, labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message about a circuit document.
///
/// Structural problems found after JSON parsing carry the element path in
/// their message (for example `logical_qubits[2].blocks[0]`); syntax errors
/// carry a labeled span.
///
/// # Example
///
/// ```text
/// error[E200]: malformed edge at logical_qubits[0].blocks[1]
///    = help: edge endpoints (0, 0, 0) and (1, 1, 0) differ along 2 axes
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use tqc_parser::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("unknown qubit type `bumpy`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_help("use `rough` or `smooth`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
