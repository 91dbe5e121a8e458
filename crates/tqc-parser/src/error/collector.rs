//! Collector for accumulating diagnostics while building a scope.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so that every problem in a scope is reported at
/// once instead of stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Records the error of `result`, if any, and returns its value.
    pub fn check<T>(&mut self, result: Result<T, Diagnostic>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                self.emit(diagnostic);
                None
            }
        }
    }

    /// Finish collection and return a result.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }
}
