//! Circuit documents.
//!
//! A document is a JSON object describing one root circuit. The circuit may
//! be wrapped in a `main` and/or `circuit` key, and nested module circuits
//! may be stored next to it as further top-level keys:
//!
//! ```json
//! {
//!   "main": { "logical_qubits": [], "modules": [{"id": "adder", "position": [0, 0, 0], "size": [2, 2, 2]}] },
//!   "adder": { "logical_qubits": [] }
//! }
//! ```

use std::rc::Rc;

use log::{debug, trace};
use serde_json::Value;
use tqc_core::identifier::Id;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    schema,
    span::Span,
};

/// A parsed circuit document.
#[derive(Debug, Clone)]
pub struct CircuitDocument {
    root: Rc<Value>,
}

impl CircuitDocument {
    /// Parses a document from JSON source text.
    ///
    /// # Errors
    ///
    /// Returns `E100` with the offending location for invalid JSON, and
    /// `E101` if the top level is not an object.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        debug!(bytes = source.len(); "Parsing circuit document");
        let value: Value = serde_json::from_str(source).map_err(|err| {
            let span = Span::at_line_column(source, err.line(), err.column());
            Diagnostic::error("malformed circuit document")
                .with_code(ErrorCode::E100)
                .with_label(span, err.to_string())
        })?;
        Self::from_value(value)
    }

    /// Wraps an already parsed JSON tree.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        if !value.is_object() {
            return Err(Diagnostic::error("circuit document must be a JSON object")
                .with_code(ErrorCode::E101)
                .with_help(format!("found {}", schema::kind_name(&value)))
                .into());
        }
        trace!(keys:? = value.as_object().map(|map| map.len()); "Parsed circuit document");
        Ok(Self {
            root: Rc::new(value),
        })
    }

    /// Returns the whole document tree.
    pub fn root(&self) -> &Rc<Value> {
        &self.root
    }

    /// Returns the data of the root scope, after wrapper unwrapping.
    pub fn scope(&self) -> &Value {
        scope_data(&self.root)
    }

    /// Looks up a nested module circuit stored as a top-level key.
    pub fn module(&self, module_id: Id) -> Option<&Value> {
        self.root.get(module_id.to_string())
    }
}

/// Unwraps the `main` and then the `circuit` wrapper of scope data.
///
/// Data without wrappers is returned unchanged.
pub fn scope_data(data: &Value) -> &Value {
    let data = data.get("main").unwrap_or(data);
    data.get("circuit").unwrap_or(data)
}

/// Returns the scope a `transformations.next` pointer names, if any.
pub fn next_transformation(scope: &Value) -> Option<Id> {
    match scope.get("transformations")?.get("next")? {
        Value::String(next) if !next.is_empty() => Some(Id::new(next)),
        Value::Number(next) => Some(Id::new(&next.to_string())),
        _ => None,
    }
}
