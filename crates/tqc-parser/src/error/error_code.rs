//! Error codes for circuit document diagnostics.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Document errors (JSON syntax and shape)
//! - `E2xx` - Circuit structure errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    ///
    /// The document is not valid JSON.
    E100,

    /// Schema mismatch.
    ///
    /// The JSON is valid but a field is missing or has the wrong type.
    E101,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Malformed edge.
    ///
    /// Two consecutive edge vertices do not differ along exactly one axis.
    E200,

    /// Unknown axis.
    ///
    /// A rotation entry is not one of `x`, `y` or `z`, or a rotation does
    /// not have exactly three entries.
    E201,

    /// Unknown qubit type.
    ///
    /// A logical qubit `type` is neither `rough` nor `smooth`.
    E202,

    /// Malformed vertex.
    ///
    /// A coordinate is not an array of three finite numbers, or it leaves
    /// the finite range once scaled to world space.
    E203,

    /// Invalid visual.
    ///
    /// A `visual` color could not be parsed or an opacity is out of range.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed JSON",
            ErrorCode::E101 => "schema mismatch",
            ErrorCode::E200 => "malformed edge",
            ErrorCode::E201 => "unknown axis",
            ErrorCode::E202 => "unknown qubit type",
            ErrorCode::E203 => "malformed vertex",
            ErrorCode::E204 => "invalid visual",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
