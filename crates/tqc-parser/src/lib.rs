//! # TQC Parser
//!
//! Reader for topological quantum circuit documents. This crate turns JSON
//! source text into validated [`Circuit`] scopes.
//!
//! ## Usage
//!
//! ```
//! # use tqc_parser::{parse, BuildConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "logical_qubits": [
//!             {"id": "q0", "type": "rough", "blocks": [[[0, 0, 0], [3, 0, 0]]]}
//!         ]
//!     }"#;
//!
//!     let (_document, circuit) = parse(source, BuildConfig::default())?;
//!     assert_eq!(circuit.logical_qubits().len(), 1);
//!     Ok(())
//! }
//! ```

mod build;
mod document;
pub mod error;
mod schema;
mod span;

pub use build::{BuildConfig, CircuitCreator, Rotation, collect_pos};
pub use document::{CircuitDocument, next_transformation, scope_data};
pub use span::Span;

use tqc_core::{geometry::Pos, semantic::Circuit};

use error::ParseError;

/// Parse source text and build its root scope.
///
/// The root scope is built at the origin with the identity rotation.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic of the document's root
/// scope.
pub fn parse(source: &str, config: BuildConfig) -> Result<(CircuitDocument, Circuit), ParseError> {
    let document = CircuitDocument::parse(source)?;
    let circuit = CircuitCreator::new(config).create(document.scope(), Pos::ORIGIN, Rotation::IDENTITY)?;
    Ok((document, circuit))
}
