//! Circuit model types.
//!
//! This module contains the semantic representation of a topological quantum
//! circuit after its document has been read and validated. The types here
//! know how to turn themselves into [`Solid`](crate::draw::Solid)s.
//!
//! # Pipeline Position
//!
//! ```text
//! Circuit JSON
//!     ↓ schema (tqc-parser)
//! Raw document types
//!     ↓ CircuitCreator (tqc-parser)
//! Semantic Model (these types) - validated edges, deduplicated vertices
//!     ↓ create_solids
//! Tagged solids
//!     ↓ scene controller (tqc)
//! Render surface
//! ```
//!
//! # Organization
//!
//! - [`lattice`] - Lattice spacing: [`Lattice`]
//! - [`defect`] - Unit defects: [`Vertex`], [`Edge`], [`EdgeKind`]
//! - [`logical_qubit`] - [`LogicalQubit`] and [`QubitKind`]
//! - [`module`] - Opaque sub-circuit regions: [`Module`]
//! - [`circuit`] - One scope of qubits and modules: [`Circuit`], [`CircuitSolids`]

pub mod circuit;
pub mod defect;
pub mod lattice;
pub mod logical_qubit;
pub mod module;

pub use circuit::*;
pub use defect::*;
pub use lattice::*;
pub use logical_qubit::*;
pub use module::*;

pub use crate::geometry::GeometryError;
