//! TQC Core Types and Definitions
//!
//! This crate provides the foundational types for the topological quantum
//! circuit viewer. It includes:
//!
//! - **Geometry**: Lattice vectors, axes and bounding boxes ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Draw**: Solid primitives and renderable solid descriptors ([`draw`] module)
//! - **Semantic**: Defects, logical qubits, modules and circuits ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
