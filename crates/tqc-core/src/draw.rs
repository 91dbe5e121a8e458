//! Renderable solid descriptors.
//!
//! Circuit elements are turned into [`Solid`] values here. A solid is a fully
//! resolved description (placement, geometry, material, owning element) that
//! a render surface can display without consulting any other state.
//!
//! # Architecture
//!
//! - [`Visual`]: sparse per-element overrides (color, transparency, opacity)
//! - [`Palette`]: render-time defaults used when neither the element nor the
//!   caller supplies a value
//! - [`Primitive`]: the closed set of shapes, [`Rectangular`] boxes and
//!   [`SquarePyramid`] four-sided pyramids
//! - [`Solid`]: the output, tagged with its [`SolidOwner`]
//!
//! # Resolution Order
//!
//! Every visual property resolves in three steps:
//! 1. The element's own override.
//! 2. The caller-supplied defaults (qubit color, cap transparency).
//! 3. The palette defaults.

mod material;
mod primitive;
mod solid;

pub use material::{Material, Palette, Visual};
pub use primitive::{Primitive, Rectangular, SquarePyramid};
pub use solid::{Geometry, Solid, SolidOwner};
