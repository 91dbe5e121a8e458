//! Lattice geometry primitives.
//!
//! This module provides the vector types used throughout the viewer for
//! lattice coordinates, extents and bounding boxes.
//!
//! # Overview
//!
//! - [`Axis`] - One of the three lattice axes
//! - [`Axes`] - A subset of axes an operation applies to
//! - [`Amount`] - A scalar or per-axis operand for vector arithmetic
//! - [`Pos`] - A 3D coordinate
//! - [`Size`] - Extent along x, y and z
//! - [`Bounds3`] - An axis-aligned bounding box over positions
//!
//! # Coordinate System
//!
//! Coordinates are right-handed with `z` as the stacking (time) axis of the
//! circuit:
//!
//! ```text
//!        +Z
//!         │
//!         │   +Y
//!         │  ╱
//!         │ ╱
//!         └──────► +X
//! ```
//!
//! Raw circuit data lives on an integer lattice; world coordinates are the
//! lattice coordinates multiplied by the lattice pitch.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Errors raised while constructing lattice geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Two edge endpoints do not differ along exactly one axis.
    #[error(
        "edge endpoints {a} and {b} must differ along exactly one axis, but differ along {differing}"
    )]
    InvalidEdge { a: Pos, b: Pos, differing: usize },

    /// A coordinate whose world-space image is not finite.
    #[error("coordinate {0} is outside the finite world range")]
    Overflow(Pos),

    /// An axis name outside of `x`, `y` and `z`.
    #[error("unknown axis `{0}`, expected one of `x`, `y` or `z`")]
    UnknownAxis(String),
}

/// One of the three lattice axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in array order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the array index of this axis (`x` = 0, `y` = 1, `z` = 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the lowercase name of this axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(GeometryError::UnknownAxis(other.to_string())),
        }
    }
}

/// A subset of axes that an arithmetic operation applies to.
///
/// # Examples
///
/// ```
/// # use tqc_core::geometry::{Axes, Axis};
/// let only_x: Axes = Axis::X.into();
/// assert!(only_x.contains(Axis::X));
/// assert!(!only_x.contains(Axis::Y));
/// assert!(Axes::ALL.contains(Axis::Z));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axes {
    mask: u8,
}

impl Axes {
    /// Every axis.
    pub const ALL: Axes = Axes { mask: 0b111 };

    /// No axis.
    pub const NONE: Axes = Axes { mask: 0 };

    /// Returns true if `axis` is part of this subset.
    pub fn contains(self, axis: Axis) -> bool {
        self.mask & (1 << axis.index()) != 0
    }

    /// Iterates over the axes of this subset in `x`, `y`, `z` order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |axis| self.contains(*axis))
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Axis> for Axes {
    fn from(axis: Axis) -> Self {
        Self {
            mask: 1 << axis.index(),
        }
    }
}

impl FromIterator<Axis> for Axes {
    fn from_iter<T: IntoIterator<Item = Axis>>(iter: T) -> Self {
        let mask = iter
            .into_iter()
            .fold(0u8, |mask, axis| mask | (1 << axis.index()));
        Self { mask }
    }
}

/// The right-hand operand of a vector operation.
///
/// A scalar applies the same value to every selected axis; a per-axis amount
/// supplies one value per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Scalar(f32),
    PerAxis([f32; 3]),
}

impl Amount {
    /// Returns the operand value for `axis`.
    pub fn get(self, axis: Axis) -> f32 {
        match self {
            Amount::Scalar(value) => value,
            Amount::PerAxis(values) => values[axis.index()],
        }
    }
}

impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        Amount::Scalar(value)
    }
}

impl From<[f32; 3]> for Amount {
    fn from(values: [f32; 3]) -> Self {
        Amount::PerAxis(values)
    }
}

impl From<Pos> for Amount {
    fn from(pos: Pos) -> Self {
        Amount::PerAxis(pos.to_array())
    }
}

impl From<Size> for Amount {
    fn from(size: Size) -> Self {
        Amount::PerAxis(size.to_array())
    }
}

macro_rules! lattice_vector {
    ($name:ident) => {
        impl $name {
            /// Creates a new vector from its three components.
            pub const fn new(x: f32, y: f32, z: f32) -> Self {
                Self { x, y, z }
            }

            /// Creates a new vector from an `[x, y, z]` array.
            pub const fn from_array(values: [f32; 3]) -> Self {
                Self::new(values[0], values[1], values[2])
            }

            /// Returns the x component.
            pub fn x(self) -> f32 {
                self.x
            }

            /// Returns the y component.
            pub fn y(self) -> f32 {
                self.y
            }

            /// Returns the z component.
            pub fn z(self) -> f32 {
                self.z
            }

            /// Returns the component along `axis`.
            pub fn get(self, axis: Axis) -> f32 {
                match axis {
                    Axis::X => self.x,
                    Axis::Y => self.y,
                    Axis::Z => self.z,
                }
            }

            /// Returns a copy with the component along `axis` replaced.
            pub fn with(mut self, axis: Axis, value: f32) -> Self {
                match axis {
                    Axis::X => self.x = value,
                    Axis::Y => self.y = value,
                    Axis::Z => self.z = value,
                }
                self
            }

            /// Returns the components in `[x, y, z]` order.
            pub fn to_array(self) -> [f32; 3] {
                [self.x, self.y, self.z]
            }

            /// Returns true if every component is finite.
            pub fn is_finite(self) -> bool {
                self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
            }

            /// Adds `amount` to the selected axes.
            pub fn add(self, amount: impl Into<Amount>, axes: impl Into<Axes>) -> Self {
                self.operate(amount.into(), axes.into(), |a, b| a + b)
            }

            /// Subtracts `amount` from the selected axes.
            pub fn sub(self, amount: impl Into<Amount>, axes: impl Into<Axes>) -> Self {
                self.operate(amount.into(), axes.into(), |a, b| a - b)
            }

            /// Multiplies the selected axes by `amount`.
            pub fn mul(self, amount: impl Into<Amount>, axes: impl Into<Axes>) -> Self {
                self.operate(amount.into(), axes.into(), |a, b| a * b)
            }

            /// Divides the selected axes by `amount`.
            pub fn div(self, amount: impl Into<Amount>, axes: impl Into<Axes>) -> Self {
                self.operate(amount.into(), axes.into(), |a, b| a / b)
            }

            /// Takes the remainder of the selected axes by `amount`.
            pub fn rem(self, amount: impl Into<Amount>, axes: impl Into<Axes>) -> Self {
                self.operate(amount.into(), axes.into(), |a, b| a % b)
            }

            fn operate(self, amount: Amount, axes: Axes, op: impl Fn(f32, f32) -> f32) -> Self {
                axes.iter().fold(self, |vector, axis| {
                    vector.with(axis, op(vector.get(axis), amount.get(axis)))
                })
            }
        }

        impl From<$name> for [f32; 3] {
            fn from(vector: $name) -> Self {
                vector.to_array()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {}, {})", self.x, self.y, self.z)
            }
        }
    };
}

/// A position in lattice or world space.
///
/// Positions are immutable from the caller's perspective: every operation
/// returns a new value.
///
/// # Examples
///
/// ```
/// # use tqc_core::geometry::{Axis, Axes, Pos};
/// let pos = Pos::new(1.0, 2.0, 3.0);
///
/// let moved = pos.add(2.0, Axis::X);
/// assert_eq!(moved.to_array(), [3.0, 2.0, 3.0]);
///
/// let scaled = pos.mul(2.0, Axes::ALL);
/// assert_eq!(scaled.to_array(), [2.0, 4.0, 6.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "[f32; 3]")]
pub struct Pos {
    x: f32,
    y: f32,
    z: f32,
}

lattice_vector!(Pos);

impl Pos {
    /// The origin.
    pub const ORIGIN: Pos = Pos::new(0.0, 0.0, 0.0);

    /// Canonical total order: compares `z`, then `y`, then `x`.
    ///
    /// `z` is the primary key because stacking order along the time axis
    /// dominates deterministic iteration and camera framing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::cmp::Ordering;
    /// # use tqc_core::geometry::Pos;
    /// let low = Pos::new(9.0, 9.0, 0.0);
    /// let high = Pos::new(0.0, 0.0, 1.0);
    /// assert_eq!(Pos::compare(&low, &high), Ordering::Less);
    /// assert_eq!(Pos::compare(&high, &high), Ordering::Equal);
    /// ```
    pub fn compare(a: &Pos, b: &Pos) -> Ordering {
        a.z.total_cmp(&b.z)
            .then_with(|| a.y.total_cmp(&b.y))
            .then_with(|| a.x.total_cmp(&b.x))
    }

    /// Returns true if `self` orders strictly before `other`.
    pub fn is_less_than(&self, other: &Pos) -> bool {
        Pos::compare(self, other) == Ordering::Less
    }

    /// Returns the smaller of two positions in canonical order.
    pub fn min(a: Pos, b: Pos) -> Pos {
        if a.is_less_than(&b) { a } else { b }
    }

    /// Returns the component-wise minimum of two positions.
    pub fn component_min(self, other: Pos) -> Pos {
        Pos::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Returns the component-wise maximum of two positions.
    pub fn component_max(self, other: Pos) -> Pos {
        Pos::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Returns the axes along which `self` and `other` differ.
    pub fn differing_axes(&self, other: &Pos) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|axis| self.get(*axis) != other.get(*axis))
            .collect()
    }

    /// Returns a hashable key identifying this position by value.
    ///
    /// Negative zero is folded into positive zero so that both compare equal.
    pub fn value_key(&self) -> [u32; 3] {
        self.to_array().map(|component| (component + 0.0).to_bits())
    }
}

/// Extent along the x, y and z axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "[f32; 3]")]
pub struct Size {
    x: f32,
    y: f32,
    z: f32,
}

lattice_vector!(Size);

impl Size {
    /// A unit cube.
    pub const UNIT: Size = Size::new(1.0, 1.0, 1.0);

    /// Returns the largest component.
    pub fn max_component(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }
}

/// An axis-aligned bounding box in world space.
///
/// # Examples
///
/// ```
/// # use tqc_core::geometry::{Bounds3, Pos};
/// let bounds = Bounds3::from_points([Pos::new(0.0, 0.0, 0.0), Pos::new(4.0, 2.0, 6.0)])
///     .expect("non-empty");
/// assert_eq!(bounds.center().to_array(), [2.0, 1.0, 3.0]);
/// assert_eq!(bounds.size().to_array(), [4.0, 2.0, 6.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds3 {
    min: Pos,
    max: Pos,
}

impl Bounds3 {
    /// Creates a bounding box containing a single point.
    pub fn from_point(point: Pos) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates the smallest bounding box containing all `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Pos>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |bounds, point| bounds.include(point)))
    }

    /// Returns the minimum corner.
    pub fn min(self) -> Pos {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(self) -> Pos {
        self.max
    }

    /// Returns a bounding box grown to contain `point`.
    pub fn include(self, point: Pos) -> Self {
        Self {
            min: self.min.component_min(point),
            max: self.max.component_max(point),
        }
    }

    /// Merges two bounding boxes into one containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.component_min(other.min),
            max: self.max.component_max(other.max),
        }
    }

    /// Returns the center point.
    pub fn center(self) -> Pos {
        self.max.add(self.min, Axes::ALL).div(2.0, Axes::ALL)
    }

    /// Returns the extent of the box.
    pub fn size(self) -> Size {
        let extent = self.max.sub(self.min, Axes::ALL);
        Size::from_array(extent.to_array())
    }

    /// Returns true if `point` lies inside or on the boundary.
    pub fn contains(self, point: Pos) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            point.get(axis) >= self.min.get(axis) && point.get(axis) <= self.max.get(axis)
        })
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn pos_strategy() -> impl Strategy<Value = Pos> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, -1000.0f32..1000.0)
            .prop_map(|(x, y, z)| Pos::new(x, y, z))
    }

    fn lattice_pos_strategy() -> impl Strategy<Value = Pos> {
        (-50i32..50, -50i32..50, -50i32..50)
            .prop_map(|(x, y, z)| Pos::new(x as f32, y as f32, z as f32))
    }

    /// Compare should be antisymmetric.
    fn check_compare_is_antisymmetric(a: Pos, b: Pos) -> Result<(), TestCaseError> {
        prop_assert_eq!(Pos::compare(&a, &b), Pos::compare(&b, &a).reverse());
        Ok(())
    }

    /// Adding then subtracting should return approximately the original.
    fn check_add_sub_inverse(a: Pos, b: Pos) -> Result<(), TestCaseError> {
        let result = a.add(b, Axes::ALL).sub(b, Axes::ALL);

        prop_assert!(approx_eq!(f32, result.x(), a.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, result.y(), a.y(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, result.z(), a.z(), epsilon = 0.001));
        Ok(())
    }

    /// Operations restricted to one axis must leave the others untouched.
    fn check_single_axis_isolation(a: Pos, amount: f32) -> Result<(), TestCaseError> {
        let result = a.mul(amount, Axis::Y);

        prop_assert_eq!(result.x(), a.x());
        prop_assert_eq!(result.z(), a.z());
        Ok(())
    }

    /// The bounds of a point set contain every point.
    fn check_bounds_contain_points(points: Vec<Pos>) -> Result<(), TestCaseError> {
        let bounds = Bounds3::from_points(points.iter().copied()).expect("non-empty");
        for point in points {
            prop_assert!(bounds.contains(point));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(a in lattice_pos_strategy(), b in lattice_pos_strategy()) {
            check_compare_is_antisymmetric(a, b)?;
        }

        #[test]
        fn add_sub_inverse(a in pos_strategy(), b in pos_strategy()) {
            check_add_sub_inverse(a, b)?;
        }

        #[test]
        fn single_axis_isolation(a in pos_strategy(), amount in -10.0f32..10.0) {
            check_single_axis_isolation(a, amount)?;
        }

        #[test]
        fn bounds_contain_points(points in prop::collection::vec(pos_strategy(), 1..20)) {
            check_bounds_contain_points(points)?;
        }
    }
}
