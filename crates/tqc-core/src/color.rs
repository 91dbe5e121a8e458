//! Color handling for circuit solids
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors arrive either as CSS strings from configuration
//! and circuit documents, or as packed `0xRRGGBB` integers from documents
//! written for hex-literal renderers.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use tqc_core::color::Color;
    ///
    /// let rough = Color::new("#ffffff").unwrap();
    /// let smooth = Color::new("dodgerblue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tqc_core::color::Color;
    ///
    /// let from_hex = Color::from_packed_rgb(0x1e90ff).unwrap();
    /// assert_eq!(from_hex, Color::new("#1e90ff").unwrap());
    /// ```
    pub fn from_packed_rgb(value: u32) -> Result<Self, String> {
        if value > 0xff_ffff {
            return Err(format!("invalid color `{value:#x}`: exceeds 0xffffff"));
        }
        Self::new(&format!("#{value:06x}"))
    }

    /// Creates a new color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("#ffffff").expect("'#ffffff' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
