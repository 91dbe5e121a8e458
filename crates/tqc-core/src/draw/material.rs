//! Visual overrides, resolved materials and the render palette.

use serde::Serialize;

use crate::color::Color;

/// Sparse visual overrides attached to an element.
///
/// Only the properties that were explicitly set are stored; everything else
/// is filled in at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Visual {
    color: Option<Color>,
    transparent: Option<bool>,
    opacity: Option<f32>,
}

impl Visual {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the color override replaced.
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy with the transparency override replaced.
    pub fn with_transparent(mut self, transparent: Option<bool>) -> Self {
        self.transparent = transparent;
        self
    }

    /// Returns a copy with the opacity override replaced.
    pub fn with_opacity(mut self, opacity: Option<f32>) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn transparent(&self) -> Option<bool> {
        self.transparent
    }

    pub fn opacity(&self) -> Option<f32> {
        self.opacity
    }

    /// Returns true if no property is overridden.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.transparent.is_none() && self.opacity.is_none()
    }

    /// Layers `self` over `fallback`: properties set on `self` win.
    pub fn or(self, fallback: Visual) -> Visual {
        Visual {
            color: self.color.or(fallback.color),
            transparent: self.transparent.or(fallback.transparent),
            opacity: self.opacity.or(fallback.opacity),
        }
    }

    /// Resolves the remaining unset properties from the palette defaults.
    pub fn resolve(self, palette: &Palette) -> Material {
        Material {
            color: self.color.unwrap_or(palette.default_color),
            transparent: self.transparent.unwrap_or(palette.default_transparent),
            opacity: self.opacity.unwrap_or(palette.default_opacity),
        }
    }
}

/// Fully resolved surface appearance of a solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    color: Color,
    transparent: bool,
    opacity: f32,
}

impl Material {
    pub fn new(color: Color, transparent: bool, opacity: f32) -> Self {
        Self {
            color,
            transparent,
            opacity,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns a copy with a different color, keeping transparency and opacity.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Render-time defaults for every solid in a scene.
///
/// # Default Values
///
/// - fill `#ffffff`, opaque, opacity `0.3` once made transparent
/// - rough `#ffffff`, smooth `#1e90ff`, module `#ffefd5`
/// - hover selection `#ff7357`, outlines `#454545` and enabled
/// - scale `1.0`
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    default_color: Color,
    default_transparent: bool,
    default_opacity: f32,
    scale: f32,
    rough: Color,
    smooth: Color,
    module: Color,
    selected: Color,
    outline: Color,
    display_outlines: bool,
}

impl Palette {
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn default_transparent(&self) -> bool {
        self.default_transparent
    }

    pub fn default_opacity(&self) -> f32 {
        self.default_opacity
    }

    /// Factor applied to every solid position and dimension.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rough(&self) -> Color {
        self.rough
    }

    pub fn smooth(&self) -> Color {
        self.smooth
    }

    pub fn module(&self) -> Color {
        self.module
    }

    /// Highlight color for hovered qubits and modules.
    pub fn selected(&self) -> Color {
        self.selected
    }

    pub fn outline(&self) -> Color {
        self.outline
    }

    pub fn display_outlines(&self) -> bool {
        self.display_outlines
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_default_transparent(mut self, transparent: bool) -> Self {
        self.default_transparent = transparent;
        self
    }

    pub fn with_default_opacity(mut self, opacity: f32) -> Self {
        self.default_opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rough(mut self, color: Color) -> Self {
        self.rough = color;
        self
    }

    pub fn with_smooth(mut self, color: Color) -> Self {
        self.smooth = color;
        self
    }

    pub fn with_module(mut self, color: Color) -> Self {
        self.module = color;
        self
    }

    pub fn with_selected(mut self, color: Color) -> Self {
        self.selected = color;
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = color;
        self
    }

    pub fn with_display_outlines(mut self, display_outlines: bool) -> Self {
        self.display_outlines = display_outlines;
        self
    }
}

impl Default for Palette {
    fn default() -> Self {
        let color = |value: u32| {
            Color::from_packed_rgb(value).expect("built-in palette colors are valid")
        };
        Self {
            default_color: color(0xffffff),
            default_transparent: false,
            default_opacity: 0.3,
            scale: 1.0,
            rough: color(0xffffff),
            smooth: color(0x1e90ff),
            module: color(0xffefd5),
            selected: color(0xff7357),
            outline: color(0x454545),
            display_outlines: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_override_wins() {
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();

        let element = Visual::new().with_color(Some(red));
        let caller = Visual::new()
            .with_color(Some(blue))
            .with_transparent(Some(true));

        let material = element.or(caller).resolve(&Palette::default());
        assert_eq!(material.color(), red);
        assert!(material.transparent());
        assert_eq!(material.opacity(), 0.3);
    }

    #[test]
    fn test_palette_fills_unset_properties() {
        let palette = Palette::default().with_default_opacity(0.8);
        let material = Visual::new().resolve(&palette);

        assert_eq!(material.color(), palette.default_color());
        assert!(!material.transparent());
        assert_eq!(material.opacity(), 0.8);
    }

    #[test]
    fn test_is_empty() {
        assert!(Visual::new().is_empty());
        assert!(!Visual::new().with_opacity(Some(0.5)).is_empty());
    }
}
