//! Box and pyramid primitives.
//!
//! Each primitive stores its placement in unscaled world units together with
//! its sparse [`Visual`] overrides. [`Primitive::create_solids`] is the single
//! point where palette scale and material resolution are applied.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

use crate::{
    draw::{Geometry, Palette, Solid, SolidOwner, Visual},
    geometry::{Axes, Axis, Pos, Size},
};

/// An axis-aligned box centred on `pos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangular {
    pos: Pos,
    size: Size,
    visual: Visual,
}

impl Rectangular {
    pub fn new(pos: Pos, size: Size, visual: Visual) -> Self {
        Self { pos, size, visual }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn visual(&self) -> Visual {
        self.visual
    }
}

/// A four-sided pyramid whose apex points along an axis.
///
/// The base is a square of side `bottom_len`; `reverse` flips the apex to the
/// negative direction. Two reversed-facing pyramids make up the tapering
/// ends of an injector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquarePyramid {
    pos: Pos,
    bottom_len: f32,
    height: f32,
    axis: Axis,
    reverse: bool,
    visual: Visual,
}

impl SquarePyramid {
    pub fn new(
        pos: Pos,
        bottom_len: f32,
        height: f32,
        axis: Axis,
        reverse: bool,
        visual: Visual,
    ) -> Self {
        Self {
            pos,
            bottom_len,
            height,
            axis,
            reverse,
            visual,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Euler rotation (XYZ order) turning a Y-up cone so that its apex lies
    /// along the pyramid axis, with a base edge parallel to the lattice.
    pub fn rotation(&self) -> [f32; 3] {
        let r = if self.reverse { PI } else { 0.0 };
        match self.axis {
            Axis::X => [FRAC_PI_4, 0.0, r - FRAC_PI_2],
            Axis::Y => [r, FRAC_PI_4, 0.0],
            Axis::Z => [FRAC_PI_2 - r, FRAC_PI_4, 0.0],
        }
    }
}

/// The closed set of renderable shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box(Rectangular),
    Pyramid(SquarePyramid),
}

impl Primitive {
    /// Builds the solids for this primitive.
    ///
    /// `defaults` are the caller's visual defaults; they apply to every
    /// property the primitive does not override itself.
    pub fn create_solids(&self, palette: &Palette, defaults: Visual, owner: &SolidOwner) -> Vec<Solid> {
        let scale = palette.scale();
        let (pos, visual, geometry) = match self {
            Primitive::Box(rect) => (
                rect.pos,
                rect.visual,
                Geometry::Box {
                    size: rect.size.mul(scale, Axes::ALL),
                },
            ),
            Primitive::Pyramid(pyramid) => (
                pyramid.pos,
                pyramid.visual,
                Geometry::Pyramid {
                    radius: pyramid.bottom_len * scale / SQRT_2,
                    height: pyramid.height * scale,
                    segments: 4,
                    rotation: pyramid.rotation(),
                },
            ),
        };

        let material = visual.or(defaults).resolve(palette);
        let outline = palette.display_outlines().then(|| palette.outline());
        let solid = Solid::new(owner.clone(), pos.mul(scale, Axes::ALL), geometry, material)
            .with_outline(outline);
        vec![solid]
    }
}

impl From<Rectangular> for Primitive {
    fn from(rect: Rectangular) -> Self {
        Primitive::Box(rect)
    }
}

impl From<SquarePyramid> for Primitive {
    fn from(pyramid: SquarePyramid) -> Self {
        Primitive::Pyramid(pyramid)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{color::Color, identifier::Id};

    fn owner() -> SolidOwner {
        SolidOwner::qubit(Id::new("q0"))
    }

    #[test]
    fn test_box_scales_position_and_size() {
        let palette = Palette::default().with_scale(2.0);
        let rect = Rectangular::new(Pos::new(1.0, 2.0, 3.0), Size::new(1.0, 2.0, 1.0), Visual::new());

        let solids = Primitive::from(rect).create_solids(&palette, Visual::new(), &owner());
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].position().to_array(), [2.0, 4.0, 6.0]);
        assert_eq!(
            solids[0].geometry(),
            &Geometry::Box {
                size: Size::new(2.0, 4.0, 2.0)
            }
        );
    }

    #[test]
    fn test_pyramid_dimensions() {
        let pyramid = SquarePyramid::new(Pos::ORIGIN, 1.0, 3.0, Axis::Z, false, Visual::new());
        let solids = Primitive::from(pyramid).create_solids(&Palette::default(), Visual::new(), &owner());

        let Geometry::Pyramid {
            radius,
            height,
            segments,
            ..
        } = *solids[0].geometry()
        else {
            panic!("expected pyramid geometry");
        };
        assert!(approx_eq!(f32, radius, 1.0 / SQRT_2, ulps = 2));
        assert_eq!(height, 3.0);
        assert_eq!(segments, 4);
    }

    #[test]
    fn test_pyramid_rotation_table() {
        let rotation = |axis, reverse| {
            SquarePyramid::new(Pos::ORIGIN, 1.0, 1.0, axis, reverse, Visual::new()).rotation()
        };

        assert_eq!(rotation(Axis::X, false), [FRAC_PI_4, 0.0, -FRAC_PI_2]);
        assert_eq!(rotation(Axis::X, true), [FRAC_PI_4, 0.0, PI - FRAC_PI_2]);
        assert_eq!(rotation(Axis::Y, false), [0.0, FRAC_PI_4, 0.0]);
        assert_eq!(rotation(Axis::Y, true), [PI, FRAC_PI_4, 0.0]);
        assert_eq!(rotation(Axis::Z, false), [FRAC_PI_2, FRAC_PI_4, 0.0]);
        assert_eq!(rotation(Axis::Z, true), [FRAC_PI_2 - PI, FRAC_PI_4, 0.0]);
    }

    #[test]
    fn test_precedence_of_visuals() {
        let element_color = Color::new("red").unwrap();
        let caller_color = Color::new("blue").unwrap();

        let overridden = Rectangular::new(
            Pos::ORIGIN,
            Size::UNIT,
            Visual::new().with_color(Some(element_color)),
        );
        let plain = Rectangular::new(Pos::ORIGIN, Size::UNIT, Visual::new());
        let defaults = Visual::new()
            .with_color(Some(caller_color))
            .with_transparent(Some(true));
        let palette = Palette::default();

        let solid = &Primitive::from(overridden).create_solids(&palette, defaults, &owner())[0];
        assert_eq!(solid.material().color(), element_color);
        assert!(solid.material().transparent());

        let solid = &Primitive::from(plain).create_solids(&palette, defaults, &owner())[0];
        assert_eq!(solid.material().color(), caller_color);

        let solid = &Primitive::from(plain).create_solids(&palette, Visual::new(), &owner())[0];
        assert_eq!(solid.material().color(), palette.default_color());
        assert!(!solid.material().transparent());
    }

    #[test]
    fn test_outline_follows_palette_flag() {
        let rect = Primitive::from(Rectangular::new(Pos::ORIGIN, Size::UNIT, Visual::new()));

        let palette = Palette::default();
        let solid = &rect.create_solids(&palette, Visual::new(), &owner())[0];
        assert_eq!(solid.outline(), Some(palette.outline()));

        let palette = Palette::default().with_display_outlines(false);
        let solid = &rect.create_solids(&palette, Visual::new(), &owner())[0];
        assert_eq!(solid.outline(), None);
    }
}
