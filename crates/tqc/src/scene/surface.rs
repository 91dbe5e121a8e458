//! The seam between the scene controller and a 3-D engine.

use std::fmt;

use serde::Serialize;

use tqc_core::{color::Color, draw::Solid, geometry::Pos};

use super::Camera;

/// Identity of a solid added to a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SolidHandle(u64);

impl SolidHandle {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SolidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pick ray in world space.
///
/// Hosts unproject the screen pointer through their camera to produce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Pos,
    direction: [f32; 3],
}

impl Ray {
    pub fn new(origin: Pos, direction: [f32; 3]) -> Self {
        Self { origin, direction }
    }

    /// A ray from high above `target` looking straight down the z axis.
    pub fn looking_down_at(target: Pos) -> Self {
        Self::new(
            Pos::new(target.x(), target.y(), target.z() + 1000.0),
            [0.0, 0.0, -1.0],
        )
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn direction(&self) -> [f32; 3] {
        self.direction
    }
}

/// A display that owns renderable copies of solids.
///
/// Every handle returned by [`add`](RenderSurface::add) is passed to
/// [`remove`](RenderSurface::remove) at most once, and is never used again
/// afterwards.
pub trait RenderSurface {
    /// Adds a solid and returns its handle.
    fn add(&mut self, solid: &Solid) -> SolidHandle;

    /// Removes a solid and disposes its resources.
    fn remove(&mut self, handle: SolidHandle);

    /// Recolors a displayed solid.
    fn set_color(&mut self, handle: SolidHandle, color: Color);

    /// Returns the nearest solid among `candidates` hit by `ray`.
    fn intersect(&self, ray: &Ray, candidates: &[SolidHandle]) -> Option<SolidHandle>;

    /// Moves the camera.
    fn set_camera(&mut self, camera: &Camera);

    /// Shows the overlay text.
    fn show_description(&mut self, text: &str);

    /// Hides the overlay text.
    fn hide_description(&mut self);
}
