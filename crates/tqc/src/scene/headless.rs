//! A render surface that keeps solids in memory.
//!
//! [`HeadlessSurface`] is used by the command-line tool and by tests. It
//! records every call the controller makes, picks solids with a ray test
//! against their bounding boxes, and tracks disposals so double removals
//! are caught.

use indexmap::IndexMap;
use log::{trace, warn};

use tqc_core::{
    color::Color,
    draw::{Geometry, Solid},
    geometry::{Axis, Pos},
};

use super::{Camera, Ray, RenderSurface, SolidHandle};

/// A solid as currently displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedSolid {
    solid: Solid,
    color: Color,
}

impl DisplayedSolid {
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// The current color, which differs from the material color while
    /// highlighted.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Half extents of the axis-aligned box enclosing the solid.
    fn half_extents(&self) -> [f32; 3] {
        match self.solid.geometry() {
            Geometry::Box { size } => size.to_array().map(|extent| extent / 2.0),
            Geometry::Pyramid { radius, height, .. } => [radius.max(*height / 2.0); 3],
        }
    }

    /// Distance along `ray` to the enclosing box, if hit.
    fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let center = self.solid.position();
        let half = self.half_extents();
        let origin = ray.origin();
        let direction = ray.direction();

        let mut near = f32::NEG_INFINITY;
        let mut far = f32::INFINITY;
        for axis in Axis::ALL {
            let i = axis.index();
            let min = center.get(axis) - half[i];
            let max = center.get(axis) + half[i];
            let start = origin.get(axis);

            if direction[i] == 0.0 {
                if start < min || start > max {
                    return None;
                }
                continue;
            }
            let (t0, t1) = {
                let a = (min - start) / direction[i];
                let b = (max - start) / direction[i];
                if a <= b { (a, b) } else { (b, a) }
            };
            near = near.max(t0);
            far = far.min(t1);
        }

        (near <= far && far >= 0.0).then_some(near.max(0.0))
    }
}

/// Description overlay calls, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionEvent {
    Show(String),
    Hide,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: u64,
    solids: IndexMap<SolidHandle, DisplayedSolid>,
    disposed: Vec<SolidHandle>,
    camera: Option<Camera>,
    description: Option<String>,
    description_log: Vec<DescriptionEvent>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed solids in insertion order.
    pub fn solids(&self) -> impl Iterator<Item = (SolidHandle, &DisplayedSolid)> {
        self.solids.iter().map(|(handle, solid)| (*handle, solid))
    }

    pub fn solid(&self, handle: SolidHandle) -> Option<&DisplayedSolid> {
        self.solids.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Handles removed so far, in removal order.
    pub fn disposed(&self) -> &[SolidHandle] {
        &self.disposed
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// The overlay text, if shown.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn description_log(&self) -> &[DescriptionEvent] {
        &self.description_log
    }
}

impl RenderSurface for HeadlessSurface {
    fn add(&mut self, solid: &Solid) -> SolidHandle {
        self.next_handle += 1;
        let handle = SolidHandle::new(self.next_handle);
        self.solids.insert(
            handle,
            DisplayedSolid {
                solid: solid.clone(),
                color: solid.material().color(),
            },
        );
        handle
    }

    fn remove(&mut self, handle: SolidHandle) {
        if self.solids.shift_remove(&handle).is_some() {
            self.disposed.push(handle);
        } else {
            warn!(handle:% = handle; "Removing a solid that is not displayed");
        }
    }

    fn set_color(&mut self, handle: SolidHandle, color: Color) {
        match self.solids.get_mut(&handle) {
            Some(displayed) => displayed.color = color,
            None => warn!(handle:% = handle; "Recoloring a solid that is not displayed"),
        }
    }

    fn intersect(&self, ray: &Ray, candidates: &[SolidHandle]) -> Option<SolidHandle> {
        let hit = candidates
            .iter()
            .filter_map(|handle| {
                let distance = self.solids.get(handle)?.hit_distance(ray)?;
                Some((*handle, distance))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(handle, _)| handle);
        trace!(hit:? = hit; "Intersected ray");
        hit
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.camera = Some(*camera);
    }

    fn show_description(&mut self, text: &str) {
        self.description = Some(text.to_string());
        self.description_log
            .push(DescriptionEvent::Show(text.to_string()));
    }

    fn hide_description(&mut self) {
        self.description = None;
        self.description_log.push(DescriptionEvent::Hide);
    }
}

/// A ray aimed straight down at a displayed solid.
pub fn aim_at(surface: &HeadlessSurface, handle: SolidHandle) -> Option<Ray> {
    surface
        .solid(handle)
        .map(|displayed| Ray::looking_down_at(displayed.solid().position()))
}
