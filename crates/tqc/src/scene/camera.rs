use serde::Serialize;

use tqc_core::geometry::{Bounds3, Pos};

/// Camera placement: where the eye is and what it orbits around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    position: Pos,
    target: Pos,
}

impl Camera {
    pub fn new(position: Pos, target: Pos) -> Self {
        Self { position, target }
    }

    /// Frames a set of solid positions.
    ///
    /// The bounding box always includes the origin. With center `c`,
    /// `m = max(size.y, size.z)` and factor `k`, the eye is placed at
    /// `(c.x, (c.y - m) * k * 2, (c.z + m) * k)`, looking at `c`.
    pub fn frame(positions: impl IntoIterator<Item = Pos>, factor: f32) -> Self {
        let bounds = positions
            .into_iter()
            .fold(Bounds3::from_point(Pos::ORIGIN), Bounds3::include);
        let center = bounds.center();
        let size = bounds.size();
        let reach = size.y().max(size.z());

        let position = Pos::new(
            center.x(),
            (center.y() - reach) * factor * 2.0,
            (center.z() + reach) * factor,
        );
        Self::new(position, center)
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn target(&self) -> Pos {
        self.target
    }
}
