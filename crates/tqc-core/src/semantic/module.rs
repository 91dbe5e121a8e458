//! Modules: opaque sub-circuit regions.

use std::rc::Rc;

use serde_json::Value;

use crate::{
    draw::{Palette, Primitive, Rectangular, Solid, SolidOwner, Visual},
    geometry::{Axes, Pos, Size},
    identifier::Id,
    semantic::Lattice,
};

/// A box covering a lattice-space region, standing in for a nested circuit.
///
/// The box is grown so that it encloses the unit cubes of the vertices on
/// its boundary:
///
/// ```text
/// size' = size * pitch + 1
/// pos'  = pos * pitch + size' / 2 - 0.5
/// ```
#[derive(Debug, Clone)]
pub struct Module {
    id: Id,
    body: Rectangular,
    payload: Rc<Value>,
}

impl Module {
    /// Creates a module from its lattice-space corner and extent.
    pub fn new(
        id: Id,
        lattice_pos: Pos,
        lattice_size: Size,
        lattice: &Lattice,
        visual: Visual,
        payload: Rc<Value>,
    ) -> Self {
        let pitch = lattice.pitch();
        let size = lattice_size.mul(pitch, Axes::ALL).add(1.0, Axes::ALL);
        let pos = lattice_pos
            .mul(pitch, Axes::ALL)
            .add(size.div(2.0, Axes::ALL), Axes::ALL)
            .sub(0.5, Axes::ALL);

        Self {
            id,
            body: Rectangular::new(pos, size, visual),
            payload,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// World-space center.
    pub fn pos(&self) -> Pos {
        self.body.pos()
    }

    /// World-space extent.
    pub fn size(&self) -> Size {
        self.body.size()
    }

    pub fn payload(&self) -> &Rc<Value> {
        &self.payload
    }

    /// Returns the `description` field of the raw document entry, if any.
    pub fn description(&self) -> Option<&str> {
        self.payload.get("description").and_then(Value::as_str)
    }

    pub fn create_solids(&self, palette: &Palette) -> Vec<Solid> {
        let owner = SolidOwner::module(self.id, Rc::clone(&self.payload));
        let defaults = Visual::new().with_color(Some(palette.module()));
        Primitive::Box(self.body).create_solids(palette, defaults, &owner)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::color::Color;

    fn module(visual: Visual) -> Module {
        Module::new(
            Id::new("m"),
            Pos::new(0.0, 0.0, 0.0),
            Size::new(1.0, 1.0, 1.0),
            &Lattice::default(),
            visual,
            Rc::new(json!({"id": "m"})),
        )
    }

    #[test]
    fn test_lattice_transform_at_default_pitch() {
        let module = module(Visual::new());
        assert_eq!(module.size().to_array(), [3.5, 3.5, 3.5]);
        assert_eq!(module.pos().to_array(), [1.25, 1.25, 1.25]);
    }

    #[test]
    fn test_module_color() {
        let palette = Palette::default();
        let solids = module(Visual::new()).create_solids(&palette);
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].material().color(), palette.module());
        assert!(solids[0].owner().is_module());

        let green = Color::new("green").unwrap();
        let solids = module(Visual::new().with_color(Some(green))).create_solids(&palette);
        assert_eq!(solids[0].material().color(), green);
    }

    #[test]
    fn test_description() {
        let with = Module::new(
            Id::new("m"),
            Pos::ORIGIN,
            Size::UNIT,
            &Lattice::default(),
            Visual::new(),
            Rc::new(json!({"id": "m", "description": "T factory"})),
        );
        assert_eq!(with.description(), Some("T factory"));
        assert_eq!(module(Visual::new()).description(), None);
    }
}
