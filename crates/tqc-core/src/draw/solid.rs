//! The output of solid construction.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::{
    color::Color,
    draw::Material,
    geometry::{Axes, Pos, Size},
    identifier::Id,
};

/// The circuit element a solid belongs to.
///
/// A solid is owned by exactly one logical qubit or one module. Hit-testing
/// dispatches on this tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SolidOwner {
    Qubit {
        id: Id,
    },
    Module {
        id: Id,
        /// The module's raw document entry, used for descriptions and drill-down.
        #[serde(skip)]
        payload: Rc<Value>,
    },
}

impl SolidOwner {
    /// Creates an owner tag for a logical qubit.
    pub fn qubit(id: Id) -> Self {
        SolidOwner::Qubit { id }
    }

    /// Creates an owner tag for a module carrying its raw payload.
    pub fn module(id: Id, payload: Rc<Value>) -> Self {
        SolidOwner::Module { id, payload }
    }

    /// Returns the owning element's id.
    pub fn id(&self) -> Id {
        match self {
            SolidOwner::Qubit { id } | SolidOwner::Module { id, .. } => *id,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, SolidOwner::Module { .. })
    }

    /// Returns the module payload, or `None` for qubit solids.
    pub fn payload(&self) -> Option<&Rc<Value>> {
        match self {
            SolidOwner::Qubit { .. } => None,
            SolidOwner::Module { payload, .. } => Some(payload),
        }
    }
}

/// Shape and dimensions of a solid, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// An axis-aligned box.
    Box { size: Size },
    /// A cone with `segments` sides, Y-up before `rotation` is applied.
    Pyramid {
        radius: f32,
        height: f32,
        segments: u32,
        /// Euler angles in XYZ order.
        rotation: [f32; 3],
    },
}

/// A positioned, colored, owner-tagged solid ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solid {
    owner: SolidOwner,
    position: Pos,
    geometry: Geometry,
    material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    outline: Option<Color>,
}

impl Solid {
    pub fn new(owner: SolidOwner, position: Pos, geometry: Geometry, material: Material) -> Self {
        Self {
            owner,
            position,
            geometry,
            material,
            outline: None,
        }
    }

    /// Returns a copy drawn with edge outlines in `color`.
    pub fn with_outline(mut self, color: Option<Color>) -> Self {
        self.outline = color;
        self
    }

    /// Returns a copy moved by `-offset` on every axis.
    pub fn translated_back(mut self, offset: Pos) -> Self {
        self.position = self.position.sub(offset, Axes::ALL);
        self
    }

    pub fn owner(&self) -> &SolidOwner {
        &self.owner
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn outline(&self) -> Option<Color> {
        self.outline
    }
}
