//! Logical qubits.

use std::{fmt, rc::Rc};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    color::Color,
    draw::{Palette, Solid, SolidOwner, Visual},
    identifier::Id,
    semantic::{Edge, Lattice, Vertex},
};

/// Boundary type of a logical qubit patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QubitKind {
    Rough,
    Smooth,
}

impl QubitKind {
    /// Parses the document name of a qubit kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rough" => Some(QubitKind::Rough),
            "smooth" => Some(QubitKind::Smooth),
            _ => None,
        }
    }

    /// Default fill color of this kind.
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            QubitKind::Rough => palette.rough(),
            QubitKind::Smooth => palette.smooth(),
        }
    }
}

impl fmt::Display for QubitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitKind::Rough => f.write_str("rough"),
            QubitKind::Smooth => f.write_str("smooth"),
        }
    }
}

/// A logical qubit: a set of edges and the vertices they join.
#[derive(Debug, Clone)]
pub struct LogicalQubit {
    kind: QubitKind,
    id: Id,
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    payload: Rc<Value>,
}

impl LogicalQubit {
    /// Creates a logical qubit from its edges.
    ///
    /// The vertex set is the union of every edge's endpoints, deduplicated by
    /// position and kept in first-seen order.
    pub fn new(kind: QubitKind, id: Id, edges: Vec<Edge>, payload: Rc<Value>) -> Self {
        let mut unique = IndexMap::new();
        for vertex in edges.iter().flat_map(|edge| edge.vertices()) {
            unique.entry(vertex.pos().value_key()).or_insert(*vertex);
        }
        let vertices = unique.into_values().collect();

        Self {
            kind,
            id,
            edges,
            vertices,
            payload,
        }
    }

    pub fn kind(&self) -> QubitKind {
        self.kind
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn payload(&self) -> &Rc<Value> {
        &self.payload
    }

    /// Returns the `description` field of the raw document entry, if any.
    pub fn description(&self) -> Option<&str> {
        self.payload.get("description").and_then(Value::as_str)
    }

    /// Builds the solids of every edge, then of every vertex.
    ///
    /// All solids are owned by this qubit's id.
    pub fn create_solids(&self, lattice: &Lattice, palette: &Palette) -> Vec<Solid> {
        let owner = SolidOwner::qubit(self.id);
        let defaults = Visual::new().with_color(Some(self.kind.color(palette)));

        let edge_solids = self
            .edges
            .iter()
            .flat_map(|edge| edge.create_solids(lattice, palette, defaults, &owner));
        let vertex_solids = self
            .vertices
            .iter()
            .flat_map(|vertex| vertex.primitive().create_solids(palette, defaults, &owner));

        edge_solids.chain(vertex_solids).collect()
    }
}
