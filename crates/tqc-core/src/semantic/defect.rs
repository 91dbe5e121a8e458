//! Vertices and edges of a logical qubit.
//!
//! A logical qubit is drawn as a set of unit-cube [`Vertex`] defects joined by
//! axis-aligned [`Edge`] runs. Edges occupy the gap between their two
//! endpoint cubes, never the cubes themselves.
//!
//! # Edge Kinds
//!
//! - [`EdgeKind::Block`]: a plain box spanning the gap
//! - [`EdgeKind::Injector`]: two pyramids tapering toward the edge center,
//!   plus two unit stubs at the endpoints when the lattice margin allows
//! - [`EdgeKind::Cap`]: injector geometry drawn transparent by default

use std::cmp::Ordering;

use crate::{
    draw::{Palette, Primitive, Rectangular, Solid, SolidOwner, SquarePyramid, Visual},
    geometry::{Axis, GeometryError, Pos, Size},
    semantic::Lattice,
};

/// A unit cube at a lattice point, stored in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pos: Pos,
    visual: Visual,
}

impl Vertex {
    /// Creates a vertex at an already scaled world position.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            visual: Visual::new(),
        }
    }

    /// Creates a vertex from a raw lattice coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Overflow`] if the scaled position is not
    /// finite.
    pub fn from_lattice(pos: Pos, lattice: &Lattice) -> Result<Self, GeometryError> {
        let world = lattice.to_world(pos);
        if !world.is_finite() {
            return Err(GeometryError::Overflow(pos));
        }
        Ok(Self::new(world))
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Canonical vertex order, by position.
    pub fn compare(a: &Vertex, b: &Vertex) -> Ordering {
        Pos::compare(&a.pos, &b.pos)
    }

    pub fn primitive(&self) -> Primitive {
        Rectangular::new(self.pos, Size::UNIT, self.visual).into()
    }
}

impl From<Pos> for Vertex {
    fn from(pos: Pos) -> Self {
        Vertex::new(pos)
    }
}

/// Semantic kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Block,
    Injector,
    Cap,
}

impl EdgeKind {
    /// Visual defaults this kind layers under the caller's.
    fn defaults(self) -> Visual {
        match self {
            EdgeKind::Cap => Visual::new().with_transparent(Some(true)),
            EdgeKind::Block | EdgeKind::Injector => Visual::new(),
        }
    }
}

/// An axis-aligned run between two vertices.
///
/// # Examples
///
/// ```
/// # use tqc_core::geometry::{Axis, Pos};
/// # use tqc_core::draw::Visual;
/// # use tqc_core::semantic::{Edge, EdgeKind, Vertex};
/// let a = Vertex::new(Pos::new(3.0, 0.0, 0.0));
/// let b = Vertex::new(Pos::new(0.0, 0.0, 0.0));
///
/// let edge = Edge::new(EdgeKind::Block, a, b, Visual::new()).unwrap();
/// assert_eq!(edge.axis(), Axis::X);
/// assert_eq!(edge.pos().to_array(), [1.5, 0.0, 0.0]);
/// assert_eq!(edge.size().to_array(), [2.0, 1.0, 1.0]);
/// assert_eq!(edge.vertices()[0], b);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    kind: EdgeKind,
    vertices: [Vertex; 2],
    axis: Axis,
    pos: Pos,
    size: Size,
    visual: Visual,
}

impl Edge {
    /// Creates an edge between two vertices.
    ///
    /// The vertices may be given in either order; they are stored in
    /// canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEdge`] unless the endpoints differ
    /// along exactly one axis, and [`GeometryError::Overflow`] if an endpoint,
    /// the midpoint or the extent is not finite.
    pub fn new(kind: EdgeKind, a: Vertex, b: Vertex, visual: Visual) -> Result<Self, GeometryError> {
        if let Some(vertex) = [a, b].iter().find(|vertex| !vertex.pos.is_finite()) {
            return Err(GeometryError::Overflow(vertex.pos));
        }

        let differing = a.pos.differing_axes(&b.pos);
        let [axis] = differing[..] else {
            return Err(GeometryError::InvalidEdge {
                a: a.pos,
                b: b.pos,
                differing: differing.len(),
            });
        };

        let (a, b) = match Vertex::compare(&a, &b) {
            Ordering::Greater => (b, a),
            Ordering::Less | Ordering::Equal => (a, b),
        };

        let pos = a.pos.add(b.pos, axis).div(2.0, axis);
        let size = Size::UNIT.with(axis, b.pos.get(axis) - a.pos.get(axis) - 1.0);
        if !(pos.is_finite() && size.is_finite()) {
            let far = if a.pos.get(axis).abs() > b.pos.get(axis).abs() { a } else { b };
            return Err(GeometryError::Overflow(far.pos));
        }

        Ok(Self {
            kind,
            vertices: [a, b],
            axis,
            pos,
            size,
            visual,
        })
    }

    /// Creates an edge between two raw lattice coordinates.
    pub fn between(
        kind: EdgeKind,
        a: Pos,
        b: Pos,
        lattice: &Lattice,
        visual: Visual,
    ) -> Result<Self, GeometryError> {
        Self::new(
            kind,
            Vertex::from_lattice(a, lattice)?,
            Vertex::from_lattice(b, lattice)?,
            visual,
        )
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Endpoints in canonical order.
    pub fn vertices(&self) -> &[Vertex; 2] {
        &self.vertices
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Midpoint between the endpoints.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Extent of the gap between the endpoint cubes.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn visual(&self) -> Visual {
        self.visual
    }

    /// Decomposes the edge into renderable primitives.
    pub fn primitives(&self, lattice: &Lattice) -> Vec<Primitive> {
        match self.kind {
            EdgeKind::Block => vec![Rectangular::new(self.pos, self.size, self.visual).into()],
            EdgeKind::Injector | EdgeKind::Cap => self.injector_primitives(lattice),
        }
    }

    fn injector_primitives(&self, lattice: &Lattice) -> Vec<Primitive> {
        let span = self.size.get(self.axis);
        if !lattice.has_stub_room() {
            return self.pyramids(span / 2.0);
        }

        let mut primitives = self.pyramids(((span - 2.0) / 2.0).max(0.0));
        let [a, b] = self.vertices;
        for stub_pos in [a.pos.add(1.0, self.axis), b.pos.sub(1.0, self.axis)] {
            primitives.push(Rectangular::new(stub_pos, Size::UNIT, self.visual).into());
        }
        primitives
    }

    fn pyramids(&self, height: f32) -> Vec<Primitive> {
        let near = self.pos.sub(height / 2.0, self.axis);
        let far = self.pos.add(height / 2.0, self.axis);
        vec![
            SquarePyramid::new(near, 1.0, height, self.axis, false, self.visual).into(),
            SquarePyramid::new(far, 1.0, height, self.axis, true, self.visual).into(),
        ]
    }

    /// Builds the solids of this edge.
    ///
    /// Caps are transparent unless the caller or the edge says otherwise.
    pub fn create_solids(
        &self,
        lattice: &Lattice,
        palette: &Palette,
        defaults: Visual,
        owner: &SolidOwner,
    ) -> Vec<Solid> {
        let defaults = defaults.or(self.kind.defaults());
        self.primitives(lattice)
            .iter()
            .flat_map(|primitive| primitive.create_solids(palette, defaults, owner))
            .collect()
    }
}

/// Builds edges over an ordered vertex list.
///
/// A chain over N vertices yields N − 1 edges; a loop adds the closing edge
/// from the last vertex back to the first.
///
/// # Errors
///
/// Fails on the first consecutive pair that is not axis-aligned. A loop over
/// a single vertex is a degenerate edge and fails too.
pub fn create_edges(
    kind: EdgeKind,
    vertices: &[Vertex],
    is_loop: bool,
    visual: Visual,
) -> Result<Vec<Edge>, GeometryError> {
    let mut edges = vertices
        .windows(2)
        .map(|pair| Edge::new(kind, pair[0], pair[1], visual))
        .collect::<Result<Vec<_>, _>>()?;

    if let (true, Some(first), Some(last)) = (is_loop, vertices.first(), vertices.last()) {
        edges.push(Edge::new(kind, *last, *first, visual)?);
    }
    Ok(edges)
}
