//! Lattice spacing.

use crate::geometry::{Axes, Pos};

/// Spacing of the circuit lattice.
///
/// Adjacent lattice coordinates are `pitch = margin + 1` world units apart:
/// each vertex occupies one unit and `margin` units of gap separate it from
/// the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    margin: f32,
}

impl Lattice {
    /// Smallest margin that leaves room for injector stubs.
    pub const STUB_MARGIN: f32 = 1.5;

    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn pitch(&self) -> f32 {
        self.margin + 1.0
    }

    /// Returns true if injectors get unit stubs next to their endpoints.
    pub fn has_stub_room(&self) -> bool {
        self.margin >= Self::STUB_MARGIN
    }

    /// Maps a lattice coordinate to world space.
    pub fn to_world(&self, pos: Pos) -> Pos {
        pos.mul(self.pitch(), Axes::ALL)
    }
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(Self::STUB_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pitch() {
        let lattice = Lattice::default();
        assert_eq!(lattice.pitch(), 2.5);
        assert!(lattice.has_stub_room());
    }

    #[test]
    fn test_to_world() {
        let lattice = Lattice::new(1.0);
        assert_eq!(lattice.to_world(Pos::new(1.0, 2.0, 3.0)).to_array(), [2.0, 4.0, 6.0]);
        assert!(!lattice.has_stub_room());
    }
}
