//! Hover highlight bookkeeping.

use tqc_core::{color::Color, identifier::Id};

use super::SolidHandle;

/// The element under the pointer, identified within its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoverTarget {
    pub scope_id: Id,
    pub id: Id,
}

/// One highlighted element and the colors its solids had before.
#[derive(Debug, Default)]
pub(crate) struct Highlight {
    target: Option<HoverTarget>,
    saved: Vec<(SolidHandle, Color)>,
}

impl Highlight {
    pub fn target(&self) -> Option<HoverTarget> {
        self.target
    }

    pub fn is(&self, target: HoverTarget) -> bool {
        self.target == Some(target)
    }

    /// Forgets the highlight, returning the colors to restore.
    pub fn take(&mut self) -> Vec<(SolidHandle, Color)> {
        self.target = None;
        std::mem::take(&mut self.saved)
    }

    pub fn set(&mut self, target: HoverTarget, saved: Vec<(SolidHandle, Color)>) {
        self.target = Some(target);
        self.saved = saved;
    }
}

/// Highlights kept by the qubit and module hover handlers.
#[derive(Debug, Default)]
pub(crate) struct HoverState {
    pub qubit: Highlight,
    pub module: Highlight,
}
