//! Pointer input and its subscriptions.
//!
//! The controller owns one [`InputBindings`] value. It is released and
//! rebuilt whenever the set of visible solids changes, so handlers never see
//! a solid set they were not bound for. Hosts can compare
//! [`InputBindings::generation`] to notice a rebind.

use super::Ray;

/// A pointer event, already unprojected into a world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(Ray),
    DoubleClick(Ray),
    ContextMenu(Ray),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMove(_) => EventKind::PointerMove,
            InputEvent::DoubleClick(_) => EventKind::DoubleClick,
            InputEvent::ContextMenu(_) => EventKind::ContextMenu,
        }
    }

    pub fn ray(&self) -> &Ray {
        match self {
            InputEvent::PointerMove(ray)
            | InputEvent::DoubleClick(ray)
            | InputEvent::ContextMenu(ray) => ray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    DoubleClick,
    ContextMenu,
}

/// What the controller does with a hit-tested event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Highlight every solid of the logical qubit under the pointer.
    HoverQubit,
    /// Highlight the module under the pointer and describe it.
    HoverModule,
    /// Replace the view with the module's nested circuit.
    EnterModule,
    /// Expand the module's nested circuit in place.
    ExpandModule,
}

/// The active event subscriptions.
#[derive(Debug, Default)]
pub struct InputBindings {
    generation: u64,
    handlers: Vec<(EventKind, Handler)>,
}

impl InputBindings {
    /// Releases the current subscriptions and subscribes the scene handlers
    /// afresh.
    pub fn rebind(&mut self) {
        self.release();
        self.generation += 1;
        self.handlers = vec![
            (EventKind::PointerMove, Handler::HoverQubit),
            (EventKind::PointerMove, Handler::HoverModule),
            (EventKind::DoubleClick, Handler::EnterModule),
            (EventKind::ContextMenu, Handler::ExpandModule),
        ];
    }

    /// Drops every subscription.
    pub fn release(&mut self) {
        self.handlers.clear();
    }

    /// Increments on every rebind.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(bound, _)| *bound == kind)
    }

    /// Handlers subscribed to `kind`, in dispatch order.
    pub fn handlers(&self, kind: EventKind) -> Vec<Handler> {
        self.handlers
            .iter()
            .filter(|(bound, _)| *bound == kind)
            .map(|(_, handler)| *handler)
            .collect()
    }
}
