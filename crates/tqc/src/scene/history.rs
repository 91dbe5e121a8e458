//! Scope descriptors and the two navigation stacks.

use std::rc::Rc;

use serde_json::Value;

use tqc_core::{geometry::Pos, identifier::Id};
use tqc_parser::Rotation;

/// Everything needed to build a scope again.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeEntry {
    data: Rc<Value>,
    base: Pos,
    rotation: Rotation,
    scope_id: Id,
}

impl ScopeEntry {
    pub fn new(data: Rc<Value>, base: Pos, rotation: Rotation, scope_id: Id) -> Self {
        Self {
            data,
            base,
            rotation,
            scope_id,
        }
    }

    /// The scope data as given, possibly still wrapped in `main`/`circuit`.
    pub fn data(&self) -> &Rc<Value> {
        &self.data
    }

    pub fn base(&self) -> Pos {
        self.base
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scope_id(&self) -> Id {
        self.scope_id
    }
}

/// Stack of scopes stepped through with `transformations.next`.
///
/// Scope ids name top-level keys of the document the stack was created for.
#[derive(Debug, Clone)]
pub struct TransformationHistory {
    document: Rc<Value>,
    scope_ids: Vec<Id>,
}

impl TransformationHistory {
    pub fn new(scope_id: Id, document: Rc<Value>) -> Self {
        Self {
            document,
            scope_ids: vec![scope_id],
        }
    }

    pub fn push(&mut self, scope_id: Id) {
        self.scope_ids.push(scope_id);
    }

    /// Drops the newest scope, keeping at least the first one.
    pub fn pop(&mut self) -> Option<Id> {
        if self.can_step_back() {
            self.scope_ids.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<Id> {
        self.scope_ids.last().copied()
    }

    /// The scope a [`pop`](Self::pop) would return to.
    pub fn previous(&self) -> Option<Id> {
        let len = self.scope_ids.len();
        (len > 1).then(|| self.scope_ids[len - 2])
    }

    pub fn can_step_back(&self) -> bool {
        self.scope_ids.len() > 1
    }

    pub fn len(&self) -> usize {
        self.scope_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scope_ids.is_empty()
    }

    /// Returns the data stored under `scope_id` in the document.
    ///
    /// The first scope falls back to the whole document when it has no key
    /// of its own.
    pub fn data(&self, scope_id: Id) -> Option<&Value> {
        let is_root = self.scope_ids.first() == Some(&scope_id);
        self.document
            .get(scope_id.to_string())
            .or_else(|| is_root.then_some(&*self.document))
    }
}
