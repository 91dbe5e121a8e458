//! Interned identifiers for qubits, modules and scopes
//!
//! Circuit documents name every logical qubit and module with a string, and
//! the scene indexes solids by those names on every pointer event. [`Id`]
//! interns the strings once so that lookups and comparisons are cheap.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Identifier of a logical qubit, module or scope.
///
/// # Examples
///
/// ```
/// use tqc_core::identifier::Id;
///
/// let root = Id::new("main");
/// let module = Id::new("distill");
///
/// let scope = root.create_nested(module);
/// assert_eq!(scope, "main_distill");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Separator placed between a parent scope and a module id.
    pub const SCOPE_SEPARATOR: char = '_';

    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the id of a scope entered from this scope through `child_id`.
    ///
    /// Scopes are joined with [`Id::SCOPE_SEPARATOR`], so entering module
    /// `b` from scope `main_a` yields `main_a_b`.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner();
        let parent_str = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let child_str = interner
            .resolve(child_id.0)
            .expect("Child ID should exist in interner");
        let nested_name = format!("{}{}{}", parent_str, Self::SCOPE_SEPARATOR, child_str);
        Self(interner.get_or_intern(&nested_name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
