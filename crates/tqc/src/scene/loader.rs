//! Loading nested module circuits that are not stored in the document.
//!
//! The controller never blocks on a load. Entering or expanding a module
//! whose circuit is missing from the loaded document yields a
//! [`LoadRequest`]; the host resolves it (see [`ModuleLoader`]) and hands the
//! result back through `SceneController::complete_load`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde_json::Value;

use tqc_core::{geometry::Pos, identifier::Id};
use tqc_parser::{CircuitDocument, Rotation};

use crate::TqcError;

/// Navigation counter value a request was issued under.
///
/// Any later navigation makes older tokens stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

/// What to do with a module circuit once it has loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadAction {
    /// Replace the view with the circuit.
    Enter { rotation: Rotation, scope_id: Id },
    /// Replace the module's box with the circuit, in place.
    Expand {
        parent_scope_id: Id,
        base: Pos,
        rotation: Rotation,
        scope_id: Id,
    },
}

/// A pending module load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    token: LoadToken,
    module_id: Id,
    action: LoadAction,
}

impl LoadRequest {
    pub(crate) fn new(token: LoadToken, module_id: Id, action: LoadAction) -> Self {
        Self {
            token,
            module_id,
            action,
        }
    }

    pub fn token(&self) -> LoadToken {
        self.token
    }

    pub fn module_id(&self) -> Id {
        self.module_id
    }

    pub fn action(&self) -> &LoadAction {
        &self.action
    }
}

/// Resolves module circuits for [`LoadRequest`]s.
pub trait ModuleLoader {
    /// Loads the document holding the circuit of `request`'s module.
    fn load(&mut self, request: &LoadRequest) -> Result<Value, TqcError>;
}

/// Reads `<module_id>.json` from a directory.
#[derive(Debug, Clone)]
pub struct FsModuleLoader {
    dir: PathBuf,
}

impl FsModuleLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a module's circuit is read from.
    pub fn path_for(&self, module_id: Id) -> PathBuf {
        self.dir.join(format!("{module_id}.json"))
    }
}

impl ModuleLoader for FsModuleLoader {
    fn load(&mut self, request: &LoadRequest) -> Result<Value, TqcError> {
        let module_id = request.module_id();
        let path = self.path_for(module_id);
        debug!(module_id:% = module_id, path:? = path; "Loading module circuit");

        let source = fs::read_to_string(&path).map_err(|err| {
            debug!(path:? = path, err:% = err; "Module circuit not readable");
            TqcError::ModuleNotFound(module_id)
        })?;
        let document = CircuitDocument::parse(&source)
            .map_err(|err| TqcError::new_parse_error(err, source.as_str()))?;

        info!(module_id:% = module_id; "Module circuit loaded");
        Ok(document.root().as_ref().clone())
    }
}
