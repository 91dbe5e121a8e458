//! Serializable captures of the current view.

use std::{io::Write, path::Path};

use log::info;
use serde::Serialize;
use tempfile::NamedTempFile;

use tqc_core::{color::Color, draw::Solid, identifier::Id};

use super::{Camera, Controls, SolidHandle, VisibleSolid};
use crate::TqcError;

/// A shown solid with its display state.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSolid {
    handle: SolidHandle,
    scope_id: Id,
    #[serde(flatten)]
    solid: Solid,
    color: Color,
}

impl SnapshotSolid {
    pub fn handle(&self) -> SolidHandle {
        self.handle
    }

    pub fn scope_id(&self) -> Id {
        self.scope_id
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// The state of a scene at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    scope_id: Option<Id>,
    camera: Option<Camera>,
    controls: Controls,
    solids: Vec<SnapshotSolid>,
}

impl SceneSnapshot {
    pub(crate) fn new(
        scope_id: Option<Id>,
        camera: Option<Camera>,
        controls: Controls,
        visible: &[VisibleSolid],
    ) -> Self {
        let solids = visible
            .iter()
            .map(|visible| SnapshotSolid {
                handle: visible.handle(),
                scope_id: visible.scope_id(),
                solid: visible.solid().clone(),
                color: visible.color(),
            })
            .collect();
        Self {
            scope_id,
            camera,
            controls,
            solids,
        }
    }

    /// The most recently rendered scope.
    pub fn scope_id(&self) -> Option<Id> {
        self.scope_id
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn solids(&self) -> &[SnapshotSolid] {
        &self.solids
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TqcError> {
        serde_json::to_string_pretty(self).map_err(|err| TqcError::Export(Box::new(err)))
    }

    /// Writes the snapshot to `path`.
    ///
    /// The file is written next to its destination and then moved in place,
    /// so readers never see a partial snapshot.
    pub fn write_json(&self, path: &Path) -> Result<(), TqcError> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(path)
            .map_err(|err| TqcError::Export(Box::new(err)))?;

        info!(path:? = path, solids = self.solids.len(); "Scene snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tqc_parser::{BuildConfig, CircuitDocument};

    use super::*;
    use crate::scene::{HeadlessSurface, SceneController};
    use tqc_core::draw::Palette;

    fn snapshot() -> SceneSnapshot {
        let document = CircuitDocument::from_value(json!({
            "modules": [{"id": "adder", "position": [1, 0, 0], "size": [2, 1, 1]}]
        }))
        .unwrap();
        let mut controller =
            SceneController::new(HeadlessSurface::new(), Palette::default(), BuildConfig::default());
        controller.load(&document).unwrap();
        controller.snapshot()
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json: Value = serde_json::from_str(&snapshot().to_json().unwrap()).unwrap();

        assert_eq!(json["scope_id"], "main");
        assert_eq!(json["controls"]["reset"], true);
        assert_eq!(json["controls"]["back"], false);
        let solid = &json["solids"][0];
        assert_eq!(solid["scope_id"], "main");
        assert_eq!(solid["owner"]["kind"], "module");
        assert_eq!(solid["owner"]["id"], "adder");
        assert!(json["camera"]["position"].is_array() || json["camera"]["position"].is_object());
    }

    #[test]
    fn test_write_json_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, "stale").unwrap();

        snapshot().write_json(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"adder\""));
    }
}
