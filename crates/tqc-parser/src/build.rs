//! Building circuit scopes from document data.
//!
//! [`CircuitCreator`] turns the data of one scope into a validated
//! [`Circuit`]. A nested module's local frame is mapped into its parent's
//! frame through a [`Rotation`] (which raw axis feeds each output axis) and a
//! base position offset:
//!
//! ```text
//! out[i] = raw[rotation[i]] + base[i]
//! ```
//!
//! Every problem in the scope is collected; any error fails the whole scope,
//! so a partially built circuit is never returned.

use std::{fmt, rc::Rc};

use log::{debug, trace};
use serde_json::Value;
use tqc_core::{
    draw::Visual,
    geometry::{Axis, GeometryError, Pos, Size},
    identifier::Id,
    semantic::{
        Circuit, Edge, EdgeKind, Lattice, LogicalQubit, Module, QubitKind, Vertex, create_edges,
    },
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    schema::{self, EdgeSpec, ModuleSpec, QubitSpec, VisualSpec},
};

/// Axis remapping from a nested frame into its parent frame.
///
/// Output axis `i` reads raw axis `self[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation([Axis; 3]);

impl Rotation {
    /// The identity mapping `[x, y, z]`.
    pub const IDENTITY: Rotation = Rotation([Axis::X, Axis::Y, Axis::Z]);

    pub fn new(axes: [Axis; 3]) -> Self {
        Self(axes)
    }

    pub fn axes(&self) -> [Axis; 3] {
        self.0
    }

    /// Parses a rotation such as `["y", "x", "z"]`.
    ///
    /// A missing value or `null` is the identity.
    ///
    /// # Errors
    ///
    /// Returns an `E201` diagnostic unless the value is an array of exactly
    /// three axis names.
    pub fn from_value(value: Option<&Value>) -> Result<Self, Diagnostic> {
        let items = match value {
            None | Some(Value::Null) => return Ok(Self::IDENTITY),
            Some(Value::Array(items)) if items.len() == 3 => items,
            Some(other) => {
                return Err(Self::error(format!(
                    "expected an array of three axis names, found {other}"
                )));
            }
        };

        let mut axes = [Axis::X; 3];
        for (slot, item) in axes.iter_mut().zip(items) {
            let name = item
                .as_str()
                .ok_or_else(|| Self::error(format!("expected an axis name, found {item}")))?;
            *slot = name.parse().map_err(|err| Self::error(format!("{err}")))?;
        }
        Ok(Self(axes))
    }

    /// Maps a raw position into the parent frame, without offset.
    pub fn apply(&self, raw: [f32; 3]) -> [f32; 3] {
        self.0.map(|axis| raw[axis.index()])
    }

    fn error(help: String) -> Diagnostic {
        Diagnostic::error("invalid rotation")
            .with_code(ErrorCode::E201)
            .with_help(help)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "[{x}, {y}, {z}]")
    }
}

/// Remaps a raw position into the parent frame and offsets it by `base`.
///
/// # Examples
///
/// ```
/// # use tqc_core::geometry::{Axis, Pos};
/// # use tqc_parser::{Rotation, collect_pos};
/// let rotation = Rotation::new([Axis::Z, Axis::X, Axis::Y]);
/// let pos = collect_pos(Pos::new(1.0, 2.0, 3.0), Pos::new(10.0, 0.0, 0.0), rotation);
/// assert_eq!(pos.to_array(), [13.0, 1.0, 2.0]);
/// ```
pub fn collect_pos(raw: Pos, base: Pos, rotation: Rotation) -> Pos {
    let [x, y, z] = rotation.apply(raw.to_array());
    Pos::new(x + base.x(), y + base.y(), z + base.z())
}

/// Settings that shape scope building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildConfig {
    lattice: Lattice,
    overwrite_colors: bool,
}

impl BuildConfig {
    pub fn new(lattice: Lattice, overwrite_colors: bool) -> Self {
        Self {
            lattice,
            overwrite_colors,
        }
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Whether `visual` objects in documents are honored.
    pub fn overwrite_colors(&self) -> bool {
        self.overwrite_colors
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(Lattice::default(), true)
    }
}

/// Builds [`Circuit`]s from scope data.
#[derive(Debug, Clone, Default)]
pub struct CircuitCreator {
    config: BuildConfig,
}

impl CircuitCreator {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds the circuit of one scope.
    ///
    /// `data` must already be unwrapped from any `main`/`circuit` wrapper.
    ///
    /// # Errors
    ///
    /// Returns every diagnostic found in the scope if any of them is an error.
    pub fn create(&self, data: &Value, base: Pos, rotation: Rotation) -> Result<Circuit, ParseError> {
        let mut circuit = Circuit::new(self.config.lattice, Vec::new(), Vec::new());
        self.add(&mut circuit, data, base, rotation)?;
        Ok(circuit)
    }

    /// Builds the elements of `data` and appends them to `circuit`.
    ///
    /// `circuit` is left untouched on error.
    pub fn add(
        &self,
        circuit: &mut Circuit,
        data: &Value,
        base: Pos,
        rotation: Rotation,
    ) -> Result<(), ParseError> {
        debug!(base:% = base, rotation:% = rotation; "Building circuit scope");
        let mut collector = DiagnosticCollector::new();

        let qubits = collector
            .check(schema::list(data, "logical_qubits"))
            .map(|entries| self.create_logical_qubits(entries, base, rotation, &mut collector))
            .unwrap_or_default();
        let modules = collector
            .check(schema::list(data, "modules"))
            .map(|entries| self.create_modules(entries, base, rotation, &mut collector))
            .unwrap_or_default();

        collector.finish()?;
        debug!(qubits = qubits.len(), modules = modules.len(); "Circuit scope built");
        circuit.add(qubits, modules);
        Ok(())
    }

    fn create_logical_qubits(
        &self,
        entries: &[Value],
        base: Pos,
        rotation: Rotation,
        collector: &mut DiagnosticCollector,
    ) -> Vec<LogicalQubit> {
        let mut qubits = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let path = format!("logical_qubits[{index}]");
            let Some(spec) = collector.check(schema::entry::<QubitSpec>(entry, &path)) else {
                continue;
            };

            let kind = QubitKind::from_name(&spec.kind);
            if kind.is_none() {
                collector.emit(
                    Diagnostic::error(format!("unknown qubit type `{}` at {path}", spec.kind))
                        .with_code(ErrorCode::E202)
                        .with_help("use `rough` or `smooth`"),
                );
            }

            let mut edges = Vec::new();
            for (kind, key, specs) in [
                (EdgeKind::Block, "blocks", &spec.blocks),
                (EdgeKind::Injector, "injectors", &spec.injectors),
                (EdgeKind::Cap, "caps", &spec.caps),
            ] {
                for (edge_index, edge_spec) in specs.iter().enumerate() {
                    let edge_path = format!("{path}.{key}[{edge_index}]");
                    let built = self.create_edges(kind, edge_spec, base, rotation, &edge_path);
                    if let Some(built) = collector.check(built) {
                        edges.extend(built);
                    }
                }
            }

            if let Some(kind) = kind {
                let id = Id::new(&spec.id.to_string());
                trace!(id:% = id, kind:% = kind, edges = edges.len(); "Logical qubit built");
                qubits.push(LogicalQubit::new(kind, id, edges, Rc::new(entry.clone())));
            }
        }
        qubits
    }

    fn create_edges(
        &self,
        kind: EdgeKind,
        spec: &EdgeSpec,
        base: Pos,
        rotation: Rotation,
        path: &str,
    ) -> Result<Vec<Edge>, Diagnostic> {
        let vertices = spec
            .vertices()
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = parse_coordinate(raw, &format!("{path}.vertices[{index}]"))?;
                let pos = collect_pos(raw, base, rotation);
                Vertex::from_lattice(pos, &self.config.lattice)
                    .map_err(|err| geometry_diagnostic(err, &format!("{path}.vertices[{index}]")))
            })
            .collect::<Result<Vec<_>, Diagnostic>>()?;

        let visual = self.visual(spec.visual(), path)?;
        create_edges(kind, &vertices, false, visual).map_err(|err| geometry_diagnostic(err, path))
    }

    fn create_modules(
        &self,
        entries: &[Value],
        base: Pos,
        rotation: Rotation,
        collector: &mut DiagnosticCollector,
    ) -> Vec<Module> {
        let mut modules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let path = format!("modules[{index}]");
            let Some(spec) = collector.check(schema::entry::<ModuleSpec>(entry, &path)) else {
                continue;
            };
            if let Some(module) = collector.check(self.create_module(&spec, entry, base, rotation, &path)) {
                modules.push(module);
            }
        }
        modules
    }

    fn create_module(
        &self,
        spec: &ModuleSpec,
        entry: &Value,
        base: Pos,
        rotation: Rotation,
        path: &str,
    ) -> Result<Module, Diagnostic> {
        let position = parse_coordinate(&spec.position, &format!("{path}.position"))?;
        let size = parse_coordinate(&spec.size, &format!("{path}.size"))?;
        Rotation::from_value(spec.rotation.as_ref())
            .map_err(|diag| diag.with_help(format!("in the drill-down rotation of {path}")))?;

        let pos = collect_pos(position, base, rotation);
        let visual = self.visual(spec.visual.as_ref(), path)?;

        let module = Module::new(
            Id::new(&spec.id.to_string()),
            pos,
            Size::from_array(size.to_array()),
            &self.config.lattice,
            visual,
            Rc::new(entry.clone()),
        );
        if !(module.pos().is_finite() && module.size().is_finite()) {
            return Err(geometry_diagnostic(GeometryError::Overflow(pos), path));
        }
        Ok(module)
    }

    fn visual(&self, spec: Option<&VisualSpec>, path: &str) -> Result<Visual, Diagnostic> {
        match spec {
            Some(spec) if self.config.overwrite_colors => spec.to_visual(&format!("{path}.visual")),
            _ => Ok(Visual::new()),
        }
    }
}

/// Reports a geometry error of the element at `path`.
fn geometry_diagnostic(err: GeometryError, path: &str) -> Diagnostic {
    let diag = match &err {
        GeometryError::InvalidEdge { .. } => {
            Diagnostic::error(format!("malformed edge at {path}")).with_code(ErrorCode::E200)
        }
        GeometryError::Overflow(_) => {
            Diagnostic::error(format!("coordinate out of range at {path}")).with_code(ErrorCode::E203)
        }
        GeometryError::UnknownAxis(_) => {
            Diagnostic::error(format!("unknown axis at {path}")).with_code(ErrorCode::E201)
        }
    };
    diag.with_help(err.to_string())
}

/// Parses an `[x, y, z]` coordinate of finite numbers.
fn parse_coordinate(value: &Value, path: &str) -> Result<Pos, Diagnostic> {
    let error = |help: String| {
        Diagnostic::error(format!("malformed vertex at {path}"))
            .with_code(ErrorCode::E203)
            .with_help(help)
    };

    let items = value
        .as_array()
        .filter(|items| items.len() == 3)
        .ok_or_else(|| error(format!("expected an array of three numbers, found {value}")))?;

    let mut components = [0.0f32; 3];
    for (slot, item) in components.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .map(|number| number as f32)
            .filter(|number| number.is_finite())
            .ok_or_else(|| error(format!("expected a finite number, found {item}")))?;
    }
    Ok(Pos::from_array(components))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn creator(margin: f32) -> CircuitCreator {
        CircuitCreator::new(BuildConfig::new(Lattice::new(margin), true))
    }

    fn codes(err: &ParseError) -> Vec<ErrorCode> {
        err.diagnostics()
            .iter()
            .filter_map(|diag| diag.code())
            .collect()
    }

    #[test]
    fn test_rotation_parsing() {
        assert_eq!(Rotation::from_value(None).unwrap(), Rotation::IDENTITY);
        assert_eq!(
            Rotation::from_value(Some(&json!(["z", "x", "y"]))).unwrap(),
            Rotation::new([Axis::Z, Axis::X, Axis::Y])
        );

        for bad in [json!(["x", "y"]), json!(["x", "y", "w"]), json!("xyz"), json!([1, 2, 3])] {
            let err = Rotation::from_value(Some(&bad)).unwrap_err();
            assert_eq!(err.code(), Some(ErrorCode::E201));
        }
    }

    #[test]
    fn test_single_block_scenario() {
        let data = json!({
            "logical_qubits": [
                {"id": "q0", "type": "rough", "blocks": [[[0, 0, 0], [3, 0, 0]]]}
            ]
        });
        let circuit = creator(0.0)
            .create(&data, Pos::ORIGIN, Rotation::IDENTITY)
            .unwrap();

        let qubit = &circuit.logical_qubits()[0];
        assert_eq!(qubit.kind(), QubitKind::Rough);
        assert_eq!(qubit.edges().len(), 1);
        assert_eq!(qubit.edges()[0].axis(), Axis::X);
        assert_eq!(qubit.edges()[0].size().to_array(), [2.0, 1.0, 1.0]);
        assert_eq!(qubit.edges()[0].pos().to_array(), [1.5, 0.0, 0.0]);
        assert_eq!(qubit.vertices().len(), 2);
    }

    #[test]
    fn test_object_form_builds_chain() {
        let data = json!({
            "logical_qubits": [{
                "id": "q", "type": "smooth",
                "injectors": [{"vertices": [[0, 0, 0], [0, 0, 2], [0, 2, 2]], "visual": {"color": "red"}}]
            }]
        });
        let circuit = creator(1.5)
            .create(&data, Pos::ORIGIN, Rotation::IDENTITY)
            .unwrap();
        let qubit = &circuit.logical_qubits()[0];
        assert_eq!(qubit.edges().len(), 2);
        assert!(qubit.edges().iter().all(|edge| edge.kind() == EdgeKind::Injector));
        assert!(qubit.edges()[0].visual().color().is_some());
    }

    #[test]
    fn test_visual_ignored_without_overwrite() {
        let data = json!({
            "logical_qubits": [{
                "id": "q", "type": "smooth",
                "blocks": [{"vertices": [[0, 0, 0], [0, 0, 1]], "visual": {"color": "not a color"}}]
            }]
        });
        let creator = CircuitCreator::new(BuildConfig::new(Lattice::default(), false));
        let circuit = creator.create(&data, Pos::ORIGIN, Rotation::IDENTITY).unwrap();
        assert!(circuit.logical_qubits()[0].edges()[0].visual().is_empty());
    }

    #[test]
    fn test_rotation_and_base_applied() {
        let data = json!({
            "logical_qubits": [{"id": "q", "type": "rough", "blocks": [[[1, 0, 0], [1, 0, 2]]]}],
            "modules": [{"id": "m", "position": [0, 0, 1], "size": [1, 2, 3]}]
        });
        let rotation = Rotation::new([Axis::Z, Axis::X, Axis::Y]);
        let circuit = creator(0.0)
            .create(&data, Pos::new(5.0, 0.0, 0.0), rotation)
            .unwrap();

        let edge = &circuit.logical_qubits()[0].edges()[0];
        assert_eq!(edge.axis(), Axis::X);
        assert_eq!(edge.vertices()[0].pos().to_array(), [5.0, 1.0, 0.0]);
        assert_eq!(edge.vertices()[1].pos().to_array(), [7.0, 1.0, 0.0]);

        // Positions follow the rotation; the extent stays as written
        let module = &circuit.modules()[0];
        assert_eq!(module.size().to_array(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let data = json!({
            "logical_qubits": [
                {"id": "far", "type": "rough", "blocks": [[[2e38, 0, 0], [3e38, 0, 0]]]}
            ],
            "modules": [{"id": "huge", "position": [0, 0, 0], "size": [3e38, 1, 1]}]
        });
        let err = creator(1.5)
            .create(&data, Pos::ORIGIN, Rotation::IDENTITY)
            .unwrap_err();

        assert_eq!(codes(&err), vec![ErrorCode::E203, ErrorCode::E203]);
        assert!(err.diagnostics()[0].message().contains("logical_qubits[0].blocks[0].vertices[0]"));
        assert!(err.diagnostics()[1].message().contains("modules[0]"));
    }

    #[test]
    fn test_errors_fail_whole_scope() {
        let data = json!({
            "logical_qubits": [
                {"id": "ok", "type": "rough", "blocks": [[[0, 0, 0], [1, 0, 0]]]},
                {"id": "diag", "type": "rough", "blocks": [[[0, 0, 0], [1, 1, 0]]]},
                {"id": "kind", "type": "bumpy"},
                {"id": "vertex", "type": "smooth", "caps": [[[0, 0], [1, 0, 0]]]}
            ],
            "modules": [
                {"id": "rot", "position": [0, 0, 0], "size": [1, 1, 1], "rotation": ["x", "q", "z"]},
                {"id": "shape", "position": [0, 0, 0]}
            ]
        });
        let err = creator(1.5)
            .create(&data, Pos::ORIGIN, Rotation::IDENTITY)
            .unwrap_err();

        assert_eq!(
            codes(&err),
            vec![
                ErrorCode::E200,
                ErrorCode::E202,
                ErrorCode::E203,
                ErrorCode::E201,
                ErrorCode::E101
            ]
        );
    }

    #[test]
    fn test_add_leaves_circuit_untouched_on_error() {
        let creator = creator(1.5);
        let mut circuit = creator
            .create(
                &json!({"modules": [{"id": "m", "position": [0, 0, 0], "size": [1, 1, 1]}]}),
                Pos::ORIGIN,
                Rotation::IDENTITY,
            )
            .unwrap();

        let bad = json!({"logical_qubits": [{"id": "q", "type": "rough", "blocks": [[[0, 0, 0], [0, 0, 0]]]}]});
        assert!(creator
            .add(&mut circuit, &bad, Pos::ORIGIN, Rotation::IDENTITY)
            .is_err());
        assert_eq!(circuit.modules().len(), 1);
        assert!(circuit.logical_qubits().is_empty());
    }

    #[test]
    fn test_modules_must_be_array() {
        let err = creator(1.5)
            .create(&json!({"modules": {"id": "m"}}), Pos::ORIGIN, Rotation::IDENTITY)
            .unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E101]);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        Just([Axis::X, Axis::Y, Axis::Z])
            .prop_shuffle()
            .prop_map(Rotation::new)
    }

    /// A permutation rotation keeps the multiset of coordinates.
    fn check_permutation_preserves_components(
        raw: [i16; 3],
        rotation: Rotation,
    ) -> Result<(), TestCaseError> {
        let raw = raw.map(f32::from);
        let mut out = collect_pos(Pos::from_array(raw), Pos::ORIGIN, rotation).to_array();
        let mut expected = raw;
        out.sort_by(f32::total_cmp);
        expected.sort_by(f32::total_cmp);
        prop_assert_eq!(out, expected);
        Ok(())
    }

    /// The base offset is added after remapping, per output axis.
    fn check_base_added_per_output_axis(
        raw: [i16; 3],
        base: [i16; 3],
        rotation: Rotation,
    ) -> Result<(), TestCaseError> {
        let raw = Pos::from_array(raw.map(f32::from));
        let base = Pos::from_array(base.map(f32::from));
        let with_base = collect_pos(raw, base, rotation);
        let without = collect_pos(raw, Pos::ORIGIN, rotation);
        for axis in Axis::ALL {
            prop_assert_eq!(with_base.get(axis), without.get(axis) + base.get(axis));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn permutation_preserves_components(raw in any::<[i16; 3]>(), rotation in rotation_strategy()) {
            check_permutation_preserves_components(raw, rotation)?;
        }

        #[test]
        fn base_added_per_output_axis(
            raw in any::<[i16; 3]>(),
            base in any::<[i16; 3]>(),
            rotation in rotation_strategy(),
        ) {
            check_base_added_per_output_axis(raw, base, rotation)?;
        }
    }
}
