use serde_json::json;
use tqc_core::{
    draw::{Palette, SolidOwner},
    geometry::{Axis, Pos},
    identifier::Id,
    semantic::{EdgeKind, Lattice, QubitKind},
};
use tqc_parser::{
    BuildConfig, CircuitCreator, CircuitDocument, Rotation, error::ErrorCode, next_transformation,
    parse,
};

#[test]
fn test_single_block_qubit() {
    let source = r#"{
        "logical_qubits": [
            {"id": "q0", "type": "rough", "blocks": [[[0, 0, 0], [3, 0, 0]]]}
        ]
    }"#;
    let config = BuildConfig::new(Lattice::new(0.0), true);
    let (_, circuit) = parse(source, config).expect("Failed to parse");

    let solids = circuit.create_solids(&Palette::default());
    assert_eq!(solids.solids().len(), 3);
    assert_eq!(solids.qubit_solids(Id::new("q0")).len(), 3);
    assert!(
        solids
            .solids()
            .iter()
            .all(|solid| solid.owner() == &SolidOwner::qubit(Id::new("q0")))
    );
}

#[test]
fn test_wrapped_document_with_nested_module() {
    let source = r#"{
        "main": {
            "circuit": {
                "logical_qubits": [
                    {"id": 1, "type": "smooth", "injectors": [[[0, 0, 0], [0, 0, 4]]]}
                ],
                "modules": [
                    {"id": "adder", "position": [2, 0, 0], "size": [1, 1, 1], "description": "Adder"}
                ],
                "transformations": {"next": "step2"}
            }
        },
        "adder": {"logical_qubits": []},
        "step2": {"logical_qubits": []}
    }"#;

    let (document, circuit) = parse(source, BuildConfig::default()).expect("Failed to parse");

    let qubit = &circuit.logical_qubits()[0];
    assert_eq!(qubit.kind(), QubitKind::Smooth);
    assert_eq!(qubit.id(), Id::new("1"));
    assert_eq!(qubit.edges()[0].kind(), EdgeKind::Injector);
    assert_eq!(qubit.edges()[0].axis(), Axis::Z);

    let module = circuit.module(Id::new("adder")).expect("module missing");
    assert_eq!(module.description(), Some("Adder"));
    assert!(document.module(Id::new("adder")).is_some());
    assert_eq!(next_transformation(document.scope()), Some(Id::new("step2")));
}

#[test]
fn test_injector_decomposition() {
    let source = r#"{"logical_qubits": [
        {"id": "q", "type": "rough", "injectors": [[[0, 0, 0], [0, 0, 2]]]}
    ]}"#;
    let (_, circuit) = parse(source, BuildConfig::default()).expect("Failed to parse");

    // Two pyramids, two stubs, two vertices.
    let solids = circuit.create_solids(&Palette::default());
    assert_eq!(solids.solids().len(), 6);
}

#[test]
fn test_all_errors_reported() {
    let source = r#"{
        "logical_qubits": [
            {"id": "a", "type": "rough", "blocks": [[[0, 0, 0], [1, 1, 0]]]},
            {"id": "b", "type": "curly"}
        ]
    }"#;
    let err = parse(source, BuildConfig::default()).unwrap_err();

    let codes: Vec<_> = err
        .diagnostics()
        .iter()
        .filter_map(|diag| diag.code())
        .collect();
    assert_eq!(codes, vec![ErrorCode::E200, ErrorCode::E202]);
    assert!(err.to_string().contains("(+1 more)"));
}

#[test]
fn test_malformed_json() {
    let err = parse("{\"logical_qubits\": [", BuildConfig::default()).unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E100));
    assert_eq!(diag.labels().len(), 1);
}

#[test]
fn test_nested_scope_with_base_and_rotation() {
    let document = CircuitDocument::from_value(json!({
        "main": {"modules": [{"id": "m", "position": [4, 0, 0], "size": [1, 1, 1], "rotation": ["y", "x", "z"]}]},
        "m": {"logical_qubits": [{"id": "inner", "type": "rough", "blocks": [[[0, 0, 0], [0, 2, 0]]]}]}
    }))
    .expect("valid document");

    let creator = CircuitCreator::new(BuildConfig::new(Lattice::new(0.0), true));
    let payload = document.module(Id::new("m")).expect("nested scope missing");
    let rotation = Rotation::from_value(
        document.scope()["modules"][0].get("rotation"),
    )
    .expect("valid rotation");

    let circuit = creator
        .create(payload, Pos::new(4.0, 0.0, 0.0), rotation)
        .expect("Failed to build nested scope");

    let edge = &circuit.logical_qubits()[0].edges()[0];
    assert_eq!(edge.axis(), Axis::X);
    assert_eq!(edge.vertices()[0].pos().to_array(), [4.0, 0.0, 0.0]);
    assert_eq!(edge.vertices()[1].pos().to_array(), [6.0, 0.0, 0.0]);
}
