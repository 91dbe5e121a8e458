//! Integration tests for scene navigation
//!
//! These tests drive a controller over a headless surface the way a
//! windowed host would: through pointer events and navigation commands.

use std::collections::HashSet;

use serde_json::json;
use tqc::{
    CircuitDocument, TqcError,
    config::AppConfig,
    geometry::Pos,
    identifier::Id,
    scene::{
        DescriptionEvent, FsModuleLoader, HeadlessSurface, InputEvent, Ray, SceneController,
        SolidHandle, aim_at,
    },
};

fn document() -> CircuitDocument {
    CircuitDocument::from_value(json!({
        "main": {
            "logical_qubits": [
                {"id": "q0", "type": "rough", "blocks": [[[0, 0, 0], [1, 0, 0]]]}
            ],
            "modules": [
                {"id": "adder", "position": [3, 3, 0], "size": [1, 1, 1], "description": "Adds two registers"},
                {"id": "remote", "position": [6, 6, 0], "size": [1, 1, 1]}
            ],
            "transformations": {"next": "step2"}
        },
        "adder": {
            "logical_qubits": [
                {"id": "a", "type": "smooth", "blocks": [[[0, 0, 0], [0, 1, 0]]]}
            ]
        },
        "step2": {
            "modules": [{"id": "m2", "position": [0, 0, 0], "size": [1, 1, 1]}]
        }
    }))
    .expect("Failed to read document")
}

fn controller() -> SceneController<HeadlessSurface> {
    let mut controller = SceneController::from_config(&AppConfig::default(), HeadlessSurface::new())
        .expect("Failed to create controller");
    controller.load(&document()).expect("Failed to load document");
    controller
}

fn module_ray(controller: &SceneController<HeadlessSurface>, scope_id: &str, module_id: &str) -> Ray {
    let handle = controller
        .module_solid(Id::new(scope_id), Id::new(module_id))
        .map(|visible| visible.handle())
        .expect("Module is not shown");
    aim_at(controller.surface(), handle).expect("Module is not displayed")
}

fn current_scope(controller: &SceneController<HeadlessSurface>) -> Option<String> {
    controller
        .current_data()
        .map(|entry| entry.scope_id().to_string())
}

fn assert_disposed_once(surface: &HeadlessSurface) {
    let unique: HashSet<SolidHandle> = surface.disposed().iter().copied().collect();
    assert_eq!(unique.len(), surface.disposed().len(), "A solid was disposed twice");
}

#[test]
fn test_load_shows_root_scope() {
    let controller = controller();

    // Three qubit solids and two module boxes
    assert_eq!(controller.surface().len(), 5);
    assert_eq!(current_scope(&controller).as_deref(), Some("main"));
    assert_eq!(controller.controls().next(), Some(Id::new("step2")));
    assert!(!controller.controls().back());
    assert!(!controller.controls().prev());
    assert_eq!(controller.surface().camera(), controller.camera());
}

#[test]
fn test_module_hover_shows_and_hides_description() {
    let mut controller = controller();
    let adder = controller
        .module_solid(Id::new("main"), Id::new("adder"))
        .map(|visible| (visible.handle(), visible.color()))
        .unwrap();
    let ray = module_ray(&controller, "main", "adder");

    controller.handle_input(InputEvent::PointerMove(ray)).unwrap();
    controller.handle_input(InputEvent::PointerMove(ray)).unwrap();
    assert_eq!(
        controller.surface().solid(adder.0).unwrap().color(),
        controller.palette().selected()
    );
    assert_eq!(controller.surface().description(), Some("Adds two registers"));

    let away = Ray::looking_down_at(Pos::new(-100.0, -100.0, 0.0));
    controller.handle_input(InputEvent::PointerMove(away)).unwrap();
    controller.handle_input(InputEvent::PointerMove(away)).unwrap();

    assert_eq!(controller.surface().solid(adder.0).unwrap().color(), adder.1);
    assert_eq!(
        controller.surface().description_log(),
        &[
            DescriptionEvent::Show("Adds two registers".to_string()),
            DescriptionEvent::Hide
        ]
    );
}

#[test]
fn test_module_hover_falls_back_to_id() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "remote");
    controller.handle_input(InputEvent::PointerMove(ray)).unwrap();

    assert_eq!(controller.surface().description(), Some("remote"));
}

#[test]
fn test_enter_module_and_back() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "adder");

    let request = controller.handle_input(InputEvent::DoubleClick(ray)).unwrap();
    assert!(request.is_none(), "Inline module should not need a load");
    assert_eq!(current_scope(&controller).as_deref(), Some("main_adder"));
    assert_eq!(controller.surface().len(), 3);
    assert_eq!(controller.surface().disposed().len(), 5);
    assert!(controller.controls().back());
    assert_eq!(controller.controls().next(), None);

    assert!(controller.back().unwrap());
    assert_eq!(current_scope(&controller).as_deref(), Some("main"));
    assert_eq!(controller.surface().len(), 5);
    assert!(!controller.controls().back());
    assert_eq!(controller.controls().next(), Some(Id::new("step2")));
    assert!(!controller.back().unwrap());
    assert_disposed_once(controller.surface());
}

/// A root scope with a module whose nested circuit holds another module.
fn nested_document() -> CircuitDocument {
    CircuitDocument::from_value(json!({
        "main": {
            "modules": [{"id": "outer", "position": [3, 3, 0], "size": [2, 2, 1]}]
        },
        "outer": {
            "logical_qubits": [
                {"id": "a", "type": "rough", "blocks": [[[0, 0, 0], [0, 2, 0]]]}
            ],
            "modules": [{"id": "inner", "position": [2, 0, 0], "size": [1, 1, 1]}],
            "transformations": {"next": "outer_step"}
        },
        "inner": {
            "logical_qubits": [
                {"id": "b", "type": "smooth", "blocks": [[[0, 0, 0], [0, 0, 3]]]}
            ]
        },
        "outer_step": {}
    }))
    .expect("Failed to read document")
}

#[test]
fn test_back_restores_intermediate_scope() {
    let mut controller = SceneController::from_config(&AppConfig::default(), HeadlessSurface::new())
        .expect("Failed to create controller");
    controller.load(&nested_document()).expect("Failed to load document");

    let ray = module_ray(&controller, "main", "outer");
    controller.handle_input(InputEvent::DoubleClick(ray)).unwrap();
    assert_eq!(current_scope(&controller).as_deref(), Some("main_outer"));

    let shown = |controller: &SceneController<HeadlessSurface>| {
        controller
            .visible()
            .iter()
            .map(|visible| (visible.scope_id(), visible.solid().clone(), visible.color()))
            .collect::<Vec<_>>()
    };
    let outer_solids = shown(&controller);
    let outer_camera = controller.camera().copied();
    let outer_controls = *controller.controls();
    assert!(outer_controls.back());
    assert!(!outer_controls.prev());
    assert_eq!(outer_controls.next(), Some(Id::new("outer_step")));

    let ray = module_ray(&controller, "main_outer", "inner");
    controller.handle_input(InputEvent::DoubleClick(ray)).unwrap();
    assert_eq!(current_scope(&controller).as_deref(), Some("main_outer_inner"));
    assert_eq!(controller.controls().next(), None);

    assert!(controller.back().unwrap());
    assert_eq!(current_scope(&controller).as_deref(), Some("main_outer"));
    assert_eq!(shown(&controller), outer_solids);
    assert_eq!(controller.camera().copied(), outer_camera);
    assert_eq!(controller.surface().camera(), controller.camera());
    assert_eq!(*controller.controls(), outer_controls);
    assert_disposed_once(controller.surface());
}

#[test]
fn test_expand_module_in_place() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "adder");
    let generation = controller.bindings().generation();

    let request = controller.handle_input(InputEvent::ContextMenu(ray)).unwrap();
    assert!(request.is_none());

    // The module box is replaced by the nested qubit
    assert_eq!(controller.surface().len(), 4 + 3);
    assert!(controller.module_solid(Id::new("main"), Id::new("adder")).is_none());
    assert_eq!(controller.qubit_solids(Id::new("main_adder"), Id::new("a")).len(), 3);
    assert_eq!(
        controller.circuits_data(Id::new("main_adder")).map(|entry| entry.base()),
        Some(Pos::new(3.0, 3.0, 0.0))
    );
    assert_eq!(current_scope(&controller).as_deref(), Some("main"));
    assert!(controller.bindings().generation() > generation);
    assert_disposed_once(controller.surface());
}

#[test]
fn test_load_request_for_missing_module() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("remote.json"),
        r#"{"modules": [{"id": "inner", "position": [0, 0, 0], "size": [1, 1, 1]}]}"#,
    )
    .unwrap();
    let mut loader = FsModuleLoader::new(dir.path());

    let mut controller = controller();
    let ray = module_ray(&controller, "main", "remote");
    let request = controller
        .handle_input(InputEvent::DoubleClick(ray))
        .unwrap()
        .expect("Missing module should request a load");
    assert_eq!(request.module_id(), Id::new("remote"));

    assert!(controller.fulfil(request, &mut loader).unwrap());
    assert_eq!(current_scope(&controller).as_deref(), Some("main_remote"));
    assert!(controller.module_solid(Id::new("main_remote"), Id::new("inner")).is_some());
}

#[test]
fn test_superseded_load_is_ignored() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "remote");
    let first = controller.handle_input(InputEvent::DoubleClick(ray)).unwrap().unwrap();
    let second = controller.handle_input(InputEvent::DoubleClick(ray)).unwrap().unwrap();

    let data = json!({"modules": []});
    assert!(!controller.complete_load(first, Ok(data.clone())).unwrap());
    assert_eq!(current_scope(&controller).as_deref(), Some("main"));

    assert!(controller.complete_load(second, Ok(data)).unwrap());
    assert_eq!(current_scope(&controller).as_deref(), Some("main_remote"));
}

#[test]
fn test_failed_load_keeps_view() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "remote");
    let request = controller.handle_input(InputEvent::DoubleClick(ray)).unwrap().unwrap();

    let result = controller.complete_load(request, Err(TqcError::ModuleNotFound(Id::new("remote"))));
    assert!(matches!(result, Err(TqcError::ModuleNotFound(_))));
    assert_eq!(controller.surface().len(), 5);
    assert!(controller.surface().disposed().is_empty());
}

#[test]
fn test_reset_rebuilds_current_scope() {
    let mut controller = controller();
    let ray = module_ray(&controller, "main", "adder");
    controller.handle_input(InputEvent::PointerMove(ray)).unwrap();

    controller.reset().unwrap();
    assert_eq!(controller.surface().len(), 5);
    assert_eq!(controller.surface().disposed().len(), 5);
    assert!(controller.hovered().is_none());
    assert_eq!(controller.surface().description(), None);
    assert!(!controller.controls().back());
    assert_disposed_once(controller.surface());
}

#[test]
fn test_transformation_steps() {
    let mut controller = controller();

    assert!(controller.next_transformation().unwrap());
    assert_eq!(controller.surface().len(), 1);
    assert!(controller.module_solid(Id::new("step2"), Id::new("m2")).is_some());
    assert!(controller.controls().prev());
    assert_eq!(controller.controls().next(), None);
    assert!(!controller.next_transformation().unwrap());

    assert!(controller.prev_transformation().unwrap());
    assert_eq!(controller.surface().len(), 5);
    assert!(!controller.controls().prev());
    assert_eq!(controller.controls().next(), Some(Id::new("step2")));
    assert!(!controller.prev_transformation().unwrap());
    assert_disposed_once(controller.surface());
}

#[test]
fn test_transformation_to_missing_scope() {
    let document = CircuitDocument::from_value(json!({
        "modules": [{"id": "m", "position": [0, 0, 0], "size": [1, 1, 1]}],
        "transformations": {"next": "ghost"}
    }))
    .unwrap();
    let mut controller = SceneController::from_config(&AppConfig::default(), HeadlessSurface::new()).unwrap();
    controller.load(&document).unwrap();

    let result = controller.next_transformation();
    assert!(matches!(result, Err(TqcError::ModuleNotFound(id)) if id == Id::new("ghost")));
    assert_eq!(controller.surface().len(), 1);
    assert!(!controller.controls().prev());
}
