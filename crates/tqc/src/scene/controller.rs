use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, error, info, trace, warn};
use serde::Serialize;
use serde_json::Value;

use tqc_core::{
    color::Color,
    draw::{Palette, Solid, SolidOwner},
    geometry::{Axes, Pos},
    identifier::Id,
    semantic::{Circuit, CircuitSolids},
};
use tqc_parser::{BuildConfig, CircuitCreator, CircuitDocument, Rotation, next_transformation, scope_data};

use super::{
    Camera, Handler, HoverTarget, InputBindings, InputEvent, LoadAction, LoadRequest, LoadToken,
    ModuleLoader,
    RenderSurface, SceneSnapshot, ScopeEntry, SolidHandle, TransformationHistory,
    hover::HoverState,
};
use crate::TqcError;

/// The scope id of a document's root circuit.
const ROOT_SCOPE: &str = "main";

/// A solid currently shown on the surface.
#[derive(Debug, Clone)]
pub struct VisibleSolid {
    handle: SolidHandle,
    scope_id: Id,
    solid: Solid,
    color: Color,
}

impl VisibleSolid {
    pub fn handle(&self) -> SolidHandle {
        self.handle
    }

    /// The scope whose build produced this solid.
    pub fn scope_id(&self) -> Id {
        self.scope_id
    }

    /// The solid as added to the surface, after origin normalization.
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// The current display color.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Availability of the navigation commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Controls {
    reset: bool,
    back: bool,
    next: Option<Id>,
    prev: bool,
}

impl Controls {
    /// Re-render the current scope.
    pub fn reset(&self) -> bool {
        self.reset
    }

    /// Re-render the previously rendered scope.
    pub fn back(&self) -> bool {
        self.back
    }

    /// The scope `next_transformation` would step to.
    pub fn next(&self) -> Option<Id> {
        self.next
    }

    pub fn prev(&self) -> bool {
        self.prev
    }
}

/// The element a pointer event hit.
#[derive(Debug, Clone)]
struct Hit {
    handle: SolidHandle,
    scope_id: Id,
    owner: SolidOwner,
}

/// Drives a [`RenderSurface`] through circuit scopes.
///
/// # Examples
///
/// ```
/// # use tqc::{config::AppConfig, scene::{HeadlessSurface, SceneController}};
/// # use tqc_parser::CircuitDocument;
/// let document = CircuitDocument::parse(
///     r#"{"logical_qubits": [{"id": "q0", "type": "rough", "blocks": [[[0, 0, 0], [3, 0, 0]]]}]}"#,
/// )
/// .unwrap();
///
/// let mut controller = SceneController::from_config(&AppConfig::default(), HeadlessSurface::new()).unwrap();
/// controller.load(&document).unwrap();
/// assert_eq!(controller.surface().len(), 3);
/// ```
#[derive(Debug)]
pub struct SceneController<S> {
    surface: S,
    creator: CircuitCreator,
    palette: Palette,
    camera_factor: f32,

    document: Option<Rc<Value>>,
    visible: Vec<VisibleSolid>,
    offset: Pos,
    qubit_index: IndexMap<Id, IndexMap<Id, Vec<SolidHandle>>>,

    render_history: Vec<ScopeEntry>,
    circuits_data: IndexMap<Id, ScopeEntry>,
    transformations: Option<TransformationHistory>,

    controls: Controls,
    bindings: InputBindings,
    hover: HoverState,
    description_shown: bool,
    camera: Option<Camera>,
    navigation: u64,
}

impl<S: RenderSurface> SceneController<S> {
    pub fn new(surface: S, palette: Palette, build_config: BuildConfig) -> Self {
        Self {
            surface,
            creator: CircuitCreator::new(build_config),
            palette,
            camera_factor: 1.3,
            document: None,
            visible: Vec::new(),
            offset: Pos::ORIGIN,
            qubit_index: IndexMap::new(),
            render_history: Vec::new(),
            circuits_data: IndexMap::new(),
            transformations: None,
            controls: Controls::default(),
            bindings: InputBindings::default(),
            hover: HoverState::default(),
            description_shown: false,
            camera: None,
            navigation: 0,
        }
    }

    /// Creates a controller configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Config`] if a configured color is invalid.
    pub fn from_config(config: &crate::config::AppConfig, surface: S) -> Result<Self, TqcError> {
        Ok(Self::new(surface, config.palette()?, config.build_config())
            .with_camera_factor(config.scene().camera_distance_factor()))
    }

    pub fn with_camera_factor(mut self, camera_factor: f32) -> Self {
        self.camera_factor = camera_factor;
        self
    }

    /// Shows a new document, starting over with its root scope.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Build`] if the root scope is invalid. The
    /// previous view is kept in that case.
    pub fn load(&mut self, document: &CircuitDocument) -> Result<(), TqcError> {
        let scope_id = Id::new(ROOT_SCOPE);
        let data = Rc::clone(document.root());
        let circuit = self.build(&data, Pos::ORIGIN, Rotation::IDENTITY, scope_id)?;

        info!(scope_id:% = scope_id; "Loading circuit document");
        self.remove_all_solids();
        self.hide_description();
        self.circuits_data.clear();
        self.render_history.clear();
        self.transformations = None;
        self.document = None;
        self.controls = Controls::default();

        let entry = ScopeEntry::new(data, Pos::ORIGIN, Rotation::IDENTITY, scope_id);
        self.commit_render(entry, &circuit, true);
        Ok(())
    }

    /// Builds a scope and adds it to the view as the newest render.
    ///
    /// The scope is shifted so that its lowest solid position is the origin.
    /// The first rendered data becomes the document nested modules and
    /// transformations are looked up in.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Build`] if the scope is invalid; nothing changes.
    pub fn render(
        &mut self,
        data: Rc<Value>,
        base: Pos,
        rotation: Rotation,
        scope_id: Id,
        set_camera: bool,
    ) -> Result<(), TqcError> {
        let circuit = self.build(&data, base, rotation, scope_id)?;
        self.commit_render(ScopeEntry::new(data, base, rotation, scope_id), &circuit, set_camera);
        Ok(())
    }

    /// Replaces the whole view with a scope.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Build`] if the scope is invalid; the current view
    /// is kept.
    pub fn rerender(
        &mut self,
        data: Rc<Value>,
        base: Pos,
        rotation: Rotation,
        scope_id: Id,
    ) -> Result<(), TqcError> {
        let circuit = self.build(&data, base, rotation, scope_id)?;
        self.replace(ScopeEntry::new(data, base, rotation, scope_id), &circuit);
        Ok(())
    }

    /// Appends a scope to the current view without clearing it.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Build`] if the scope is invalid; nothing changes.
    pub fn addrender(
        &mut self,
        data: Rc<Value>,
        base: Pos,
        rotation: Rotation,
        scope_id: Id,
    ) -> Result<(), TqcError> {
        let circuit = self.build(&data, base, rotation, scope_id)?;
        self.commit_add(ScopeEntry::new(data, base, rotation, scope_id), &circuit);
        Ok(())
    }

    /// Disposes the first shown solid of module `module_id` in `scope_id`.
    ///
    /// Returns false if no such solid is shown.
    pub fn remove_module_solid(&mut self, scope_id: Id, module_id: Id) -> bool {
        let position = self.visible.iter().position(|visible| {
            visible.scope_id == scope_id
                && visible.solid.owner().is_module()
                && visible.solid.owner().id() == module_id
        });
        let Some(position) = position else {
            debug!(scope_id:% = scope_id, module_id:% = module_id; "No module solid to remove");
            return false;
        };

        let visible = self.visible.remove(position);
        self.surface.remove(visible.handle);
        debug!(scope_id:% = scope_id, module_id:% = module_id; "Removed module solid");
        true
    }

    /// Disposes every shown solid.
    pub fn remove_all_solids(&mut self) {
        let count = self.visible.len();
        for visible in self.visible.drain(..) {
            self.surface.remove(visible.handle);
        }
        self.qubit_index.clear();
        self.hover = HoverState::default();
        debug!(count = count; "Removed all solids");
    }

    /// The most recently rendered scope.
    pub fn current_data(&self) -> Option<&ScopeEntry> {
        self.render_history.last()
    }

    /// The descriptor a shown scope was built from.
    pub fn circuits_data(&self, scope_id: Id) -> Option<&ScopeEntry> {
        self.circuits_data.get(&scope_id)
    }

    /// Re-renders the current scope from scratch.
    pub fn reset(&mut self) -> Result<(), TqcError> {
        let Some(entry) = self.render_history.pop() else {
            return Ok(());
        };
        info!(scope_id:% = entry.scope_id(); "Resetting view");
        self.rerender_entry(entry.clone()).inspect_err(|_| self.render_history.push(entry))
    }

    /// Re-renders the scope rendered before the current one.
    ///
    /// Returns false if there is no previous scope.
    pub fn back(&mut self) -> Result<bool, TqcError> {
        if !self.controls.back || self.render_history.len() < 2 {
            return Ok(false);
        }
        let (Some(current), Some(previous)) = (self.render_history.pop(), self.render_history.pop())
        else {
            return Ok(false);
        };

        info!(from:% = current.scope_id(), to:% = previous.scope_id(); "Going back");
        match self.rerender_entry(previous.clone()) {
            Ok(()) => Ok(true),
            Err(err) => {
                self.render_history.push(previous);
                self.render_history.push(current);
                Err(err)
            }
        }
    }

    /// Steps forward to the scope named by the current `transformations.next`.
    ///
    /// Returns false if no forward step is available.
    pub fn next_transformation(&mut self) -> Result<bool, TqcError> {
        let Some(next) = self.controls.next else {
            return Ok(false);
        };
        let data = self.transformation_data(next)?;
        let circuit = self.build(&data, Pos::ORIGIN, Rotation::IDENTITY, next)?;

        info!(scope_id:% = next; "Stepping to next transformation");
        if let Some(history) = self.transformations.as_mut() {
            history.push(next);
        }
        self.transform(data, next, &circuit);
        Ok(true)
    }

    /// Steps back to the previous transformation.
    ///
    /// Returns false if no backward step is available.
    pub fn prev_transformation(&mut self) -> Result<bool, TqcError> {
        let previous = self
            .transformations
            .as_ref()
            .and_then(TransformationHistory::previous);
        let Some(previous) = previous.filter(|_| self.controls.prev) else {
            return Ok(false);
        };
        let data = self.transformation_data(previous)?;
        let circuit = self.build(&data, Pos::ORIGIN, Rotation::IDENTITY, previous)?;

        info!(scope_id:% = previous; "Stepping to previous transformation");
        if let Some(history) = self.transformations.as_mut() {
            history.pop();
        }
        self.transform(data, previous, &circuit);
        Ok(true)
    }

    /// Hit-tests a pointer event and runs the handlers bound to it.
    ///
    /// Entering or expanding a module whose circuit is not in the loaded
    /// document returns a [`LoadRequest`] for the host to fulfil.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<Option<LoadRequest>, TqcError> {
        let handlers = self.bindings.handlers(event.kind());
        if handlers.is_empty() {
            trace!(event:? = event.kind(); "No handlers bound");
            return Ok(None);
        }

        let candidates: Vec<SolidHandle> = self.visible.iter().map(|visible| visible.handle).collect();
        let hit = self
            .surface
            .intersect(event.ray(), &candidates)
            .and_then(|handle| self.visible_solid(handle))
            .map(|visible| Hit {
                handle: visible.handle,
                scope_id: visible.scope_id,
                owner: visible.solid.owner().clone(),
            });

        let mut request = None;
        for handler in handlers {
            match handler {
                Handler::HoverQubit => self.hover_qubit(hit.as_ref()),
                Handler::HoverModule => self.hover_module(hit.as_ref()),
                Handler::EnterModule => {
                    if let Some(Hit {
                        scope_id,
                        owner: SolidOwner::Module { id, .. },
                        ..
                    }) = &hit
                    {
                        request = self.enter_module(*scope_id, *id)?;
                    }
                }
                Handler::ExpandModule => {
                    if let Some(Hit {
                        scope_id,
                        owner: SolidOwner::Module { id, .. },
                        ..
                    }) = &hit
                    {
                        request = self.expand_module(*scope_id, *id)?;
                    }
                }
            }
        }
        Ok(request)
    }

    /// Replaces the view with the nested circuit of a shown module.
    ///
    /// The nested scope is named `<scope_id>_<module_id>` and built with the
    /// module's `rotation`.
    pub fn enter_module(&mut self, scope_id: Id, module_id: Id) -> Result<Option<LoadRequest>, TqcError> {
        let payload = self.module_payload(scope_id, module_id)?;
        let rotation = module_rotation(scope_id, &payload)?;
        let nested_id = scope_id.create_nested(module_id);
        info!(scope_id:% = scope_id, module_id:% = module_id; "Entering module");

        match self.inline_module(module_id) {
            Some(data) => {
                self.rerender(data, Pos::ORIGIN, rotation, nested_id)?;
                Ok(None)
            }
            None => Ok(Some(self.request_load(
                module_id,
                LoadAction::Enter {
                    rotation,
                    scope_id: nested_id,
                },
            ))),
        }
    }

    /// Replaces a shown module's box with its nested circuit, in place.
    ///
    /// The nested scope is offset by the module's raw `position` plus the
    /// base of the scope it was shown in.
    pub fn expand_module(&mut self, scope_id: Id, module_id: Id) -> Result<Option<LoadRequest>, TqcError> {
        let payload = self.module_payload(scope_id, module_id)?;
        let rotation = module_rotation(scope_id, &payload)?;
        let Some(position) = raw_position(&payload) else {
            warn!(module_id:% = module_id; "Module has no usable position, not expanding");
            return Ok(None);
        };
        let parent_base = self
            .circuits_data(scope_id)
            .map_or(Pos::ORIGIN, ScopeEntry::base);
        let base = position.add(parent_base, Axes::ALL);
        let nested_id = scope_id.create_nested(module_id);
        info!(scope_id:% = scope_id, module_id:% = module_id, base:% = base; "Expanding module");

        match self.inline_module(module_id) {
            Some(data) => {
                self.expand(data, scope_id, module_id, base, rotation, nested_id)?;
                Ok(None)
            }
            None => Ok(Some(self.request_load(
                module_id,
                LoadAction::Expand {
                    parent_scope_id: scope_id,
                    base,
                    rotation,
                    scope_id: nested_id,
                },
            ))),
        }
    }

    /// Applies a finished module load.
    ///
    /// Returns false if the request was superseded by a later navigation.
    ///
    /// # Errors
    ///
    /// A failed load is logged and returned; the view is left unchanged.
    pub fn complete_load(
        &mut self,
        request: LoadRequest,
        result: Result<Value, TqcError>,
    ) -> Result<bool, TqcError> {
        let module_id = request.module_id();
        if request.token() != LoadToken::new(self.navigation) {
            warn!(module_id:% = module_id; "Ignoring superseded module load");
            return Ok(false);
        }

        let data = match result {
            Ok(data) => Rc::new(data),
            Err(err) => {
                error!(module_id:% = module_id, err:% = err; "Module not found");
                return Err(err);
            }
        };

        match *request.action() {
            LoadAction::Enter { rotation, scope_id } => {
                self.rerender(data, Pos::ORIGIN, rotation, scope_id)?;
            }
            LoadAction::Expand {
                parent_scope_id,
                base,
                rotation,
                scope_id,
            } => {
                self.expand(data, parent_scope_id, module_id, base, rotation, scope_id)?;
            }
        }
        Ok(true)
    }

    /// Resolves a request with `loader` and applies the result.
    pub fn fulfil(
        &mut self,
        request: LoadRequest,
        loader: &mut impl ModuleLoader,
    ) -> Result<bool, TqcError> {
        let result = loader.load(&request);
        self.complete_load(request, result)
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// The camera set by the last framing render.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Shown solids in the order they were added.
    pub fn visible(&self) -> &[VisibleSolid] {
        &self.visible
    }

    /// The shown solid of module `module_id` in `scope_id`.
    pub fn module_solid(&self, scope_id: Id, module_id: Id) -> Option<&VisibleSolid> {
        self.visible.iter().find(|visible| {
            visible.scope_id == scope_id
                && visible.solid.owner().is_module()
                && visible.solid.owner().id() == module_id
        })
    }

    /// Handles of the shown solids of logical qubit `qubit_id` in `scope_id`.
    pub fn qubit_solids(&self, scope_id: Id, qubit_id: Id) -> &[SolidHandle] {
        self.qubit_index
            .get(&scope_id)
            .and_then(|qubits| qubits.get(&qubit_id))
            .map_or(&[], Vec::as_slice)
    }

    /// The element currently highlighted by hovering, if any.
    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hover.module.target().or(self.hover.qubit.target())
    }

    /// Captures the current view for export.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::new(
            self.current_data().map(ScopeEntry::scope_id),
            self.camera,
            self.controls,
            &self.visible,
        )
    }

    fn build(&self, data: &Value, base: Pos, rotation: Rotation, scope_id: Id) -> Result<Circuit, TqcError> {
        self.creator
            .create(scope_data(data), base, rotation)
            .map_err(|err| {
                error!(scope_id:% = scope_id, err:% = err; "Failed to build scope");
                TqcError::Build { scope_id, err }
            })
    }

    fn rerender_entry(&mut self, entry: ScopeEntry) -> Result<(), TqcError> {
        let circuit = self.build(entry.data(), entry.base(), entry.rotation(), entry.scope_id())?;
        self.replace(entry, &circuit);
        Ok(())
    }

    fn replace(&mut self, entry: ScopeEntry, circuit: &Circuit) {
        self.hide_description();
        self.remove_all_solids();
        self.circuits_data.clear();
        self.commit_render(entry, circuit, true);
    }

    fn commit_render(&mut self, entry: ScopeEntry, circuit: &Circuit, set_camera: bool) {
        let scope_id = entry.scope_id();
        self.navigation += 1;
        self.adopt_document(&entry);
        self.update_transformation_controls(&entry);
        self.render_history.push(entry.clone());
        self.circuits_data.insert(scope_id, entry);

        let solids = circuit.create_solids(&self.palette);
        self.offset = min_position(solids.solids());
        let added = self.show(scope_id, solids);

        if set_camera {
            let positions = self.visible[self.visible.len() - added..]
                .iter()
                .map(|visible| visible.solid.position());
            let camera = Camera::frame(positions, self.camera_factor);
            self.surface.set_camera(&camera);
            self.camera = Some(camera);
        }

        self.rebind();
        self.controls.reset = true;
        self.controls.back = self.render_history.len() > 1;
        info!(
            scope_id:% = scope_id,
            solids = added,
            history = self.render_history.len();
            "Scope rendered"
        );
    }

    fn commit_add(&mut self, entry: ScopeEntry, circuit: &Circuit) {
        let scope_id = entry.scope_id();
        self.navigation += 1;
        self.adopt_document(&entry);
        self.update_transformation_controls(&entry);
        self.circuits_data.insert(scope_id, entry);

        let solids = circuit.create_solids(&self.palette);
        let added = self.show(scope_id, solids);
        self.rebind();
        info!(scope_id:% = scope_id, solids = added; "Scope added");
    }

    fn expand(
        &mut self,
        data: Rc<Value>,
        parent_scope_id: Id,
        module_id: Id,
        base: Pos,
        rotation: Rotation,
        scope_id: Id,
    ) -> Result<(), TqcError> {
        let circuit = self.build(&data, base, rotation, scope_id)?;
        self.remove_module_solid(parent_scope_id, module_id);
        self.commit_add(ScopeEntry::new(data, base, rotation, scope_id), &circuit);
        Ok(())
    }

    fn transform(&mut self, data: Rc<Value>, scope_id: Id, circuit: &Circuit) {
        self.remove_all_solids();
        self.commit_add(
            ScopeEntry::new(data, Pos::ORIGIN, Rotation::IDENTITY, scope_id),
            circuit,
        );
    }

    /// Adds solids moved by the current offset and indexes their qubits.
    ///
    /// Returns the number of solids added.
    fn show(&mut self, scope_id: Id, solids: CircuitSolids) -> usize {
        let (solids, qubit_index) = solids.into_parts();
        let mut handles = Vec::with_capacity(solids.len());
        for solid in solids {
            let solid = solid.translated_back(self.offset);
            let handle = self.surface.add(&solid);
            handles.push(handle);
            self.visible.push(VisibleSolid {
                handle,
                scope_id,
                color: solid.material().color(),
                solid,
            });
        }

        let index = qubit_index
            .into_iter()
            .map(|(qubit_id, positions)| {
                let qubit_handles = positions.into_iter().map(|position| handles[position]).collect();
                (qubit_id, qubit_handles)
            })
            .collect();
        self.qubit_index.insert(scope_id, index);
        handles.len()
    }

    fn adopt_document(&mut self, entry: &ScopeEntry) {
        if self.document.is_none() {
            self.document = Some(Rc::clone(entry.data()));
        }
        if self.transformations.is_none() {
            self.transformations = Some(TransformationHistory::new(
                entry.scope_id(),
                Rc::clone(entry.data()),
            ));
        }
    }

    fn update_transformation_controls(&mut self, entry: &ScopeEntry) {
        self.controls.next = next_transformation(scope_data(entry.data()));
        self.controls.prev = self
            .transformations
            .as_ref()
            .is_some_and(TransformationHistory::can_step_back);
    }

    fn transformation_data(&self, scope_id: Id) -> Result<Rc<Value>, TqcError> {
        self.transformations
            .as_ref()
            .and_then(|history| history.data(scope_id))
            .map(|data| Rc::new(data.clone()))
            .ok_or_else(|| {
                error!(scope_id:% = scope_id; "Transformation scope not found");
                TqcError::ModuleNotFound(scope_id)
            })
    }

    fn rebind(&mut self) {
        for (handle, color) in self.hover.qubit.take().into_iter().chain(self.hover.module.take()) {
            self.paint(handle, color);
        }
        self.bindings.rebind();
        debug!(generation = self.bindings.generation(); "Input rebound");
    }

    fn inline_module(&self, module_id: Id) -> Option<Rc<Value>> {
        self.document
            .as_ref()
            .and_then(|document| document.get(module_id.to_string()))
            .map(|data| Rc::new(data.clone()))
    }

    fn module_payload(&self, scope_id: Id, module_id: Id) -> Result<Rc<Value>, TqcError> {
        self.module_solid(scope_id, module_id)
            .and_then(|visible| visible.solid.owner().payload())
            .cloned()
            .ok_or(TqcError::ModuleNotFound(module_id))
    }

    fn request_load(&mut self, module_id: Id, action: LoadAction) -> LoadRequest {
        self.navigation += 1;
        info!(module_id:% = module_id; "Module circuit not in document, requesting load");
        LoadRequest::new(LoadToken::new(self.navigation), module_id, action)
    }

    fn visible_solid(&self, handle: SolidHandle) -> Option<&VisibleSolid> {
        self.visible.iter().find(|visible| visible.handle == handle)
    }

    fn paint(&mut self, handle: SolidHandle, color: Color) {
        if let Some(visible) = self.visible.iter_mut().find(|visible| visible.handle == handle) {
            visible.color = color;
            self.surface.set_color(handle, color);
        }
    }

    fn highlight(&mut self, handles: &[SolidHandle]) -> Vec<(SolidHandle, Color)> {
        let selected = self.palette.selected();
        let mut saved = Vec::with_capacity(handles.len());
        for &handle in handles {
            if let Some(visible) = self.visible_solid(handle) {
                saved.push((handle, visible.color));
                self.paint(handle, selected);
            }
        }
        saved
    }

    fn restore_qubit(&mut self) {
        for (handle, color) in self.hover.qubit.take() {
            self.paint(handle, color);
        }
    }

    fn restore_module(&mut self) {
        for (handle, color) in self.hover.module.take() {
            self.paint(handle, color);
        }
    }

    fn hover_qubit(&mut self, hit: Option<&Hit>) {
        let target = match hit {
            Some(Hit {
                scope_id,
                owner: SolidOwner::Qubit { id },
                ..
            }) => HoverTarget {
                scope_id: *scope_id,
                id: *id,
            },
            _ => return self.restore_qubit(),
        };
        if self.hover.qubit.is(target) {
            return;
        }

        self.restore_qubit();
        let handles = self.qubit_solids(target.scope_id, target.id).to_vec();
        let saved = self.highlight(&handles);
        self.hover.qubit.set(target, saved);
        info!(scope_id:% = target.scope_id, qubit_id:% = target.id; "Logical qubit hovered");
    }

    fn hover_module(&mut self, hit: Option<&Hit>) {
        let (target, handle, payload) = match hit {
            Some(Hit {
                handle,
                scope_id,
                owner: SolidOwner::Module { id, payload },
            }) => (
                HoverTarget {
                    scope_id: *scope_id,
                    id: *id,
                },
                *handle,
                payload,
            ),
            _ => {
                self.restore_module();
                self.hide_description();
                return;
            }
        };
        if self.hover.module.is(target) {
            return;
        }

        self.restore_module();
        self.hide_description();
        let saved = self.highlight(&[handle]);
        self.hover.module.set(target, saved);

        let text = payload
            .get("description")
            .and_then(Value::as_str)
            .map_or_else(|| target.id.to_string(), str::to_string);
        self.surface.show_description(&text);
        self.description_shown = true;
        info!(scope_id:% = target.scope_id, module_id:% = target.id; "Module hovered");
    }

    fn hide_description(&mut self) {
        if self.description_shown {
            self.surface.hide_description();
            self.description_shown = false;
        }
    }
}

/// Lowest position on every axis, seeded with the first solid.
fn min_position(solids: &[Solid]) -> Pos {
    solids
        .iter()
        .map(Solid::position)
        .reduce(Pos::component_min)
        .unwrap_or(Pos::ORIGIN)
}

fn module_rotation(scope_id: Id, payload: &Value) -> Result<Rotation, TqcError> {
    Rotation::from_value(payload.get("rotation")).map_err(|diag| TqcError::Build {
        scope_id,
        err: diag.into(),
    })
}

/// The module's lattice `position`, before any scope transform.
fn raw_position(payload: &Value) -> Option<Pos> {
    let items = payload.get("position")?.as_array()?;
    match items.as_slice() {
        [x, y, z] => Some(Pos::new(
            x.as_f64()? as f32,
            y.as_f64()? as f32,
            z.as_f64()? as f32,
        )),
        _ => None,
    }
}
