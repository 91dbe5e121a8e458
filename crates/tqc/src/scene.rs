//! Scene and navigation.
//!
//! [`SceneController`] owns the solids shown on a [`RenderSurface`] and the
//! navigation state around them:
//!
//! - **Render**: build a scope, move its lowest solid corner to the origin,
//!   add its solids and frame the camera.
//! - **Rerender**: dispose every shown solid, then render another scope.
//!   Used when entering a module and for the back and reset commands.
//! - **Add-render**: append a scope to the current view, reusing the
//!   current origin offset. Used when a module is expanded in place.
//! - **Transformations**: step through scopes chained by
//!   `transformations.next` without leaving the document.
//!
//! Pointer input is hit-tested through the surface and dispatched to the
//! handlers in the controller's [`InputBindings`].

mod camera;
mod controller;
mod headless;
mod history;
mod hover;
mod input;
mod loader;
mod snapshot;
mod surface;

pub use camera::Camera;
pub use controller::{Controls, SceneController, VisibleSolid};
pub use headless::{DescriptionEvent, DisplayedSolid, HeadlessSurface, aim_at};
pub use history::{ScopeEntry, TransformationHistory};
pub use hover::HoverTarget;
pub use input::{EventKind, Handler, InputBindings, InputEvent};
pub use loader::{FsModuleLoader, LoadAction, LoadRequest, LoadToken, ModuleLoader};
pub use snapshot::{SceneSnapshot, SnapshotSolid};
pub use surface::{Ray, RenderSurface, SolidHandle};
