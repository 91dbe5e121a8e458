//! TQC - A viewer for topological quantum circuits.
//!
//! Circuits are JSON documents describing logical qubits as defect lines on a
//! 3-D lattice, together with opaque modules that may contain nested
//! circuits. This crate turns documents into solids and drives a
//! [`scene::RenderSurface`] through them: drilling into modules, expanding
//! them in place, stepping through transformations and highlighting what the
//! pointer hovers.

pub mod config;
pub mod scene;

mod error;

pub use tqc_core::{color, draw, geometry, identifier, semantic};
pub use tqc_parser::CircuitDocument;

pub use error::TqcError;

use log::{debug, info, trace};

use config::AppConfig;
use scene::{HeadlessSurface, RenderSurface, SceneController, SceneSnapshot};

/// Builder for parsing circuit documents and setting up scenes.
///
/// # Examples
///
/// ```rust,no_run
/// use tqc::{Viewer, config::AppConfig};
///
/// let source = r#"{"main": {"modules": [{"id": "adder", "position": [0, 0, 0], "size": [2, 2, 2]}]}}"#;
///
/// let viewer = Viewer::new(AppConfig::default());
/// let document = viewer.parse(source).expect("Failed to parse");
///
/// // Render without a display and export the view
/// let snapshot = viewer.snapshot(&document).expect("Failed to render");
/// println!("{}", snapshot.to_json().expect("Failed to serialize"));
/// ```
#[derive(Debug, Default)]
pub struct Viewer {
    config: AppConfig,
}

impl Viewer {
    /// Create a new viewer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including lattice and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a circuit document and check that its root scope builds.
    ///
    /// # Errors
    ///
    /// Returns `TqcError::Parse` for malformed JSON or an invalid root scope.
    pub fn parse(&self, source: &str) -> Result<CircuitDocument, TqcError> {
        info!("Parsing circuit document");

        let (document, circuit) = tqc_parser::parse(source, self.config.build_config())
            .map_err(|err| TqcError::new_parse_error(err, source))?;

        debug!(
            logical_qubits = circuit.logical_qubits().len(),
            modules = circuit.modules().len();
            "Circuit document parsed"
        );
        trace!(circuit:?; "Parsed circuit");

        Ok(document)
    }

    /// Create a scene controller showing the root scope of `document`.
    ///
    /// # Errors
    ///
    /// Returns `TqcError::Config` for invalid style colors and
    /// `TqcError::Build` if the root scope fails to build.
    pub fn controller<S: RenderSurface>(
        &self,
        surface: S,
        document: &CircuitDocument,
    ) -> Result<SceneController<S>, TqcError> {
        let mut controller = SceneController::from_config(&self.config, surface)?;
        controller.load(document)?;
        Ok(controller)
    }

    /// Render the root scope of `document` off-screen and capture it.
    pub fn snapshot(&self, document: &CircuitDocument) -> Result<SceneSnapshot, TqcError> {
        let controller = self.controller(HeadlessSurface::new(), document)?;
        Ok(controller.snapshot())
    }
}
