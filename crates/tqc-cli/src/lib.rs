//! CLI logic for the TQC circuit viewer.
//!
//! The CLI renders a circuit document off-screen, optionally drills into or
//! expands modules, and writes the resulting scene as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use tqc::{
    TqcError, Viewer,
    identifier::Id,
    scene::{FsModuleLoader, HeadlessSurface, ModuleLoader, SceneController},
};

/// A scripted navigation step.
#[derive(Debug, Clone, Copy)]
enum Step {
    Enter,
    Expand,
}

/// Run the TQC CLI application
///
/// This function renders the input document, applies the `--enter` and
/// `--expand` steps in order and writes the scene to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TqcError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and scope building errors
/// - Modules that are not shown or cannot be loaded
/// - Export errors
pub fn run(args: &Args) -> Result<(), TqcError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing circuit"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let viewer = Viewer::new(app_config);
    let document = viewer.parse(&source)?;
    let mut controller = viewer.controller(HeadlessSurface::new(), &document)?;

    let samples_dir = args
        .samples_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| viewer.config().scene().samples_dir().to_path_buf());
    let mut loader = FsModuleLoader::new(samples_dir);

    let steps = args
        .enter
        .iter()
        .map(|module| (Step::Enter, module))
        .chain(args.expand.iter().map(|module| (Step::Expand, module)));
    for (step, module) in steps {
        navigate(&mut controller, &mut loader, step, Id::new(module))?;
    }

    controller.snapshot().write_json(Path::new(&args.output))?;

    info!(output_file = args.output; "Scene exported successfully");

    Ok(())
}

/// Applies one step to the first shown module with id `module_id`.
fn navigate(
    controller: &mut SceneController<HeadlessSurface>,
    loader: &mut impl ModuleLoader,
    step: Step,
    module_id: Id,
) -> Result<(), TqcError> {
    let scope_id = controller
        .visible()
        .iter()
        .find(|visible| {
            let owner = visible.solid().owner();
            owner.is_module() && owner.id() == module_id
        })
        .map(|visible| visible.scope_id())
        .ok_or(TqcError::ModuleNotFound(module_id))?;
    debug!(step:? = step, scope_id:% = scope_id, module_id:% = module_id; "Navigating");

    let request = match step {
        Step::Enter => controller.enter_module(scope_id, module_id)?,
        Step::Expand => controller.expand_module(scope_id, module_id)?,
    };
    if let Some(request) = request {
        controller.fulfil(request, loader)?;
    }
    Ok(())
}
