//! Configuration types for the circuit viewer.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as TOML files. Every field is optional; missing
//! fields fall back to the built-in defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LatticeConfig`] - Lattice margin and world scale.
//! - [`StyleConfig`] - Colors, transparency defaults and outline display.
//! - [`SceneConfig`] - Nested module lookup and camera framing.
//!
//! # Example
//!
//! ```
//! # use tqc::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.palette().is_ok());
//! assert_eq!(config.build_config().lattice().pitch(), 2.5);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use tqc_core::{color::Color, draw::Palette, semantic::Lattice};
use tqc_parser::BuildConfig;

use crate::TqcError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Lattice configuration section.
    #[serde(default)]
    lattice: LatticeConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Scene configuration section.
    #[serde(default)]
    scene: SceneConfig,
}

impl AppConfig {
    pub fn new(lattice: LatticeConfig, style: StyleConfig, scene: SceneConfig) -> Self {
        Self {
            lattice,
            style,
            scene,
        }
    }

    pub fn lattice(&self) -> &LatticeConfig {
        &self.lattice
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Builds the render palette from the style and lattice sections.
    ///
    /// # Errors
    ///
    /// Returns [`TqcError::Config`] if the lattice section is out of range or
    /// a configured color cannot be parsed.
    pub fn palette(&self) -> Result<Palette, TqcError> {
        self.lattice.validate()?;
        let style = &self.style;
        let mut palette = Palette::default()
            .with_scale(self.lattice.scale())
            .with_default_transparent(style.default_transparent)
            .with_default_opacity(style.default_opacity)
            .with_display_outlines(style.display_outlines);

        let colors: [(&Option<String>, fn(Palette, Color) -> Palette); 6] = [
            (&style.default_color, Palette::with_default_color),
            (&style.rough_color, Palette::with_rough),
            (&style.smooth_color, Palette::with_smooth),
            (&style.module_color, Palette::with_module),
            (&style.selected_color, Palette::with_selected),
            (&style.outline_color, Palette::with_outline),
        ];
        for (value, apply) in colors {
            if let Some(value) = value {
                let color = Color::new(value).map_err(TqcError::Config)?;
                palette = apply(palette, color);
            }
        }
        Ok(palette)
    }

    /// Builds the scope building settings.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::new(
            Lattice::new(self.lattice.margin()),
            self.style.overwrite_colors,
        )
    }
}

/// Lattice spacing and world scale.
#[derive(Debug, Clone, Deserialize)]
pub struct LatticeConfig {
    /// Gap between adjacent vertex cubes, in world units.
    #[serde(default = "default_margin")]
    margin: f32,

    /// Factor applied to every solid position and dimension.
    #[serde(default = "default_scale")]
    scale: f32,
}

impl LatticeConfig {
    pub fn new(margin: f32, scale: f32) -> Self {
        Self { margin, scale }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Checks that `margin` is finite and non-negative and `scale` is finite
    /// and positive.
    pub fn validate(&self) -> Result<(), TqcError> {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(TqcError::Config(format!(
                "lattice margin must be a finite non-negative number, found {}",
                self.margin
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TqcError::Config(format!(
                "lattice scale must be a finite positive number, found {}",
                self.scale
            )));
        }
        Ok(())
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self::new(default_margin(), default_scale())
    }
}

/// Visual styling of the scene.
///
/// Colors are CSS color strings. Unset colors keep the palette defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    default_color: Option<String>,

    #[serde(default)]
    default_transparent: bool,

    #[serde(default = "default_opacity")]
    default_opacity: f32,

    #[serde(default)]
    rough_color: Option<String>,

    #[serde(default)]
    smooth_color: Option<String>,

    #[serde(default)]
    module_color: Option<String>,

    /// Highlight color for hovered elements.
    #[serde(default)]
    selected_color: Option<String>,

    #[serde(default)]
    outline_color: Option<String>,

    #[serde(default = "enabled")]
    display_outlines: bool,

    /// Whether `visual` objects in circuit documents are honored.
    #[serde(default = "enabled")]
    overwrite_colors: bool,
}

impl StyleConfig {
    pub fn display_outlines(&self) -> bool {
        self.display_outlines
    }

    pub fn overwrite_colors(&self) -> bool {
        self.overwrite_colors
    }

    pub fn with_rough_color(mut self, color: impl Into<String>) -> Self {
        self.rough_color = Some(color.into());
        self
    }

    pub fn with_smooth_color(mut self, color: impl Into<String>) -> Self {
        self.smooth_color = Some(color.into());
        self
    }

    pub fn with_overwrite_colors(mut self, overwrite_colors: bool) -> Self {
        self.overwrite_colors = overwrite_colors;
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default_color: None,
            default_transparent: false,
            default_opacity: default_opacity(),
            rough_color: None,
            smooth_color: None,
            module_color: None,
            selected_color: None,
            outline_color: None,
            display_outlines: true,
            overwrite_colors: true,
        }
    }
}

/// Scene navigation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// Directory searched for `<module_id>.json` when a module is not
    /// stored in the loaded document.
    #[serde(default = "default_samples_dir")]
    samples_dir: PathBuf,

    /// How far the camera backs off from the framed circuit.
    #[serde(default = "default_camera_distance_factor")]
    camera_distance_factor: f32,
}

impl SceneConfig {
    pub fn new(samples_dir: impl Into<PathBuf>, camera_distance_factor: f32) -> Self {
        Self {
            samples_dir: samples_dir.into(),
            camera_distance_factor,
        }
    }

    pub fn samples_dir(&self) -> &Path {
        &self.samples_dir
    }

    pub fn camera_distance_factor(&self) -> f32 {
        self.camera_distance_factor
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new(default_samples_dir(), default_camera_distance_factor())
    }
}

fn default_margin() -> f32 {
    Lattice::STUB_MARGIN
}

fn default_scale() -> f32 {
    1.0
}

fn default_opacity() -> f32 {
    0.3
}

fn enabled() -> bool {
    true
}

fn default_samples_dir() -> PathBuf {
    PathBuf::from("samples")
}

fn default_camera_distance_factor() -> f32 {
    1.3
}
