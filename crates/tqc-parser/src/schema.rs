//! Raw circuit document types.
//!
//! Each entry of `logical_qubits` and `modules` is deserialized on its own
//! from the document tree, so that the raw entry can be kept as the element
//! payload and every problem can be reported with its path.
//!
//! Coordinates stay as raw [`Value`]s here; they are validated while
//! building so that a bad coordinate gets its own error code.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tqc_core::{color::Color, draw::Visual};

use crate::error::{Diagnostic, ErrorCode};

/// An element id, written either as a string or as an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdSpec {
    Text(String),
    Number(i64),
}

impl fmt::Display for IdSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdSpec::Text(text) => f.write_str(text),
            IdSpec::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One `logical_qubits` entry.
#[derive(Debug, Deserialize)]
pub struct QubitSpec {
    pub id: IdSpec,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub blocks: Vec<EdgeSpec>,
    #[serde(default)]
    pub injectors: Vec<EdgeSpec>,
    #[serde(default)]
    pub caps: Vec<EdgeSpec>,
}

/// A run of edges: either a bare vertex list or an object with optional
/// visual overrides. Both forms build an open chain.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EdgeSpec {
    Vertices(Vec<Value>),
    Chain {
        vertices: Vec<Value>,
        #[serde(default)]
        visual: Option<VisualSpec>,
    },
}

impl EdgeSpec {
    pub fn vertices(&self) -> &[Value] {
        match self {
            EdgeSpec::Vertices(vertices) | EdgeSpec::Chain { vertices, .. } => vertices,
        }
    }

    pub fn visual(&self) -> Option<&VisualSpec> {
        match self {
            EdgeSpec::Vertices(_) => None,
            EdgeSpec::Chain { visual, .. } => visual.as_ref(),
        }
    }
}

/// One `modules` entry.
#[derive(Debug, Deserialize)]
pub struct ModuleSpec {
    pub id: IdSpec,
    pub position: Value,
    pub size: Value,
    #[serde(default)]
    pub rotation: Option<Value>,
    #[serde(default)]
    pub visual: Option<VisualSpec>,
}

/// A color written as a CSS string or a packed `0xRRGGBB` integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Css(String),
    Packed(u32),
}

/// A `visual` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualSpec {
    #[serde(default)]
    pub color: Option<ColorSpec>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub opacity: Option<f32>,
}

impl VisualSpec {
    /// Converts to core visual overrides.
    pub fn to_visual(&self, path: &str) -> Result<Visual, Diagnostic> {
        let color = match &self.color {
            None => None,
            Some(ColorSpec::Css(css)) => Some(Color::new(css)),
            Some(ColorSpec::Packed(packed)) => Some(Color::from_packed_rgb(*packed)),
        }
        .transpose()
        .map_err(|err| {
            Diagnostic::error(format!("invalid visual at {path}"))
                .with_code(ErrorCode::E204)
                .with_help(err)
        })?;

        if let Some(opacity) = self.opacity.filter(|opacity| !(0.0..=1.0).contains(opacity)) {
            return Err(Diagnostic::error(format!("invalid visual at {path}"))
                .with_code(ErrorCode::E204)
                .with_help(format!("opacity must be between 0 and 1, found {opacity}")));
        }

        Ok(Visual::new()
            .with_color(color)
            .with_transparent(self.transparent)
            .with_opacity(self.opacity))
    }
}

/// Deserializes one document entry, reporting a schema mismatch with `path`.
pub fn entry<'a, T: Deserialize<'a>>(value: &'a Value, path: &str) -> Result<T, Diagnostic> {
    T::deserialize(value).map_err(|err| {
        Diagnostic::error(format!("unexpected shape at {path}"))
            .with_code(ErrorCode::E101)
            .with_help(err.to_string())
    })
}

/// Returns the array stored under `key`, treating a missing key or `null`
/// as empty.
pub fn list<'a>(scope: &'a Value, key: &str) -> Result<&'a [Value], Diagnostic> {
    match scope.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Diagnostic::error(format!("`{key}` must be an array"))
            .with_code(ErrorCode::E101)
            .with_help(format!("found {}", kind_name(other)))),
    }
}

/// Human-readable name of a JSON value's kind.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
