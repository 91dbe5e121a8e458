//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use tqc::{TqcError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TqcError {
    fn from(err: ConfigError) -> Self {
        TqcError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (tqc/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TqcError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("tqc/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "tqc", "tqc") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TqcError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    // Invalid lattice values and colors fail here, before any rendering
    config.palette()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
[lattice]
margin = 2.0

[style]
rough_color = "#ff8800"
overwrite_colors = false

[scene]
samples_dir = "circuits"
"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.lattice().margin(), 2.0);
        assert!(!config.style().overwrite_colors());
        assert_eq!(config.scene().samples_dir(), Path::new("circuits"));
        assert_eq!(config.scene().camera_distance_factor(), 1.3);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("/nonexistent/tqc.toml")).unwrap_err();
        assert!(matches!(err, TqcError::Config(message) if message.contains("Missing")));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[lattice\nmargin = ").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(TqcError::Config(_))));

        fs::write(&path, "[style]\nselected_color = \"nope\"").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(TqcError::Config(_))));

        fs::write(&path, "[lattice]\nmargin = -0.5").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(TqcError::Config(_))));

        fs::write(&path, "[lattice]\nscale = 0.0").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(TqcError::Config(_))));
    }
}
