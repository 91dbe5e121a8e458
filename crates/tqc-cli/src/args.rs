//! Command-line argument definitions for the TQC CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, scripted navigation and logging verbosity.

use clap::Parser;

/// Command-line arguments for the TQC circuit viewer
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input circuit document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output scene file (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory nested module circuits are loaded from, overriding the configuration
    #[arg(long)]
    pub samples_dir: Option<String>,

    /// Module to drill into, in order; may be repeated
    #[arg(long, value_name = "MODULE_ID")]
    pub enter: Vec<String>,

    /// Module to expand in place after entering; may be repeated
    #[arg(long, value_name = "MODULE_ID")]
    pub expand: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
