//! CLI argument definitions for the Inlet application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inlet — drop in text or voice and get it routed to the right pipeline.
#[derive(Parser, Debug)]
#[command(name = "inlet", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a piece of text or a URL into a processing intent.
    Classify {
        /// The text to classify. Read from stdin when omitted.
        text: Option<String>,

        /// Print the classification as JSON.
        #[arg(long = "json")]
        json: bool,
    },

    /// Clean a raw transcript through the five-stage pipeline.
    Clean {
        /// The text to clean. Read from stdin when omitted.
        text: Option<String>,
    },

    /// Run a voice capture session on the platform speech source.
    Capture,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > INLET_CONFIG env var > platform default
    /// (~/.inlet/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("INLET_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".inlet").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".inlet").join("config.toml");
    }
    PathBuf::from("config.toml")
}

// =============================================================================
// Tests
// =============================================================================
