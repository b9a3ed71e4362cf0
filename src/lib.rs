//! Artistry - backend for the "AI Artistry Unveiled" prompting tutorial
//!
//! This crate provides:
//! - Word-level prompt diff highlighting between successive iterations
//! - An iteration navigation state machine for the example gallery
//! - The static tutorial catalog (sections, examples, technique, resources)
//! - Quiz sessions and newsletter validation
//! - REST API and tutorial page for external integration

pub mod api;
pub mod content;
pub mod diff;
pub mod navigation;
pub mod newsletter;
pub mod quiz;
pub mod theme;

pub use content::{Catalog, Example, Iteration, IterationSequence, Prompt, Segment};
pub use diff::{highlight, highlight_prompt, strip_markup, DiffSummary, DiffToken};
pub use navigation::{IterationStore, IterationView};

use std::path::Path;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the tutorial server
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ArtistryConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Max log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Allow any origin to call the JSON API
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_bind_address() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_log_level() -> String { "info".to_string() }
fn default_cors_permissive() -> bool { true }

impl Default for ArtistryConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_level: default_log_level(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl ArtistryConfig {
    /// Parse a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file
    ///
    /// Returns `Ok(None)` when the file does not exist so callers can fall
    /// back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_toml(&contents).map(Some)
    }

    /// Parsed `log_level`, falling back to INFO for unknown names
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
