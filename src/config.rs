//! Configuration for the viewer pipeline

use serde::Deserialize;

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
    /// Display output configuration
    pub view: ViewConfig,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Emit pipeline lifecycle events to the diagnostic sink
    pub enabled: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Display output configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    /// Serialize the document compactly instead of pretty-printed
    pub compact: bool,
}

impl Config {
    /// Parse configuration from a JSON value.
    ///
    /// Missing or invalid options fall back to defaults.
    pub fn from_json(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }
}
