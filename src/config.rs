use std::path::Path;

use serde::Deserialize;

use crate::emphasis::ColorMode;

/// Configuration file name, looked up in the project root.
pub const CONFIG_FILE: &str = "bundle-diagnostics.toml";

/// Configuration loaded from `bundle-diagnostics.toml` at the project root.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Default color mode when `--color` is not given.
    pub color: Option<ColorMode>,
    /// Extra regex patterns for module identifiers hidden from import traces
    /// (in addition to the built-in framework loaders).
    pub hidden_loaders: Option<Vec<String>>,
    /// Lines of context shown around the failing line in code frames.
    pub context_lines: Option<u32>,
}

impl DiagnosticsConfig {
    /// Load configuration from `bundle-diagnostics.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("failed to parse {CONFIG_FILE}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }
        }
    }
}
