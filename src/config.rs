//! TOML configuration for the extraction CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::extract::ExtractOptions;

/// Top-level lpgx configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LpgxConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Include symbols outside the analyzed source set.
    #[serde(default)]
    pub include_external: bool,
    /// Compute Halstead metrics and fold them into the graph.
    #[serde(default = "default_halstead")]
    pub halstead: bool,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the emitted CyJSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_halstead() -> bool {
    true
}

fn default_pretty() -> bool {
    true
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            include_external: false,
            halstead: default_halstead(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl LpgxConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_external: self.extract.include_external,
            halstead: self.extract.halstead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LpgxConfig::default();
        assert!(!config.extract.include_external);
        assert!(config.extract.halstead);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LpgxConfig = toml::from_str("[extract]\ninclude_external = true\n").unwrap();
        assert!(config.extract.include_external);
        assert!(config.extract.halstead);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = LpgxConfig::load(Path::new("/nonexistent/lpgx.toml"));
        assert!(config.extract.halstead);
    }
}
