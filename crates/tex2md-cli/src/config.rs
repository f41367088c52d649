//! Configuration file support for the tex2md CLI
//!
//! Loads settings from a `_tex2md.toml` file found next to the input.
//! Command-line flags take precedence over the config file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_tex2md.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Batch conversion configuration
    #[serde(skip_serializing_if = "BatchConfig::is_empty")]
    pub batch: BatchConfig,
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// File extension for converted documents (default: "md")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.extension.is_none()
    }
}

/// Batch conversion configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BatchConfig {
    /// Descend into subdirectories (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
    /// Number of parallel jobs (default: number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl BatchConfig {
    fn is_empty(&self) -> bool {
        self.recursive.is_none() && self.jobs.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_tex2md.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.output.extension.is_none());
        assert!(config.batch.recursive.is_none());
    }

    #[test]
    fn test_parse_output_section() {
        let config: Config = toml::from_str(
            r#"
            [output]
            extension = "markdown"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.extension, Some("markdown".to_string()));
    }

    #[test]
    fn test_parse_batch_section() {
        let config: Config = toml::from_str(
            r#"
            [batch]
            recursive = true
            jobs = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.batch.recursive, Some(true));
        assert_eq!(config.batch.jobs, Some(4));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [output]
            extension = "md"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.extension, Some("md".to_string()));
        assert!(config.batch.recursive.is_none());
        assert!(config.batch.jobs.is_none());
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("OutputConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config {
            output: OutputConfig {
                extension: Some("md".to_string()),
            },
            batch: BatchConfig {
                recursive: Some(true),
                jobs: Some(2),
            },
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.output.extension, parsed.output.extension);
        assert_eq!(config.batch.jobs, parsed.batch.jobs);
    }
}
