//! Configuration for a generation run, with YAML file support.
//!
//! Every field has a default, so an empty document is a valid configuration.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # hashstamp configuration
//! version: 1
//! use_parallel: true
//!
//! normalize:
//!   keep_comments: false
//!
//! emit:
//!   root_module: "hash_stamps"
//!
//! source:
//!   crate_name: "my_crate"
//!   include_free_functions: true
//!   free_function_type: "functions"
//!   skip_tests: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

/// Top-level configuration of the fingerprinting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StampConfig {
    /// Configuration format version. Only `1` exists.
    pub version: u32,

    /// Fan per-unit normalization/hashing and per-type collision resolution
    /// out over the rayon thread pool. Output is identical either way.
    pub use_parallel: bool,

    pub normalize: NormalizeConfig,

    pub emit: EmitConfig,

    pub source: SourceConfig,
}

impl StampConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_keep_comments(mut self, keep_comments: bool) -> Self {
        self.normalize.keep_comments = keep_comments;
        self
    }

    pub fn with_root_module(mut self, root_module: impl Into<String>) -> Self {
        self.emit.root_module = root_module.into();
        self
    }

    pub fn with_crate_name(mut self, crate_name: impl Into<String>) -> Self {
        self.source.crate_name = crate_name.into();
        self
    }

    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        // An empty document deserializes to unit, not to a map.
        let config: StampConfig = if yaml.trim().is_empty() {
            StampConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version != 1 {
            return Err(ConfigLoadError::UnsupportedVersion(self.version));
        }
        self.emit.validate()?;
        self.source.validate()?;
        Ok(())
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            version: 1,
            use_parallel: true,
            normalize: NormalizeConfig::default(),
            emit: EmitConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

/// Body normalization options.
///
/// Changing any of these changes digests for otherwise identical code, so a
/// project should pick once and keep it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Treat comments as part of the body. Off by default: editing a comment
    /// does not change what the code does.
    pub keep_comments: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmitConfig {
    /// Name of the module wrapping the generated constants and lookup table.
    pub root_module: String,
}

impl EmitConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !is_plain_identifier(&self.root_module) {
            return Err(ConfigLoadError::Validation(format!(
                "emit.root_module `{}` is not a plain identifier",
                self.root_module
            )));
        }
        Ok(())
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            root_module: "hash_stamps".to_string(),
        }
    }
}

/// Options for the Rust source scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// First segment of every namespace the scanner reports.
    pub crate_name: String,

    /// Report functions outside any `impl` or `trait`.
    pub include_free_functions: bool,

    /// Type bucket that free functions are filed under.
    pub free_function_type: String,

    /// Ignore `#[cfg(test)]` modules and `#[test]` functions.
    pub skip_tests: bool,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.crate_name.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "source.crate_name must not be empty".to_string(),
            ));
        }
        if self.include_free_functions && !is_plain_identifier(&self.free_function_type) {
            return Err(ConfigLoadError::Validation(format!(
                "source.free_function_type `{}` is not a plain identifier",
                self.free_function_type
            )));
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            crate_name: "crate".to_string(),
            include_free_functions: true,
            free_function_type: "functions".to_string(),
            skip_tests: true,
        }
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StampConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.use_parallel);
        assert!(!config.normalize.keep_comments);
        assert_eq!(config.emit.root_module, "hash_stamps");
        assert_eq!(config.source.crate_name, "crate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
version: 1
use_parallel: false
normalize:
  keep_comments: true
emit:
  root_module: "stamps"
source:
  crate_name: "demo"
"#;
        let config = StampConfig::from_yaml(yaml).expect("config parses");
        assert!(!config.use_parallel);
        assert!(config.normalize.keep_comments);
        assert_eq!(config.emit.root_module, "stamps");
        assert_eq!(config.source.crate_name, "demo");
        // untouched fields keep their defaults
        assert_eq!(config.source.free_function_type, "functions");
        assert!(config.source.skip_tests);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = StampConfig::from_yaml("  \n").expect("empty config");
        assert_eq!(config, StampConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = StampConfig::from_yaml("version: 2");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_invalid_root_module() {
        let result = StampConfig::from_yaml("emit:\n  root_module: \"hash stamps\"");
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_blank_crate_name() {
        let result = StampConfig::from_yaml("source:\n  crate_name: \"\"");
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));
    }

    #[test]
    fn test_builder_setters() {
        let config = StampConfig::new()
            .with_parallel(false)
            .with_keep_comments(true)
            .with_root_module("stamps")
            .with_crate_name("app");
        assert!(!config.use_parallel);
        assert!(config.normalize.keep_comments);
        assert_eq!(config.emit.root_module, "stamps");
        assert_eq!(config.source.crate_name, "app");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hashstamp.yaml");
        fs::write(&path, "source:\n  crate_name: \"from_file\"\n").expect("write config");

        let config = StampConfig::from_file(&path).expect("load config");
        assert_eq!(config.source.crate_name, "from_file");

        let missing = StampConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigLoadError::FileRead(_))));
    }
}
