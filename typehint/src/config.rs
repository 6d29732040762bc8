//! Configuration management.
//!
//! This module handles loading factory settings from `typehint.toml`
//! files and building the configured [`TypeFactory`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, TypeResult};
use crate::factory::{DataclassTypeFactory, PydanticTypeFactory, TypeFactory};
use crate::version::PythonVersion;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "typehint.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type factory settings.
    pub types: FactoryConfig,
}

/// Which factory implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryKind {
    /// pydantic field types
    #[default]
    Pydantic,
    /// standard-library types for dataclasses
    Dataclass,
}

/// Type factory configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Target ecosystem.
    pub target: FactoryKind,

    /// Python version the output must run on.
    pub target_python_version: PythonVersion,

    /// Render constrained fields as `conint(...)`, `constr(...)`, etc.
    pub use_constrained_types: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            target: FactoryKind::default(),
            target_python_version: PythonVersion::default(),
            use_constrained_types: true,
        }
    }
}

impl FactoryConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target ecosystem.
    pub fn with_target(mut self, target: FactoryKind) -> Self {
        self.target = target;
        self
    }

    /// Set the target Python version.
    pub fn with_target_python_version(mut self, version: PythonVersion) -> Self {
        self.target_python_version = version;
        self
    }

    /// Set whether constrained types are emitted.
    pub fn with_constrained_types(mut self, enabled: bool) -> Self {
        self.use_constrained_types = enabled;
        self
    }

    /// Build the configured factory.
    pub fn build_factory(&self) -> Box<dyn TypeFactory> {
        match self.target {
            FactoryKind::Pydantic => Box::new(PydanticTypeFactory::from_config(self)),
            FactoryKind::Dataclass => Box::new(DataclassTypeFactory::from_config(self)),
        }
    }
}

/// Configuration loader.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// With no path, loads `typehint.toml` from the working directory and
    /// falls back to defaults when it does not exist. An explicit path
    /// must exist.
    pub fn load(path: Option<&Path>) -> TypeResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILENAME);
                if !default_path.exists() {
                    debug!("No {} found, using defaults", CONFIG_FILENAME);
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content, &config_path)
    }

    /// Parse configuration from TOML text. `origin` is only used for
    /// error messages.
    pub fn parse(content: &str, origin: &Path) -> TypeResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(origin.to_path_buf(), e.to_string()))?;
        debug!(
            target_kind = ?config.types.target,
            version = %config.types.target_python_version,
            "Loaded type configuration"
        );
        Ok(config)
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# typehint configuration file

[types]
# Output ecosystem (pydantic, dataclass)
target = "pydantic"

# Python version the generated code must run on (3.6, 3.7, 3.8, 3.9).
# 3.6 renders model references as quoted forward references.
target_python_version = "3.7"

# Render constrained fields as conint(...), confloat(...), constr(...)
use_constrained_types = true
"#
    }
}
