//! Error types for the type model.
//!
//! Rendering never fails, so the only errors surfaced here come from
//! factories declining a classification, from dialect and classification
//! parsing, from the late reference-resolution pass, and from
//! configuration loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::factory::Classification;
use crate::version::PythonVersion;

/// Result type alias for type model operations.
pub type TypeResult<T> = Result<T, TypeError>;

/// Main error type for type model operations.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A factory has no mapping for this classification in its dialect.
    #[error("{factory} does not support '{classification}' for Python {version}")]
    UnsupportedClassification {
        classification: Classification,
        factory: &'static str,
        version: PythonVersion,
    },

    /// A target version string could not be parsed.
    #[error("Invalid target Python version '{0}' (expected one of 3.6, 3.7, 3.8, 3.9)")]
    InvalidVersion(String),

    /// A classification name could not be parsed.
    #[error("Unknown classification '{0}'")]
    InvalidClassification(String),

    /// Named types still unresolved after generation.
    #[error("Unresolved references: {}", .names.join(", "))]
    UnresolvedReference { names: Vec<String> },

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax or values.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TypeError {
    /// Create an unsupported classification error.
    pub fn unsupported(
        classification: Classification,
        factory: &'static str,
        version: PythonVersion,
    ) -> Self {
        Self::UnsupportedClassification {
            classification,
            factory,
            version,
        }
    }
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}
