//! Target Python version, used as the rendering dialect.
//!
//! The version is chosen once per generation run and threaded into every
//! factory and every render call. Python 3.6 needs string-quoted forward
//! references for model names; later versions render bare names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Rendering dialect for generated type hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PythonVersion {
    /// Python 3.6: referenced model names render as `'Name'`.
    Py36,
    /// Python 3.7
    #[default]
    Py37,
    /// Python 3.8
    Py38,
    /// Python 3.9
    Py39,
}

impl PythonVersion {
    /// All supported versions, oldest first.
    pub const ALL: [PythonVersion; 4] = [
        PythonVersion::Py36,
        PythonVersion::Py37,
        PythonVersion::Py38,
        PythonVersion::Py39,
    ];

    /// Get the dotted version string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PythonVersion::Py36 => "3.6",
            PythonVersion::Py37 => "3.7",
            PythonVersion::Py38 => "3.8",
            PythonVersion::Py39 => "3.9",
        }
    }

    /// Check whether referenced names must be rendered as quoted forward
    /// references.
    pub fn defers_references(&self) -> bool {
        matches!(self, PythonVersion::Py36)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PythonVersion {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PythonVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == s.trim())
            .ok_or_else(|| TypeError::InvalidVersion(s.to_string()))
    }
}

impl Serialize for PythonVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PythonVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
