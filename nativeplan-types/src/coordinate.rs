use serde::{Deserialize, Serialize};
use std::fmt;

/// A `group:artifact[:version]` module coordinate.
///
/// Parsing is lenient and never fails: a coordinate with missing or oversized
/// segments is still representable so the resolver can report it against the
/// declaration that carried it. A `None` version means the version is managed
/// by a bill-of-materials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn parse(text: &str) -> Self {
        let mut parts = text.trim().splitn(3, ':');
        let group = parts.next().unwrap_or_default().to_string();
        let artifact = parts.next().unwrap_or_default().to_string();
        let version = parts.next().map(str::to_string);
        Self {
            group,
            artifact,
            version,
        }
    }

    /// `group:artifact`, the identity used for uniqueness and conflicts.
    pub fn identity(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    pub fn is_managed(&self) -> bool {
        self.version.is_none()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group, self.artifact, v),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}
