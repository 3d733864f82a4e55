//! Rendering configuration for member lists.

use crate::errors::{MatcherError, MatcherResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Controls how collection matchers render lists of members in mismatch text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    /// Separator placed between rendered members.
    pub member_separator: String,
    /// Render at most this many members of a list, followed by `...`.
    ///
    /// Member counts are always reported in full.
    pub max_listed_members: Option<usize>,
}

impl DescribeConfig {
    /// Comma-separated, untruncated lists.
    pub fn standard() -> Self {
        Self {
            member_separator: ", ".into(),
            max_listed_members: None,
        }
    }

    /// Limit rendered lists to `max` members.
    pub fn truncated(max: usize) -> Self {
        Self {
            max_listed_members: Some(max),
            ..Self::standard()
        }
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> MatcherResult<Self> {
        toml::from_str(content).map_err(|e| MatcherError::Config {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file. A missing file yields the standard config.
    pub fn load(path: &Path) -> MatcherResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| MatcherError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        Self::from_toml_str(&content)
    }
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self::standard()
    }
}
