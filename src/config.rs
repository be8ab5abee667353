//! Project configuration for restyle runs.
//!
//! Looked up as `restyle.yaml`, `restyle.yml` or `restyle.json` in the project
//! root. Every field has a default, so an absent file is equivalent to:
//!
//! ```yaml
//! content_dir: posts
//! extension: html
//! include: []
//! exclude: []
//! ```

use crate::error::{RestyleError, Result};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["restyle.yaml", "restyle.yml", "restyle.json"];

/// Settings for the tree walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestyleConfig {
    /// Directory (relative to the project root) holding the articles.
    pub content_dir: PathBuf,

    /// File extension of article pages, without the dot.
    pub extension: String,

    /// Globs, relative to the content directory, to restrict to. Empty means every file.
    pub include: Vec<String>,

    /// Globs, relative to the content directory, to skip.
    pub exclude: Vec<String>,

    /// Replaces the built-in rule table; relative paths resolve against the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

impl Default for RestyleConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("posts"),
            extension: "html".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            rules_file: None,
        }
    }
}

impl RestyleConfig {
    /// Loads the first config file found in `root`, or the defaults.
    pub fn discover(root: &Path) -> Result<Self> {
        for name in CONFIG_FILES {
            let path = root.join(name);
            if path.is_file() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Loads a config file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RestyleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file {}: {}", path.display(), e),
            ))
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(|e| {
                RestyleError::InvalidConfig(format!("Failed to parse JSON config: {}", e))
            })
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                RestyleError::InvalidConfig(format!("Failed to parse YAML config: {}", e))
            })
        }
    }

    /// The rule table this config selects.
    pub fn rule_set(&self, root: &Path) -> Result<RuleSet> {
        match &self.rules_file {
            Some(file) => RuleSet::load(root.join(file)),
            None => Ok(RuleSet::article_defaults()),
        }
    }
}
