//! Ordered rule tables mapping legacy inline markup to semantic markup.
//!
//! A [`RuleSet`] is plain data: every [`Rule`] carries a name, a matcher
//! (literal text or a regex) and a replacement. Rules run top to bottom,
//! so the declared order decides which rule sees a piece of text first.
//! A broad rule placed early can consume text a later, more specific rule
//! was written for.
//!
//! # Example YAML
//!
//! ```yaml
//! rules:
//!   - name: table
//!     pattern: '<table style="[^"]*">'
//!     replacement: '<table>'
//!   - name: article-container
//!     kind: literal
//!     pattern: '<article class="article-content container">'
//!     replacement: '<article class="article-content">'
//! ```

mod article;

use crate::error::{RestyleError, Result};
use crate::transform::Rewriter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a rule's `pattern` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Exact text, replaced verbatim.
    Literal,
    /// A regex; the replacement may reference groups as `$1` or `${1}`.
    #[default]
    Pattern,
}

/// A single legacy-to-semantic markup conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Short identifier used in logs and hit reports.
    pub name: String,
    #[serde(default)]
    pub kind: RuleKind,
    pub pattern: String,
    pub replacement: String,
}

impl Rule {
    /// Creates a regex rule.
    pub fn pattern(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Pattern,
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Creates a literal rule.
    pub fn literal(
        name: impl Into<String>,
        needle: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Literal,
            pattern: needle.into(),
            replacement: replacement.into(),
        }
    }

    /// Returns a description of the rule.
    pub fn describe(&self) -> String {
        match self.kind {
            RuleKind::Literal => format!(
                "{}: replace literal '{}' with '{}'",
                self.name, self.pattern, self.replacement
            ),
            RuleKind::Pattern => format!(
                "{}: replace pattern '{}' with '{}'",
                self.name, self.pattern, self.replacement
            ),
        }
    }
}

/// An ordered collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from rules in the given order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in table for cleaning blog article markup.
    pub fn article_defaults() -> Self {
        Self::new(article::rules())
    }

    /// Appends a rule at the end of the table.
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Exchanges the positions of two rules.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.rules.swap(a, b);
    }

    /// Returns the position of the rule with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates every rule and builds a [`Rewriter`].
    pub fn compile(&self) -> Result<Rewriter> {
        Rewriter::new(self)
    }

    /// Parses a rule table from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            RestyleError::InvalidConfig(format!("Failed to parse YAML rules: {}", e))
        })
    }

    /// Parses a rule table from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            RestyleError::InvalidConfig(format!("Failed to parse JSON rules: {}", e))
        })
    }

    /// Loads a rule table, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RestyleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read rules file {}: {}", path.display(), e),
            ))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(RestyleError::InvalidConfig(format!(
                "Unsupported rules file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Serializes the table to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
