//! Text-based transformations using regex or literal replacement.

use crate::error::{RestyleError, Result};
use crate::rules::{Rule, RuleKind};
use regex::Regex;

/// A compiled rule: replaces every non-overlapping match in a document.
pub struct TextTransform {
    name: String,
    kind: TextTransformKind,
}

enum TextTransformKind {
    Replace { pattern: Regex, replacement: String },
    ReplaceLiteral { needle: String, replacement: String },
}

impl TextTransform {
    /// Compiles a rule, rejecting matchers that could match empty text.
    pub fn from_rule(rule: &Rule) -> Result<Self> {
        let invalid = |message: String| RestyleError::InvalidRule {
            name: rule.name.clone(),
            message,
        };

        let kind = match rule.kind {
            RuleKind::Literal => {
                if rule.pattern.is_empty() {
                    return Err(invalid("literal text is empty".into()));
                }
                TextTransformKind::ReplaceLiteral {
                    needle: rule.pattern.clone(),
                    replacement: rule.replacement.clone(),
                }
            }
            RuleKind::Pattern => {
                let pattern = Regex::new(&rule.pattern).map_err(|e| invalid(e.to_string()))?;
                if pattern.is_match("") {
                    return Err(invalid("pattern matches empty text".into()));
                }
                TextTransformKind::Replace {
                    pattern,
                    replacement: rule.replacement.clone(),
                }
            }
        };

        Ok(Self {
            name: rule.name.clone(),
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Counts the non-overlapping matches in `source`.
    pub fn count_matches(&self, source: &str) -> usize {
        match &self.kind {
            TextTransformKind::Replace { pattern, .. } => pattern.find_iter(source).count(),
            TextTransformKind::ReplaceLiteral { needle, .. } => source.matches(needle.as_str()).count(),
        }
    }

    /// Replaces every non-overlapping match in `source`.
    pub fn apply(&self, source: &str) -> String {
        match &self.kind {
            TextTransformKind::Replace { pattern, replacement } => {
                pattern.replace_all(source, replacement.as_str()).into_owned()
            }
            TextTransformKind::ReplaceLiteral { needle, replacement } => {
                source.replace(needle.as_str(), replacement)
            }
        }
    }

    pub fn describe(&self) -> String {
        match &self.kind {
            TextTransformKind::Replace { pattern, replacement } => {
                format!("Replace pattern '{}' with '{}'", pattern.as_str(), replacement)
            }
            TextTransformKind::ReplaceLiteral { needle, replacement } => {
                format!("Replace literal '{}' with '{}'", needle, replacement)
            }
        }
    }
}
