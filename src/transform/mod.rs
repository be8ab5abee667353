//! Applies an ordered rule table to document text.

pub mod text;

pub use text::TextTransform;

use crate::error::Result;
use crate::rules::RuleSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of running the full rule table over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub text: String,
    pub changed: bool,
}

/// Number of matches a single rule replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub name: String,
    pub count: usize,
}

/// Compiled, ordered rule table.
pub struct Rewriter {
    transforms: Vec<TextTransform>,
}

impl Rewriter {
    /// Compiles every rule of the set, in order.
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let transforms = rules
            .iter()
            .map(TextTransform::from_rule)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { transforms })
    }

    /// Runs each rule once, top to bottom, replacing all matches.
    pub fn rewrite(&self, source: &str) -> RewriteResult {
        let mut current = source.to_string();
        for transform in &self.transforms {
            current = transform.apply(&current);
        }
        let changed = current != source;
        RewriteResult {
            text: current,
            changed,
        }
    }

    /// Like [`rewrite`](Self::rewrite), also reporting which rules fired.
    pub fn rewrite_traced(&self, source: &str) -> (RewriteResult, Vec<RuleHit>) {
        let mut current = source.to_string();
        let mut hits = Vec::new();

        for transform in &self.transforms {
            let count = transform.count_matches(&current);
            if count == 0 {
                continue;
            }
            debug!(rule = transform.name(), count, "rule matched");
            current = transform.apply(&current);
            hits.push(RuleHit {
                name: transform.name().to_string(),
                count,
            });
        }

        let changed = current != source;
        (
            RewriteResult {
                text: current,
                changed,
            },
            hits,
        )
    }

    /// True when a second pass over the rewritten text changes nothing.
    pub fn is_idempotent_on(&self, source: &str) -> bool {
        let first = self.rewrite(source);
        !self.rewrite(&first.text).changed
    }

    /// Returns descriptions of all rules in order.
    pub fn describe(&self) -> Vec<String> {
        self.transforms
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.describe()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Represents a rewrite of one file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
}

impl FileChange {
    /// Returns true if the content was modified.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Writes the transformed content to disk, replacing the whole file.
    pub fn apply(&self) -> Result<()> {
        if self.is_modified() {
            fs::write(&self.path, &self.transformed)?;
        }
        Ok(())
    }
}

/// Reads a UTF-8 file, rewrites it and persists the result unless `dry_run`.
pub fn rewrite_file(path: &Path, rewriter: &Rewriter, dry_run: bool) -> Result<FileChange> {
    let original = fs::read_to_string(path)?;
    let (result, hits) = rewriter.rewrite_traced(&original);
    debug!(path = %path.display(), rules = hits.len(), changed = result.changed, "rewrote file");

    let change = FileChange {
        path: path.to_path_buf(),
        original,
        transformed: result.text,
    };

    if !dry_run {
        change.apply()?;
    }
    Ok(change)
}
