//! File discovery for batch runs.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Predicates for selecting the documents under a content directory.
#[derive(Debug, Default, Clone)]
pub struct FileMatcher {
    extensions: Vec<String>,
    include_globs: Vec<String>,
    exclude_globs: Vec<String>,
}

impl FileMatcher {
    /// Creates a new file matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches files with the given extension (without dot, case-sensitive).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Includes files matching the glob pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_globs.push(pattern.into());
        self
    }

    /// Excludes files matching the glob pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Collects matching files under `root`, sorted by path.
    ///
    /// Globs are matched against the path relative to `root`.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let include_set = build_glob_set(&self.include_globs)?;
        let exclude_set = build_glob_set(&self.exclude_globs)?;

        let mut matched = Vec::new();

        for entry in WalkDir::new(root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if !self.extensions.is_empty() {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if !self.extensions.iter().any(|e| e == ext) {
                    continue;
                }
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path);

            if !self.include_globs.is_empty() && !include_set.is_match(rel_path) {
                continue;
            }

            if !self.exclude_globs.is_empty() && exclude_set.is_match(rel_path) {
                continue;
            }

            matched.push(path.to_path_buf());
        }

        // Component-wise ordering keeps console output stable across runs.
        matched.sort();
        Ok(matched)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
