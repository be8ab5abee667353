//! Batch and single-file restyle runs.

use crate::config::RestyleConfig;
use crate::error::{RestyleError, Result};
use crate::matcher::FileMatcher;
use crate::report::{FileOutcome, FileStatus, RunMode, RunReport};
use crate::rules::RuleSet;
use crate::transform::{FileChange, Rewriter, rewrite_file};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A restyle run over a project's article pages.
///
/// Files are processed one at a time in sorted order. A failure on one
/// file is recorded in the report and the run moves on.
pub struct Restyle {
    root: PathBuf,
    content_dir: PathBuf,
    extension: String,
    include: Vec<String>,
    exclude: Vec<String>,
    rules: RuleSet,
    dry_run: bool,
}

impl Restyle {
    /// Creates a run rooted at the project directory, with default settings.
    pub fn in_project(root: impl Into<PathBuf>) -> Self {
        let defaults = RestyleConfig::default();
        Self {
            root: root.into(),
            content_dir: defaults.content_dir,
            extension: defaults.extension,
            include: defaults.include,
            exclude: defaults.exclude,
            rules: RuleSet::article_defaults(),
            dry_run: false,
        }
    }

    /// Creates a run configured from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &RestyleConfig) -> Result<Self> {
        let root = root.into();
        let rules = config.rule_set(&root)?;
        Ok(Self {
            root,
            content_dir: config.content_dir.clone(),
            extension: config.extension.clone(),
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            rules,
            dry_run: false,
        })
    }

    /// Sets the article directory, relative to the project root.
    pub fn content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    /// Sets the extension of candidate files.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    /// Restricts the run to files matching the glob (relative to the content directory).
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Skips files matching the glob (relative to the content directory).
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Replaces the rule table.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Enables preview mode: compute everything, write nothing.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// The project root that reported paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rewrites every matching file under the content directory.
    pub fn run_batch(&self) -> Result<RunReport> {
        self.run_batch_with(|_| {})
    }

    /// Like [`run_batch`](Self::run_batch), handing each rewritten file to `inspect`.
    pub fn run_batch_with<F>(&self, mut inspect: F) -> Result<RunReport>
    where
        F: FnMut(&FileChange),
    {
        let rewriter = self.rules.compile()?;
        let content_root = self.root.join(&self.content_dir);

        let mut matcher = FileMatcher::new().extension(&self.extension);
        for pattern in &self.include {
            matcher = matcher.include(pattern);
        }
        for pattern in &self.exclude {
            matcher = matcher.exclude(pattern);
        }
        let files = matcher.collect(&content_root)?;
        info!(
            files = files.len(),
            rules = rewriter.len(),
            dry_run = self.dry_run,
            "starting batch"
        );

        let mut report = RunReport::new(RunMode::Batch, self.dry_run);
        for path in files {
            let outcome = self.process(&path, &rewriter, &mut inspect);
            report.push(outcome);
        }

        info!(
            updated = report.updated(),
            failed = report.failed(),
            total = report.total(),
            "batch finished"
        );
        Ok(report)
    }

    /// Rewrites one file given relative to the project root.
    ///
    /// A missing file yields [`RestyleError::FileNotFound`] before anything is read or written.
    pub fn run_single(&self, relative: impl AsRef<Path>) -> Result<RunReport> {
        self.run_single_with(relative, |_| {})
    }

    /// Like [`run_single`](Self::run_single), handing the rewritten file to `inspect`.
    pub fn run_single_with<F>(&self, relative: impl AsRef<Path>, mut inspect: F) -> Result<RunReport>
    where
        F: FnMut(&FileChange),
    {
        let relative = relative.as_ref();
        let path = self.root.join(relative);
        if !path.is_file() {
            return Err(RestyleError::FileNotFound(relative.to_path_buf()));
        }

        let rewriter = self.rules.compile()?;
        let mut report = RunReport::new(RunMode::Single, self.dry_run);
        report.push(self.process(&path, &rewriter, &mut inspect));
        Ok(report)
    }

    fn process<F>(&self, path: &Path, rewriter: &Rewriter, inspect: &mut F) -> FileOutcome
    where
        F: FnMut(&FileChange),
    {
        let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

        let status = match rewrite_file(path, rewriter, self.dry_run) {
            Ok(change) if change.is_modified() => {
                inspect(&change);
                if self.dry_run {
                    FileStatus::WouldUpdate
                } else {
                    FileStatus::Updated
                }
            }
            Ok(_) => FileStatus::NoChanges,
            Err(e) => {
                warn!(path = %relative.display(), error = %e, "failed to restyle file");
                FileStatus::Failed(e.to_string())
            }
        };

        FileOutcome {
            path: relative,
            status,
        }
    }
}
