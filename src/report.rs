//! Per-file outcomes and the console report of a run.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Banner printed before any per-file line.
pub const HEADER: &str = "Cleaning inline styles from blog posts...";

const RULE_WIDTH: usize = 50;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Updated,
    WouldUpdate,
    NoChanges,
    Failed(String),
}

impl FileStatus {
    pub fn is_update(&self) -> bool {
        matches!(self, FileStatus::Updated | FileStatus::WouldUpdate)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Updated => write!(f, "Updated"),
            FileStatus::WouldUpdate => write!(f, "Would update"),
            FileStatus::NoChanges => write!(f, "No changes"),
            FileStatus::Failed(_) => write!(f, "Error"),
        }
    }
}

/// A file's status, keyed by its path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward slashes keep output identical across platforms.
        let path = self.path.to_string_lossy().replace('\\', "/");
        match &self.status {
            FileStatus::Failed(message) => write!(f, "  Error: {path}: {message}"),
            status => write!(f, "  {status}: {path}"),
        }
    }
}

/// Whether the run walked a tree or handled one explicit file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Batch,
    Single,
}

/// Results of a run, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub entries: Vec<FileOutcome>,
    pub dry_run: bool,
    pub mode: RunMode,
}

impl RunReport {
    pub fn new(mode: RunMode, dry_run: bool) -> Self {
        Self {
            entries: Vec::new(),
            dry_run,
            mode,
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.entries.push(outcome);
    }

    /// Files that were (or would be) rewritten.
    pub fn updated(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_update()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, FileStatus::Failed(_)))
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// The closing tally, e.g. `Would update 3/10 posts`.
    pub fn summary_line(&self) -> String {
        let action = if self.dry_run { "Would update" } else { "Updated" };
        format!("{action} {}/{} posts", self.updated(), self.total())
    }

    /// Writes the per-file lines, plus the footer for batch runs.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        if self.mode == RunMode::Batch {
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(out, "{}", self.summary_line())?;
        }
        Ok(())
    }
}

/// Writes the banner and separator that open every run.
pub fn render_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(path: &str, status: FileStatus) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(path),
            status,
        }
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            outcome("posts/a.html", FileStatus::WouldUpdate).to_string(),
            "  Would update: posts/a.html"
        );
        assert_eq!(
            outcome("posts/b.html", FileStatus::NoChanges).to_string(),
            "  No changes: posts/b.html"
        );
        assert_eq!(
            outcome("posts/c.html", FileStatus::Failed("stream did not contain valid UTF-8".into()))
                .to_string(),
            "  Error: posts/c.html: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_batch_render() {
        let mut report = RunReport::new(RunMode::Batch, false);
        report.push(outcome("posts/a.html", FileStatus::Updated));
        report.push(outcome("posts/b.html", FileStatus::NoChanges));
        report.push(outcome("posts/c.html", FileStatus::Failed("boom".into())));

        let mut out = Vec::new();
        report.render(&mut out).unwrap();

        let expected = format!(
            "  Updated: posts/a.html\n  No changes: posts/b.html\n  Error: posts/c.html: boom\n{}\nUpdated 1/3 posts\n",
            "-".repeat(50)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_single_render_has_no_summary() {
        let mut report = RunReport::new(RunMode::Single, true);
        report.push(outcome("posts/a.html", FileStatus::WouldUpdate));

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  Would update: posts/a.html\n");
    }

    #[test]
    fn test_dry_run_summary() {
        let mut report = RunReport::new(RunMode::Batch, true);
        report.push(outcome("a.html", FileStatus::WouldUpdate));
        report.push(outcome("b.html", FileStatus::WouldUpdate));
        assert_eq!(report.summary_line(), "Would update 2/2 posts");
    }

    #[test]
    fn test_header() {
        let mut out = Vec::new();
        render_header(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(HEADER));
        assert!(text.ends_with(&format!("{}\n", "-".repeat(50))));
    }
}
