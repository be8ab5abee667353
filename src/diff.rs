//! Line diffs for previewing rewrites.

use similar::{ChangeTag, TextDiff};
use std::fmt::Write;
use std::path::Path;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Generates a unified diff between two documents.
pub fn unified_diff(original: &str, modified: &str, path: &Path) -> String {
    render(original, modified, path, false)
}

/// Generates a diff with ANSI colours for terminal display.
pub fn colorized_diff(original: &str, modified: &str, path: &Path) -> String {
    render(original, modified, path, true)
}

fn render(original: &str, modified: &str, path: &Path, color: bool) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();
    let (header, reset) = if color { (CYAN, RESET) } else { ("", "") };

    let _ = writeln!(output, "{header}--- a/{}{reset}", path.display());
    let _ = writeln!(output, "{header}+++ b/{}{reset}", path.display());

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            let _ = writeln!(output, "...");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, paint) = match change.tag() {
                    ChangeTag::Delete => ("-", RED),
                    ChangeTag::Insert => ("+", GREEN),
                    ChangeTag::Equal => (" ", ""),
                };

                // Every emitted line ends in '\n', even for a final line without one.
                let value = change.value().trim_end_matches('\n');
                if color && !paint.is_empty() {
                    let _ = writeln!(output, "{paint}{sign}{value}{RESET}");
                } else {
                    let _ = writeln!(output, "{sign}{value}");
                }
            }
        }
    }

    output
}
