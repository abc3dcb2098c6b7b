//! Unified diff rendering for edit results.
//!
//! Pure presentation: rendering never fails, and a failure to produce a
//! pretty diff must never fail an otherwise valid edit.

use std::fmt;

use similar::{ChangeTag, DiffOp, TextDiff};

/// Number of unchanged lines shown around each change.
const CONTEXT_LINES: usize = 3;

/// A single line within a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Add(String),
    Remove(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Context(s) => write!(f, " {s}"),
            DiffLine::Add(s) => write!(f, "+{s}"),
            DiffLine::Remove(s) => write!(f, "-{s}"),
        }
    }
}

/// A contiguous block of changes with surrounding context.
#[derive(Debug, Clone)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render a unified diff between two versions of one file.
///
/// Returns an empty string when the contents are identical.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let diff = TextDiff::from_lines(old, new);
    let mut out = format!("--- a/{path}\n+++ b/{path}\n");
    for group in diff.grouped_ops(CONTEXT_LINES) {
        out.push_str(&build_hunk(&diff, &group).to_string());
    }
    out
}

fn build_hunk(diff: &TextDiff<'_, '_, '_, str>, group: &[DiffOp]) -> Hunk {
    let (old_range_start, new_range_start) = group
        .first()
        .map(|op| (op.old_range().start, op.new_range().start))
        .unwrap_or((0, 0));
    let (old_range_end, new_range_end) = group
        .last()
        .map(|op| (op.old_range().end, op.new_range().end))
        .unwrap_or((0, 0));

    let mut lines = Vec::new();
    for op in group {
        for change in diff.iter_changes(op) {
            let text = change
                .value()
                .trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string();
            lines.push(match change.tag() {
                ChangeTag::Equal => DiffLine::Context(text),
                ChangeTag::Insert => DiffLine::Add(text),
                ChangeTag::Delete => DiffLine::Remove(text),
            });
        }
    }

    let old_count = old_range_end - old_range_start;
    let new_count = new_range_end - new_range_start;
    Hunk {
        // Unified diff line numbers are 1-based, except an empty range
        // keeps the 0-based position (e.g. "@@ -0,0 +1,3 @@" for creation).
        old_start: if old_count == 0 {
            old_range_start
        } else {
            old_range_start + 1
        },
        old_count,
        new_start: if new_count == 0 {
            new_range_start
        } else {
            new_range_start + 1
        },
        new_count,
        lines,
    }
}
