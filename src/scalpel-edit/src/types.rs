//! Request and response types for the edit engine.

use serde::{Deserialize, Serialize};

/// A single search-and-replace request against one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Text to find. An empty string is only valid as the first edit of a
    /// new or empty file, where it means "insert `new_string`".
    pub old_string: String,
    /// Replacement text.
    pub new_string: String,
    /// Replace every occurrence instead of requiring a unique match.
    #[serde(default)]
    pub replace_all: bool,
}

impl EditRequest {
    pub fn new(old_string: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            old_string: old_string.into(),
            new_string: new_string.into(),
            replace_all: false,
        }
    }

    pub fn replace_all(mut self) -> Self {
        self.replace_all = true;
        self
    }
}

/// Byte range of a candidate match within the current buffer.
///
/// Spans are half-open (`start..end`) and always fall on `char` boundaries
/// of the buffer they were produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Per-edit record reported by a transaction.
///
/// A failed transaction reports every edit up to and including the first
/// failure; later edits were never attempted and have no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditOutcome {
    /// 1-based position of the edit in the request sequence.
    pub edit_number: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditOutcome {
    pub fn succeeded(edit_number: usize, message: impl Into<String>) -> Self {
        Self {
            edit_number,
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(edit_number: usize, error: impl Into<String>) -> Self {
        Self {
            edit_number,
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Result of a single-edit call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditReport {
    pub success: bool,
    /// Unified diff of the applied change. Present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditReport {
    pub fn ok(diff: String) -> Self {
        Self {
            success: true,
            diff: Some(diff),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            diff: None,
            error: Some(message.into()),
        }
    }
}

/// Result of a multi-edit call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiEditReport {
    pub success: bool,
    /// Per-edit records, in request order, up to the first failure.
    pub edit_results: Vec<EditOutcome>,
    /// Unified diff of the net change. Present only when the transaction
    /// committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_diff: Option<String>,
    /// Failure that occurred before any edit was attempted (bad arguments,
    /// rejected path, missing file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MultiEditReport {
    pub fn committed(edit_results: Vec<EditOutcome>, final_diff: String) -> Self {
        Self {
            success: true,
            edit_results,
            final_diff: Some(final_diff),
            error: None,
        }
    }

    pub fn rolled_back(edit_results: Vec<EditOutcome>) -> Self {
        Self {
            success: false,
            edit_results,
            final_diff: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            edit_results: Vec::new(),
            final_diff: None,
            error: Some(message.into()),
        }
    }
}
