//! Error types for the edit engine.

use thiserror::Error;

use crate::path_guard::PathGuardError;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Path validation failed: {0}")]
    PathRejected(#[from] PathGuardError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Path is a directory, not a file: {0}")]
    IsDirectory(String),

    #[error("Could not find '{search}' in file (tried strategies: {})", .strategies_tried.join(", "))]
    NotFound {
        search: String,
        strategies_tried: Vec<&'static str>,
    },

    #[error("Found {count} occurrences of '{search}'. {hint}")]
    Ambiguous {
        count: usize,
        search: String,
        hint: String,
    },

    #[error("old_string and new_string are identical; nothing to change")]
    IdenticalStrings,

    #[error(
        "old_string is empty; an empty old_string is only valid as the first edit of a new or empty file"
    )]
    EmptyOldText,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
