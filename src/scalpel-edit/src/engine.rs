//! File-level orchestration: validate the path, read once, run the
//! transaction in memory, render the diff, write once.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::diff::unified_diff;
use crate::error::{EditError, Result};
use crate::path_guard::PathGuard;
use crate::transaction::MultiEditTransaction;
use crate::types::{EditOutcome, EditReport, EditRequest, MultiEditReport};

/// Arguments for a single-edit call.
#[derive(Debug, Deserialize)]
pub struct EditArgs {
    pub file_path: String,
    pub old_string: String,
    pub new_string: String,
    #[serde(default)]
    pub replace_all: bool,
}

/// Arguments for a multi-edit call.
#[derive(Debug, Deserialize)]
pub struct MultiEditArgs {
    pub file_path: String,
    pub edits: Vec<EditRequest>,
}

/// The edit engine for one project root.
///
/// Stateless between calls: each call reads the target file at most once,
/// folds the edits over an in-memory buffer, and writes at most once. No
/// lock is taken; the engine assumes no concurrent writer mutates the file
/// during a call.
pub struct EditEngine {
    guard: PathGuard,
    transaction: MultiEditTransaction,
}

enum RunOutcome {
    Committed {
        outcomes: Vec<EditOutcome>,
        diff: String,
    },
    RolledBack {
        outcomes: Vec<EditOutcome>,
    },
}

impl EditEngine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            guard: PathGuard::new(root),
            transaction: MultiEditTransaction::new(),
        }
    }

    /// Single-edit entry point taking raw JSON arguments.
    pub fn edit_json(&self, arguments: Value) -> EditReport {
        match serde_json::from_value::<EditArgs>(arguments) {
            Ok(args) => self.edit(args),
            Err(e) => EditReport::error(format!("Invalid arguments: {e}")),
        }
    }

    /// Multi-edit entry point taking raw JSON arguments.
    pub fn multi_edit_json(&self, arguments: Value) -> MultiEditReport {
        match serde_json::from_value::<MultiEditArgs>(arguments) {
            Ok(args) => self.multi_edit(args),
            Err(e) => MultiEditReport::error(format!("Invalid arguments: {e}")),
        }
    }

    /// Apply one edit to a file.
    pub fn edit(&self, args: EditArgs) -> EditReport {
        let edits = [EditRequest {
            old_string: args.old_string,
            new_string: args.new_string,
            replace_all: args.replace_all,
        }];

        match self.run(&args.file_path, &edits) {
            Ok(RunOutcome::Committed { diff, .. }) => EditReport::ok(diff),
            Ok(RunOutcome::RolledBack { outcomes }) => {
                let error = outcomes
                    .last()
                    .and_then(|o| o.error.clone())
                    .unwrap_or_else(|| "Edit failed".to_string());
                EditReport::error(error)
            }
            Err(e) => EditReport::error(e.to_string()),
        }
    }

    /// Apply an ordered sequence of edits to one file, all-or-nothing.
    ///
    /// On failure nothing is written and the report records every edit up
    /// to and including the first failing one.
    pub fn multi_edit(&self, args: MultiEditArgs) -> MultiEditReport {
        if args.edits.is_empty() {
            return MultiEditReport::error("No edits specified");
        }

        match self.run(&args.file_path, &args.edits) {
            Ok(RunOutcome::Committed { outcomes, diff }) => {
                MultiEditReport::committed(outcomes, diff)
            }
            Ok(RunOutcome::RolledBack { outcomes }) => MultiEditReport::rolled_back(outcomes),
            Err(e) => MultiEditReport::error(e.to_string()),
        }
    }

    fn run(&self, file_path: &str, edits: &[EditRequest]) -> Result<RunOutcome> {
        let path = self.guard.validate(file_path)?;

        if path.is_dir() {
            return Err(EditError::IsDirectory(path.display().to_string()));
        }

        let creating = !path.exists();
        let original = if creating {
            // A missing file is only acceptable when the first edit is a
            // creation edit (empty old_string).
            let creation_edit = edits.first().is_some_and(|e| e.old_string.is_empty());
            if !creation_edit {
                return Err(EditError::FileNotFound(path.display().to_string()));
            }
            String::new()
        } else {
            fs::read_to_string(&path)?
        };

        let result = self.transaction.run(&original, edits);
        let Some(final_content) = result.committed else {
            return Ok(RunOutcome::RolledBack {
                outcomes: result.outcomes,
            });
        };

        let diff = unified_diff(file_path, &original, &final_content);

        if creating {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        atomic_write_file(&path, &final_content)?;
        info!(
            path = %path.display(),
            edits = edits.len(),
            created = creating,
            "file updated"
        );

        Ok(RunOutcome::Committed {
            outcomes: result.outcomes,
            diff,
        })
    }
}

/// Perform an atomic file write using the write-to-temp-then-rename
/// pattern, so readers never observe a partially written file.
fn atomic_write_file(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Cannot determine parent directory",
        )
    })?;

    // Temp file in the same directory for a same-filesystem atomic rename.
    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("file"),
        std::process::id()
    ));

    {
        let mut temp_file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.sync_all()?;
    }

    #[cfg(unix)]
    {
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            e
        })?;
    }

    #[cfg(windows)]
    {
        // Windows cannot rename over an open file; retry after removal.
        if path.exists() {
            let mut retries = 3;
            loop {
                match fs::remove_file(path) {
                    Ok(()) => break,
                    Err(_) if retries > 0 => {
                        retries -= 1;
                        std::thread::sleep(std::time::Duration::from_millis(50));
                    }
                    Err(e) => {
                        let _ = fs::remove_file(&temp_path);
                        return Err(e);
                    }
                }
            }
        }
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            e
        })?;
    }

    Ok(())
}
