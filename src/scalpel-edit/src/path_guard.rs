//! Path validation ahead of any filesystem access.
//!
//! Callers hand us path strings that may have been assembled by an
//! untrusted party, so beyond classic traversal we also reject control
//! characters and conversation-injection markers smuggled into the path.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Phrases that indicate a prompt-injection attempt hidden in a path.
const INJECTION_MARKERS: [&str; 3] = ["Human:", "Assistant:", "System:"];

/// Errors that can occur during path validation.
#[derive(Debug, Error)]
pub enum PathGuardError {
    #[error("Path is empty")]
    Empty,

    /// Newlines, carriage returns, NUL and the rest of the control range
    /// are never valid in a path we are willing to touch.
    #[error("Path contains control characters: {path}")]
    ControlCharacters { path: String },

    #[error("Path contains suspicious content: {marker:?}")]
    InjectionMarker { marker: &'static str },

    #[error("Path traversal detected: {path} is outside allowed root {root}")]
    OutsideRoot { path: String, root: String },

    #[error("Failed to canonicalize root {root}: {source}")]
    RootCanonicalization {
        root: String,
        #[source]
        source: std::io::Error,
    },
}

/// Validates caller-supplied path strings against a project root.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Validate a raw path string and resolve it to an absolute path under
    /// the root. Relative paths resolve against the root; absolute paths
    /// must already lie under it. The target itself need not exist.
    pub fn validate(&self, raw: &str) -> Result<PathBuf, PathGuardError> {
        if raw.is_empty() {
            return Err(PathGuardError::Empty);
        }
        if raw.chars().any(char::is_control) {
            return Err(PathGuardError::ControlCharacters {
                path: raw.escape_default().to_string(),
            });
        }
        for marker in INJECTION_MARKERS {
            if raw.contains(marker) {
                return Err(PathGuardError::InjectionMarker { marker });
            }
        }

        let canonical_root = if self.root.exists() {
            self.root
                .canonicalize()
                .map_err(|e| PathGuardError::RootCanonicalization {
                    root: self.root.display().to_string(),
                    source: e,
                })?
        } else {
            normalize_path(&self.root)
        };

        let path = Path::new(raw);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            canonical_root.join(path)
        };
        let normalized = normalize_path(&absolute);
        // A symlink in the existing part of the path could still point
        // outside the root, so resolve the deepest existing ancestor
        // before checking containment.
        let resolved = resolve_existing_prefix(&normalized);

        if !resolved.starts_with(&canonical_root) {
            return Err(PathGuardError::OutsideRoot {
                path: resolved.display().to_string(),
                root: canonical_root.display().to_string(),
            });
        }

        debug!(path = %resolved.display(), "path accepted");
        Ok(resolved)
    }
}

/// Canonicalize the deepest ancestor of `path` that exists, then re-append
/// the nonexistent tail. Leaves the path untouched when nothing exists yet.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut tail = Vec::new();

    while !existing.exists() {
        match existing.file_name() {
            Some(name) => {
                tail.push(name.to_os_string());
                if !existing.pop() {
                    break;
                }
            }
            None => break,
        }
    }

    let mut resolved = existing.canonicalize().unwrap_or(existing);
    for name in tail.iter().rev() {
        resolved.push(name);
    }
    resolved
}

/// Normalizes a path by resolving `.` and `..` components without
/// accessing the filesystem, so paths to files that do not exist yet can
/// still be validated.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            Component::CurDir => {}
            _ => normalized.push(component),
        }
    }

    normalized
}
