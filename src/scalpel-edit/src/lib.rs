//! Fuzzy text replacement with atomic multi-edit transactions.
//!
//! Locates an `old_string` in a file even when whitespace or indentation has
//! drifted since the caller last read it, refuses ambiguous matches unless
//! `replace_all` is set, applies an ordered sequence of edits to one file
//! all-or-nothing, and reports the net change as a unified diff.
//!
//! Matching cascades through three tiers, strictly in order:
//! 1. exact - literal substring match
//! 2. line-trimmed - line-wise comparison ignoring per-line indentation
//! 3. whitespace-normalized - all whitespace runs collapsed to single spaces
//!
//! The first tier that produces any candidate wins; an ambiguous tier never
//! falls through to a looser one.

pub mod apply;
pub mod diff;
pub mod engine;
pub mod error;
pub mod path_guard;
pub mod resolver;
pub mod strategies;
pub mod transaction;
pub mod types;

pub use engine::{EditArgs, EditEngine, MultiEditArgs};
pub use error::{EditError, Result};
pub use path_guard::{PathGuard, PathGuardError};
pub use transaction::{MultiEditTransaction, TransactionResult};
pub use types::{EditOutcome, EditReport, EditRequest, MatchSpan, MultiEditReport};
