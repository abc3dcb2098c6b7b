//! All-or-nothing application of an edit sequence to one buffer.

use scalpel_common::truncate_for_display;
use tracing::{debug, warn};

use crate::apply::replace_spans;
use crate::error::EditError;
use crate::resolver::{MatchOutcome, resolve};
use crate::strategies::MatchCascade;
use crate::types::{EditOutcome, EditRequest};

const AMBIGUOUS_HINT: &str = "Set replace_all=true or provide more surrounding context.";
const OVERLAP_HINT: &str =
    "Matched regions overlap; provide more surrounding context to disambiguate.";

/// How much of the search string to echo back in error messages.
const SEARCH_DISPLAY_LEN: usize = 80;

/// Result of folding every edit over the starting buffer.
#[derive(Debug)]
pub struct TransactionResult {
    /// Per-edit records, up to and including the first failure.
    pub outcomes: Vec<EditOutcome>,
    /// Final buffer when every edit applied; `None` when the transaction
    /// rolled back.
    pub committed: Option<String>,
}

impl TransactionResult {
    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }
}

/// Applies a sequence of edits to an in-memory buffer, stopping at the
/// first failure. Nothing here touches the filesystem; the caller persists
/// the committed buffer (or discards everything).
pub struct MultiEditTransaction {
    cascade: MatchCascade,
}

impl MultiEditTransaction {
    pub fn new() -> Self {
        Self {
            cascade: MatchCascade::new(),
        }
    }

    /// Fold `edits` in order over `original`. Each edit searches the buffer
    /// as left by the previous one, so an edit may target text a prior edit
    /// introduced.
    pub fn run(&self, original: &str, edits: &[EditRequest]) -> TransactionResult {
        let mut buffer = original.to_string();
        let mut outcomes = Vec::with_capacity(edits.len());

        for (index, edit) in edits.iter().enumerate() {
            let edit_number = index + 1;
            match self.apply_one(&mut buffer, index, edit) {
                Ok(message) => {
                    outcomes.push(EditOutcome::succeeded(edit_number, message));
                }
                Err(e) => {
                    debug!(edit_number, "transaction rolled back: {e}");
                    outcomes.push(EditOutcome::failed(edit_number, e.to_string()));
                    return TransactionResult {
                        outcomes,
                        committed: None,
                    };
                }
            }
        }

        TransactionResult {
            outcomes,
            committed: Some(buffer),
        }
    }

    fn apply_one(
        &self,
        buffer: &mut String,
        index: usize,
        edit: &EditRequest,
    ) -> Result<String, EditError> {
        if edit.old_string == edit.new_string {
            return Err(EditError::IdenticalStrings);
        }

        if edit.old_string.is_empty() {
            // Creation edit: insert into a file that has no content yet.
            if index == 0 && buffer.is_empty() {
                buffer.push_str(&edit.new_string);
                return Ok(format!(
                    "Inserted {} bytes into empty file",
                    edit.new_string.len()
                ));
            }
            return Err(EditError::EmptyOldText);
        }

        let search = || truncate_for_display(&edit.old_string, SEARCH_DISPLAY_LEN).into_owned();

        let Some(found) = self.cascade.find(buffer, &edit.old_string) else {
            return Err(EditError::NotFound {
                search: search(),
                strategies_tried: self.cascade.strategy_names(),
            });
        };

        if found.strategy_name != "exact" {
            warn!(
                "fuzzy strategy '{}' used ({:.0}% confidence) for '{}'",
                found.strategy_name,
                found.confidence * 100.0,
                search()
            );
        }

        let spans = match resolve(found.spans, edit.replace_all) {
            MatchOutcome::Unique(span) => vec![span],
            MatchOutcome::All(spans) => spans,
            MatchOutcome::Ambiguous { count } => {
                return Err(EditError::Ambiguous {
                    count,
                    search: search(),
                    hint: AMBIGUOUS_HINT.to_string(),
                });
            }
            MatchOutcome::Overlapping { count } => {
                return Err(EditError::Ambiguous {
                    count,
                    search: search(),
                    hint: OVERLAP_HINT.to_string(),
                });
            }
            MatchOutcome::NotFound => {
                return Err(EditError::NotFound {
                    search: search(),
                    strategies_tried: self.cascade.strategy_names(),
                });
            }
        };

        let count = spans.len();
        *buffer = replace_spans(buffer, &spans, &edit.new_string);

        Ok(if found.strategy_name == "exact" {
            format!("Replaced {count} occurrence(s)")
        } else {
            format!(
                "Replaced {count} occurrence(s) via {} matching",
                found.strategy_name
            )
        })
    }
}

impl Default for MultiEditTransaction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(original: &str, edits: &[EditRequest]) -> TransactionResult {
        MultiEditTransaction::new().run(original, edits)
    }

    #[test]
    fn test_single_exact_edit() {
        let result = run("hello world", &[EditRequest::new("world", "rust")]);
        assert_eq!(result.committed.as_deref(), Some("hello rust"));
        assert_eq!(result.outcomes.len(), 1);
        assert!(result.outcomes[0].success);
    }

    #[test]
    fn test_sequential_edits_see_mutated_buffer() {
        // The second edit targets text the first edit introduced.
        let edits = [
            EditRequest::new("start", "middle"),
            EditRequest::new("middle", "end"),
        ];
        let result = run("start", &edits);
        assert_eq!(result.committed.as_deref(), Some("end"));
        assert_eq!(result.outcomes.len(), 2);
    }

    #[test]
    fn test_failure_stops_and_rolls_back() {
        let edits = [
            EditRequest::new("a", "b"),
            EditRequest::new("missing", "x"),
            EditRequest::new("b", "c"),
        ];
        let result = run("a", &edits);
        assert!(result.committed.is_none());
        // Records stop at the failing edit; edit 3 was never attempted.
        assert_eq!(result.outcomes.len(), 2);
        assert!(result.outcomes[0].success);
        assert!(!result.outcomes[1].success);
        let error = result.outcomes[1].error.as_deref().unwrap();
        assert!(error.contains("Could not find"));
        assert!(error.contains("exact, line-trimmed, whitespace-normalized"));
    }

    #[test]
    fn test_ambiguous_match_is_a_hard_error() {
        let result = run("dup dup", &[EditRequest::new("dup", "x")]);
        assert!(result.committed.is_none());
        let error = result.outcomes[0].error.as_deref().unwrap();
        assert!(error.contains("Found 2 occurrences"));
        assert!(error.contains("replace_all"));
    }

    #[test]
    fn test_replace_all() {
        let result = run(
            "foo bar foo baz foo",
            &[EditRequest::new("foo", "qux").replace_all()],
        );
        assert_eq!(result.committed.as_deref(), Some("qux bar qux baz qux"));
        assert!(
            result.outcomes[0]
                .message
                .as_deref()
                .unwrap()
                .contains("3 occurrence(s)")
        );
    }

    #[test]
    fn test_replace_all_overlapping_windows_refused() {
        // Both two-line windows trim-match the needle and share the middle
        // line, so replacing all of them would be order-dependent.
        let content = "  x\n x\n  x\n";
        let result = run(content, &[EditRequest::new("x\nx\n", "y\n").replace_all()]);
        assert!(result.committed.is_none());
        let error = result.outcomes[0].error.as_deref().unwrap();
        assert!(error.contains("overlap"));
    }

    #[test]
    fn test_whitespace_only_old_string_is_not_found() {
        // Must not zero-width match the blank line and splice text in.
        let result = run("a\n\nb\n", &[EditRequest::new("\t", "XX")]);
        assert!(result.committed.is_none());
        assert!(
            result.outcomes[0]
                .error
                .as_deref()
                .unwrap()
                .contains("Could not find")
        );
    }

    #[test]
    fn test_identical_strings_rejected() {
        let result = run("content", &[EditRequest::new("same", "same")]);
        assert!(result.committed.is_none());
        assert!(
            result.outcomes[0]
                .error
                .as_deref()
                .unwrap()
                .contains("identical")
        );
    }

    #[test]
    fn test_identical_empty_strings_rejected() {
        let result = run("", &[EditRequest::new("", "")]);
        assert!(result.committed.is_none());
        assert!(
            result.outcomes[0]
                .error
                .as_deref()
                .unwrap()
                .contains("identical")
        );
    }

    #[test]
    fn test_creation_edit_on_empty_buffer() {
        let result = run("", &[EditRequest::new("", "fresh content\n")]);
        assert_eq!(result.committed.as_deref(), Some("fresh content\n"));
    }

    #[test]
    fn test_creation_edit_then_normal_edit() {
        let edits = [
            EditRequest::new("", "alpha beta\n"),
            EditRequest::new("beta", "gamma"),
        ];
        let result = run("", &edits);
        assert_eq!(result.committed.as_deref(), Some("alpha gamma\n"));
    }

    #[test]
    fn test_empty_old_string_on_nonempty_buffer_rejected() {
        let result = run("existing", &[EditRequest::new("", "more")]);
        assert!(result.committed.is_none());
        assert!(
            result.outcomes[0]
                .error
                .as_deref()
                .unwrap()
                .contains("empty")
        );
    }

    #[test]
    fn test_empty_old_string_not_first_rejected() {
        let edits = [
            EditRequest::new("", "seed"),
            EditRequest::new("", "again"),
        ];
        let result = run("", &edits);
        assert!(result.committed.is_none());
        assert_eq!(result.outcomes.len(), 2);
    }

    #[test]
    fn test_fuzzy_edit_message_names_strategy() {
        let result = run(
            "fn f() {\n    old();\n}",
            &[EditRequest::new("\told();", "\tnew();")],
        );
        let committed = result.committed.unwrap();
        assert_eq!(committed, "fn f() {\n\tnew();\n}");
        assert!(
            result.outcomes[0]
                .message
                .as_deref()
                .unwrap()
                .contains("line-trimmed")
        );
    }

    #[test]
    fn test_ambiguity_counts_come_from_winning_tier() {
        // One exact occurrence plus one that only matches after trimming:
        // the exact tier wins with a single candidate, so no ambiguity.
        let content = "a b\na  b\n";
        let result = run(content, &[EditRequest::new("a b", "c d")]);
        assert_eq!(result.committed.as_deref(), Some("c d\na  b\n"));
    }
}
