//! Ambiguity resolution for candidate match spans.

use crate::types::MatchSpan;

/// What the caller is allowed to do with the candidates a tier produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No candidates.
    NotFound,
    /// Exactly one candidate; safe to replace.
    Unique(MatchSpan),
    /// Every candidate will be replaced (`replace_all` was set).
    All(Vec<MatchSpan>),
    /// Multiple candidates and `replace_all` was not set.
    Ambiguous { count: usize },
    /// Candidates overlap, so replacing all of them would be
    /// order-dependent. Happens when fuzzy-tier line windows share lines.
    Overlapping { count: usize },
}

/// Decide what to do with the candidate spans of one edit.
///
/// `spans` must be sorted by ascending start, which every matcher
/// guarantees.
pub fn resolve(spans: Vec<MatchSpan>, replace_all: bool) -> MatchOutcome {
    match spans.len() {
        0 => MatchOutcome::NotFound,
        1 => MatchOutcome::Unique(spans[0]),
        count if !replace_all => MatchOutcome::Ambiguous { count },
        count => {
            // Sorted by start, so only adjacent spans can overlap first.
            let overlapping = spans.windows(2).any(|pair| pair[0].overlaps(&pair[1]));
            if overlapping {
                MatchOutcome::Overlapping { count }
            } else {
                MatchOutcome::All(spans)
            }
        }
    }
}
