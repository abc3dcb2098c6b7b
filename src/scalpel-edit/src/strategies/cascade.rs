//! Ordered cascade over the match strategies.

use scalpel_common::truncate_for_display;
use tracing::debug;

use super::matchers::{ExactMatcher, LineTrimmedMatcher, WhitespaceNormalizedMatcher};
use super::traits::MatchStrategy;
use crate::types::MatchSpan;

/// Candidates produced by the winning tier.
pub struct CascadeMatch {
    /// Every candidate span, in ascending start order. Never empty.
    pub spans: Vec<MatchSpan>,
    pub strategy_name: &'static str,
    pub confidence: f64,
}

/// Tries each strategy in precision order and stops at the first that
/// produces any candidate. A tier that matched ambiguously still wins;
/// ambiguity is resolved later, never by falling through to a looser tier.
pub struct MatchCascade {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl MatchCascade {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(ExactMatcher),
                Box::new(LineTrimmedMatcher),
                Box::new(WhitespaceNormalizedMatcher),
            ],
        }
    }

    /// Names of all strategies, in cascade order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Find candidates for `needle`, or `None` when every tier came up empty.
    pub fn find(&self, content: &str, needle: &str) -> Option<CascadeMatch> {
        for strategy in &self.strategies {
            let spans = strategy.find_matches(content, needle);
            if !spans.is_empty() {
                debug!(
                    "{}: {} candidate(s) for '{}'",
                    strategy.name(),
                    spans.len(),
                    truncate_for_display(needle, 50)
                );
                return Some(CascadeMatch {
                    spans,
                    strategy_name: strategy.name(),
                    confidence: strategy.confidence(),
                });
            }
        }
        None
    }
}

impl Default for MatchCascade {
    fn default() -> Self {
        Self::new()
    }
}
