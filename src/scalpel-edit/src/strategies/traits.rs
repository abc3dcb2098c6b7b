//! Strategy trait for locating edit targets.

use crate::types::MatchSpan;

/// A strategy for locating candidate occurrences of `needle` in `content`.
///
/// Strategies are pure functions over the buffer: they report every byte
/// span a replacement would cover and never perform the replacement
/// themselves.
pub trait MatchStrategy: Send + Sync {
    /// Strategy name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Return every candidate span, in ascending start order.
    fn find_matches(&self, content: &str, needle: &str) -> Vec<MatchSpan>;

    /// How confident we are that a match from this strategy is what the
    /// caller meant (1.0 = exact).
    fn confidence(&self) -> f64 {
        1.0
    }
}
