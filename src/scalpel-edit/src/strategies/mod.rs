//! Cascading match strategies.
//!
//! Each strategy locates candidate occurrences of the search text without
//! mutating anything; replacement happens later, once ambiguity has been
//! resolved.

mod cascade;
mod helpers;
mod matchers;
mod traits;

pub use cascade::{CascadeMatch, MatchCascade};
pub use matchers::{ExactMatcher, LineTrimmedMatcher, WhitespaceNormalizedMatcher};
pub use traits::MatchStrategy;
