//! The three matchers, in cascade order: exact, line-trimmed,
//! whitespace-normalized.

use super::helpers::{NormalizedText, line_spans, normalize_whitespace};
use super::traits::MatchStrategy;
use crate::types::MatchSpan;

// =============================================================================
// Tier 1: ExactMatcher
// =============================================================================

/// Tier 1: literal substring match. The most precise tier.
pub struct ExactMatcher;

impl MatchStrategy for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn find_matches(&self, content: &str, needle: &str) -> Vec<MatchSpan> {
        content
            .match_indices(needle)
            .map(|(start, matched)| MatchSpan::new(start, start + matched.len()))
            .collect()
    }
}

// =============================================================================
// Tier 2: LineTrimmedMatcher
// =============================================================================

/// Tier 2: line-wise comparison after trimming leading and trailing
/// whitespace from every line. Tolerates indentation drift while keeping
/// line structure intact.
pub struct LineTrimmedMatcher;

impl MatchStrategy for LineTrimmedMatcher {
    fn name(&self) -> &'static str {
        "line-trimmed"
    }

    fn find_matches(&self, content: &str, needle: &str) -> Vec<MatchSpan> {
        let needle_lines: Vec<&str> = needle.lines().map(str::trim).collect();
        if needle_lines.is_empty() || needle_lines.iter().all(|line| line.is_empty()) {
            // An all-whitespace needle would zero-width match every blank
            // line.
            return Vec::new();
        }

        let content_lines: Vec<&str> = content.lines().collect();
        if content_lines.len() < needle_lines.len() {
            return Vec::new();
        }

        let spans = line_spans(content);
        // A needle ending in a newline consumes the window's terminator too,
        // so the replacement does not leave a doubled newline behind.
        let include_terminator = needle.ends_with('\n');
        let mut out = Vec::new();

        for start in 0..=content_lines.len() - needle_lines.len() {
            let matches = needle_lines
                .iter()
                .enumerate()
                .all(|(j, needle_line)| content_lines[start + j].trim() == *needle_line);

            if matches {
                let last = start + needle_lines.len() - 1;
                let (window_start, _) = spans[start];
                let end = if include_terminator {
                    match spans.get(last + 1) {
                        Some(&(next_start, _)) => next_start,
                        None => content.len(),
                    }
                } else {
                    spans[last].1
                };
                out.push(MatchSpan::new(window_start, end));
            }
        }

        out
    }

    fn confidence(&self) -> f64 {
        0.95
    }
}

// =============================================================================
// Tier 3: WhitespaceNormalizedMatcher
// =============================================================================

/// Tier 3: match with every whitespace run (including newlines) collapsed
/// to a single space. The loosest tier; tolerates re-wrapped lines.
pub struct WhitespaceNormalizedMatcher;

impl MatchStrategy for WhitespaceNormalizedMatcher {
    fn name(&self) -> &'static str {
        "whitespace-normalized"
    }

    fn find_matches(&self, content: &str, needle: &str) -> Vec<MatchSpan> {
        let needle_normalized = normalize_whitespace(needle);
        if needle_normalized.is_empty() {
            // An all-whitespace needle would match everywhere.
            return Vec::new();
        }

        let view = NormalizedText::new(content);
        view.text
            .match_indices(&needle_normalized)
            .map(|(start, matched)| view.original_span(start, start + matched.len()))
            .collect()
    }

    fn confidence(&self) -> f64 {
        0.80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_single_match() {
        let spans = ExactMatcher.find_matches("fn main() {}", "main");
        assert_eq!(spans, vec![MatchSpan::new(3, 7)]);
    }

    #[test]
    fn test_exact_multiple_matches() {
        let spans = ExactMatcher.find_matches("foo bar foo baz foo", "foo");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2], MatchSpan::new(16, 19));
    }

    #[test]
    fn test_exact_no_match() {
        assert!(ExactMatcher.find_matches("abc", "xyz").is_empty());
    }

    #[test]
    fn test_line_trimmed_indentation_drift() {
        let content = "fn main() {\n\tprintln!(\"hi\");\n}";
        let needle = "    println!(\"hi\");";
        let spans = LineTrimmedMatcher.find_matches(content, needle);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &content[spans[0].start..spans[0].end],
            "\tprintln!(\"hi\");"
        );
    }

    #[test]
    fn test_line_trimmed_multiline_window() {
        let content = "a\n  let x = 1;\n  let y = 2;\nb";
        let needle = "let x = 1;\nlet y = 2;";
        let spans = LineTrimmedMatcher.find_matches(content, needle);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &content[spans[0].start..spans[0].end],
            "  let x = 1;\n  let y = 2;"
        );
    }

    #[test]
    fn test_line_trimmed_trailing_newline_consumes_terminator() {
        let content = "a\n  foo\nb\n";
        let needle = "foo\n";
        let spans = LineTrimmedMatcher.find_matches(content, needle);
        assert_eq!(spans.len(), 1);
        assert_eq!(&content[spans[0].start..spans[0].end], "  foo\n");
    }

    #[test]
    fn test_line_trimmed_at_end_without_newline() {
        let content = "a\n  foo";
        let spans = LineTrimmedMatcher.find_matches(content, "foo");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end, content.len());
    }

    #[test]
    fn test_line_trimmed_reports_every_window() {
        let content = "  x\nmid\n\tx\n";
        let spans = LineTrimmedMatcher.find_matches(content, "x");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_line_trimmed_ignores_all_whitespace_needle() {
        assert!(
            LineTrimmedMatcher
                .find_matches("a\n\nb\n", "\t")
                .is_empty()
        );
        assert!(
            LineTrimmedMatcher
                .find_matches("a\n\nb\n", " \n\t\n")
                .is_empty()
        );
    }

    #[test]
    fn test_whitespace_normalized_rewrapped() {
        let content = "fn add(a: u32,\n       b: u32) -> u32";
        let needle = "fn add(a: u32, b: u32)";
        let spans = WhitespaceNormalizedMatcher.find_matches(content, needle);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            &content[spans[0].start..spans[0].end],
            "fn add(a: u32,\n       b: u32)"
        );
    }

    #[test]
    fn test_whitespace_normalized_ignores_all_whitespace_needle() {
        assert!(
            WhitespaceNormalizedMatcher
                .find_matches("some content", " \n\t ")
                .is_empty()
        );
    }

    #[test]
    fn test_whitespace_normalized_tabs_vs_spaces() {
        let content = "if x {\n\treturn\ty;\n}";
        let needle = "if x { return y; }";
        let spans = WhitespaceNormalizedMatcher.find_matches(content, needle);
        assert_eq!(spans.len(), 1);
        assert_eq!(&content[spans[0].start..spans[0].end], content);
    }
}
