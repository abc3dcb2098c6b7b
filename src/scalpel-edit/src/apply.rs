//! Span replacement over an in-memory buffer.

use crate::types::MatchSpan;

/// Rebuild `content` with every span replaced by `replacement`.
///
/// Spans must be sorted by ascending start and non-overlapping; the result
/// is assembled in a single pass so earlier replacements never invalidate
/// later offsets.
pub fn replace_spans(content: &str, spans: &[MatchSpan], replacement: &str) -> String {
    let mut result =
        String::with_capacity(content.len() + replacement.len().saturating_mul(spans.len()));
    let mut cursor = 0;

    for span in spans {
        result.push_str(&content[cursor..span.start]);
        result.push_str(replacement);
        cursor = span.end;
    }
    result.push_str(&content[cursor..]);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_single_span() {
        let result = replace_spans("hello world", &[MatchSpan::new(6, 11)], "rust");
        assert_eq!(result, "hello rust");
    }

    #[test]
    fn test_replace_multiple_spans() {
        let content = "foo bar foo baz foo";
        let spans = vec![
            MatchSpan::new(0, 3),
            MatchSpan::new(8, 11),
            MatchSpan::new(16, 19),
        ];
        assert_eq!(replace_spans(content, &spans, "qux"), "qux bar qux baz qux");
    }

    #[test]
    fn test_replacement_longer_than_original() {
        let result = replace_spans("a b a", &[MatchSpan::new(0, 1), MatchSpan::new(4, 5)], "long");
        assert_eq!(result, "long b long");
    }

    #[test]
    fn test_replace_with_empty_string_deletes() {
        let result = replace_spans("keep DROP keep", &[MatchSpan::new(5, 10)], "");
        assert_eq!(result, "keep keep");
    }

    #[test]
    fn test_no_spans_returns_content() {
        assert_eq!(replace_spans("unchanged", &[], "x"), "unchanged");
    }
}
