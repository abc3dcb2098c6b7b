//! Shared helpers for the match strategies.

use crate::types::MatchSpan;

/// Byte offsets of each line's content, excluding the line terminator.
///
/// Follows the same line splitting as `str::lines`: a trailing newline does
/// not produce an extra empty line.
pub(crate) fn line_spans(content: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for raw in content.split_inclusive('\n') {
        let mut end = offset + raw.len();
        if raw.ends_with('\n') {
            end -= 1;
            if raw.ends_with("\r\n") {
                end -= 1;
            }
        }
        spans.push((offset, end));
        offset += raw.len();
    }

    spans
}

/// Collapse all whitespace runs (including newlines) to single spaces and
/// trim the ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed view of a buffer that can map match positions in
/// the collapsed text back to byte ranges in the original.
///
/// Every whitespace run becomes a single space; leading and trailing runs
/// are dropped so the view lines up with `normalize_whitespace` output.
pub(crate) struct NormalizedText {
    pub text: String,
    // Original byte range covered by each byte of `text`.
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl NormalizedText {
    pub fn new(content: &str) -> Self {
        let mut text = String::with_capacity(content.len());
        let mut starts = Vec::with_capacity(content.len());
        let mut ends = Vec::with_capacity(content.len());
        let mut in_whitespace = false;

        for (offset, c) in content.char_indices() {
            if c.is_whitespace() {
                if !in_whitespace && !text.is_empty() {
                    text.push(' ');
                    starts.push(offset);
                    ends.push(offset + c.len_utf8());
                }
                in_whitespace = true;
            } else {
                in_whitespace = false;
                let before = text.len();
                text.push(c);
                for _ in before..text.len() {
                    starts.push(offset);
                    ends.push(offset + c.len_utf8());
                }
            }
        }

        if text.ends_with(' ') {
            text.pop();
            starts.pop();
            ends.pop();
        }

        Self { text, starts, ends }
    }

    /// Map a half-open byte range in the normalized text back to the
    /// original buffer. The range must not start or end on a collapsed
    /// space for the mapping to be tight, which holds for any needle
    /// produced by `normalize_whitespace`.
    pub fn original_span(&self, start: usize, end: usize) -> MatchSpan {
        MatchSpan::new(self.starts[start], self.ends[end - 1])
    }
}
