//! Text truncation utilities.
//!
//! Used to keep user-supplied search strings readable when they are echoed
//! back in error messages and logs.

use std::borrow::Cow;

/// Truncates a string to a maximum length, adding ellipsis if truncated.
///
/// # Arguments
/// * `s` - The string to truncate
/// * `max_len` - Maximum character count (including ellipsis)
///
/// # Examples
/// ```
/// use scalpel_common::truncate::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
/// assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
/// ```
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

/// Truncates a string for display in error messages, collapsing it to a
/// single line first so multi-line search text does not break formatting.
pub fn truncate_for_display(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.contains('\n') {
        let flattened = s.replace('\n', "\\n");
        Cow::Owned(truncate_with_ellipsis(&flattened, max_len).into_owned())
    } else {
        truncate_with_ellipsis(s, max_len)
    }
}
