//! Character-safe string truncation.

/// Returns at most `max_chars` characters of `text`, never splitting a
/// multi-byte character.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncates to `max_chars` characters and appends `...`.
///
/// The marker is appended unconditionally, so prompts always signal that
/// the context may be partial.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    format!("{}...", truncate_chars(text, max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_at_limit() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "ab...");
        assert_eq!(truncate_with_ellipsis("ab", 5), "ab...");
    }
}
