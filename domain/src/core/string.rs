//! String utilities for the domain layer.

/// Take at most `max_chars` characters of `s`, appending `...` when cut.
///
/// Counts Unicode scalar values, so multi-byte text is never split inside
/// a character.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", s[..end].trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_input_untouched() {
        assert_eq!(excerpt("hello", 10), "hello");
        assert_eq!(excerpt("hello", 5), "hello");
    }

    #[test]
    fn test_excerpt_cuts_and_marks() {
        assert_eq!(excerpt("hello world", 5), "hello...");
        assert_eq!(excerpt("hello world", 6), "hello...");
    }

    #[test]
    fn test_excerpt_multibyte() {
        assert_eq!(excerpt("日本語テスト", 3), "日本語...");
        assert_eq!(excerpt("👋🌍🎉", 2), "👋🌍...");
    }

    #[test]
    fn test_excerpt_trims_surrounding_whitespace() {
        assert_eq!(excerpt("  padded  ", 20), "padded");
    }
}
