//! String utilities for the domain layer.

/// Take at most `max_chars` characters from the front of `s`.
///
/// Counts Unicode scalar values, not bytes, and never trims to a word
/// boundary. Returns a sub-slice of the original string.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // 3 bytes per character
        assert_eq!(truncate_chars("あのね", 2), "あの");
        assert_eq!(truncate_chars("👋🌍🎉", 1), "👋");
    }

    #[test]
    fn test_truncate_does_not_respect_word_boundaries() {
        assert_eq!(truncate_chars("What is Rust?", 6), "What i");
    }

    #[test]
    fn test_truncate_empty() {
        assert_eq!(truncate_chars("", 50), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
