//! Word-budget truncation for excerpt text.

/// Returns true for the characters that separate words in excerpt text.
fn is_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | ' ')
}

/// Truncates `text` to at most `limit` words, joining the kept words with a
/// single space. The second element of the result is `true` when words were
/// dropped.
///
/// At most `limit + 1` words are ever scanned, so the cost doesn't grow with
/// the length of the text past the budget.
pub fn truncate(text: &str, limit: usize) -> (String, bool) {
    let mut words: Vec<&str> = text
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .take(limit.saturating_add(1))
        .collect();

    let truncated = words.len() > limit;
    if truncated {
        words.pop();
    }
    (words.join(" "), truncated)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(
            (String::from("one two three"), true),
            truncate("one two three four five", 3)
        );
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(
            (String::from("one two three"), false),
            truncate("one two three", 3)
        );
    }

    #[test]
    fn test_truncate_collapses_whitespace() {
        assert_eq!(
            (String::from("one two three"), false),
            truncate("  one\n\ntwo\t\r three  ", 10)
        );
    }

    #[test]
    fn test_truncate_zero_limit() {
        assert_eq!((String::new(), true), truncate("word", 0));
        assert_eq!((String::new(), false), truncate(" \n\t ", 0));
    }

    #[test]
    fn test_truncate_empty() {
        assert_eq!((String::new(), false), truncate("", 55));
    }

    #[test]
    fn test_truncate_keeps_other_whitespace_inside_words() {
        // Only newline, carriage return, tab, and space separate words.
        assert_eq!(
            (String::from("a\u{a0}b c"), true),
            truncate("a\u{a0}b c d", 2)
        );
    }

    #[test]
    fn test_truncate_max_limit() {
        assert_eq!((String::from("a b"), false), truncate("a b", usize::MAX));
    }
}
