//! Property-based tests for word truncation and list chunking
//!
//! These tests check that:
//! - truncation never keeps more than the word budget
//! - the truncation flag is set exactly when words were dropped
//! - truncating an already truncated text changes nothing
//! - chunking yields ceil(N/K) chunks covering every item in order

use postkit::chunk::chunks;
use postkit::truncate::truncate;
use proptest::prelude::*;
use std::num::NonZeroUsize;

/// Generate text made of short words separated by mixed whitespace
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plain words and spaces
        "[a-z ]{0,80}",
        // Words with tabs, newlines and carriage returns
        "[a-zA-Z0-9 \t\r\n]{0,80}",
        // Punctuation sticks to words
        "[a-z.,;!? ]{0,60}",
    ]
}

fn word_count(text: &str) -> usize {
    text.split(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .filter(|w| !w.is_empty())
        .count()
}

proptest! {
    #[test]
    fn test_truncate_respects_limit(
        text in text_strategy(),
        limit in 0usize..20,
    ) {
        let (out, _) = truncate(&text, limit);
        prop_assert!(word_count(&out) <= limit);
    }

    #[test]
    fn test_truncate_flag_iff_words_dropped(
        text in text_strategy(),
        limit in 0usize..20,
    ) {
        let (out, truncated) = truncate(&text, limit);
        prop_assert_eq!(truncated, word_count(&text) > limit);
        if !truncated {
            prop_assert_eq!(word_count(&out), word_count(&text));
        }
    }

    #[test]
    fn test_truncate_idempotent(
        text in text_strategy(),
        limit in 0usize..20,
    ) {
        let (once, _) = truncate(&text, limit);
        let (twice, truncated) = truncate(&once, limit);
        prop_assert_eq!(&once, &twice);
        prop_assert!(!truncated);
    }

    #[test]
    fn test_truncate_output_is_single_spaced(
        text in text_strategy(),
        limit in 0usize..20,
    ) {
        let (out, _) = truncate(&text, limit);
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
    }

    #[test]
    fn test_chunk_counts(n in 0usize..50, k in 1usize..10) {
        let items: Vec<usize> = (0..n).collect();
        let size = NonZeroUsize::new(k).unwrap();
        let got: Vec<(usize, Vec<usize>)> =
            chunks(&items, size).map(|(i, c)| (i, c.to_vec())).collect();

        prop_assert_eq!(got.len(), (n + k - 1) / k);
        for (expected, (index, chunk)) in got.iter().enumerate() {
            prop_assert_eq!(expected, *index);
            prop_assert!(!chunk.is_empty() && chunk.len() <= k);
        }
        if let Some((_, last)) = got.last() {
            prop_assert_eq!(last.len(), n - k * (got.len() - 1));
        }
        let flattened: Vec<usize> =
            got.into_iter().flat_map(|(_, c)| c).collect();
        prop_assert_eq!(flattened, items);
    }
}
