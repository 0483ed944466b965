//! Bigram Dice coefficient for fuzzy string matching.
//!
//! Whitespace is stripped before comparison, matching the behavior the
//! knowledge-base matching was tuned against. The function is case-sensitive
//! on its inputs; callers lowercase both sides first.

use std::collections::HashMap;

/// Similarity in [0,1] between two strings: `2 × |shared bigrams| / (|A| + |B|)`.
///
/// Laws: `similarity(x, x) == 1.0` (including empty inputs), symmetric, and
/// `0.0` whenever either side has fewer than two non-whitespace characters
/// and the inputs differ.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    // Multiset of bigrams from the first string.
    let mut counts: HashMap<(char, char), u32> = HashMap::new();
    for pair in a.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut shared = 0u32;
    for pair in b.windows(2) {
        if let Some(count) = counts.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    let total = (a.len() - 1) + (b.len() - 1);
    2.0 * f64::from(shared) / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        for s in ["a", "ab", "hello there", "how do i set a reminder"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "hello"), 0.0);
        assert_eq!(similarity("hello", ""), 0.0);
        assert_eq!(similarity("x", "hello"), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [("night", "nacht"), ("task list", "todo list"), ("abc", "xyz")];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_known_values() {
        // "night"/"nacht": bigrams {ni,ig,gh,ht} vs {na,ac,ch,ht}, one shared
        assert!((similarity("night", "nacht") - 0.25).abs() < 1e-9);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_whitespace_stripped() {
        assert_eq!(similarity("set reminder", "setreminder"), 1.0);
        assert_eq!(similarity("a b", "ab"), 1.0);
    }

    #[test]
    fn test_duplicate_bigrams_counted_as_multiset() {
        // "aaaa" has three "aa" bigrams; "aa" has one — shared is one, not three
        let score = similarity("aaaa", "aa");
        assert!((score - 2.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_close_paraphrase_scores_high() {
        let score = similarity("how do i set a reminder", "how do i set reminders");
        assert!(score > 0.5, "score was {score}");
    }
}
