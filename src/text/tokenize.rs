//! Character n-gram extraction
//!
//! Tokens are n-grams sliced from whitespace-separated words, with a `_`
//! marker padding each word edge so "starts with th" and "contains th"
//! stay distinguishable in the profiles.

/// Shortest n-gram order extracted from each word.
pub const MIN_NGRAM: usize = 3;

/// Longest n-gram order extracted from each word.
pub const MAX_NGRAM: usize = 5;

/// Marker glued to both ends of a word before slicing.
const BOUNDARY: char = '_';

/// Slice normalized text into boundary-padded n-grams of orders
/// `MIN_NGRAM..=MAX_NGRAM`.
///
/// Emission order is fixed: every order-3 gram in word order, then every
/// order-4 gram, then order-5. A word too short for an order contributes
/// nothing at that order. Slicing is by code point, so multi-byte scripts
/// behave exactly like ASCII.
pub fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<Vec<char>> = text
        .split_whitespace()
        .map(|w| w.chars().collect())
        .collect();

    let mut tokens = Vec::new();
    for n in MIN_NGRAM..=MAX_NGRAM {
        for word in &words {
            word_ngrams(&mut tokens, word, n);
        }
    }
    tokens
}

/// Append every order-`n` gram of one word. Orders above 1 see the word
/// wrapped in [`BOUNDARY`] markers; `windows` naturally yields nothing when
/// the padded word is still shorter than `n`.
fn word_ngrams(tokens: &mut Vec<String>, word: &[char], n: usize) {
    let padded: Vec<char> = if n > 1 {
        let mut p = Vec::with_capacity(word.len() + 2);
        p.push(BOUNDARY);
        p.extend_from_slice(word);
        p.push(BOUNDARY);
        p
    } else {
        word.to_vec()
    };

    for gram in padded.windows(n) {
        tokens.push(gram.iter().collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_letter_word() {
        assert_eq!(tokenize("ab"), vec!["_ab", "ab_", "_ab_"]);
    }

    #[test]
    fn test_single_letter_word() {
        // "_a_" is exactly three code points: one trigram, nothing longer.
        assert_eq!(tokenize("a"), vec!["_a_"]);
    }

    #[test]
    fn test_order_major_emission() {
        // All trigrams for every word come before any 4-gram.
        assert_eq!(
            tokenize("to be"),
            vec!["_to", "to_", "_be", "be_", "_to_", "_be_"]
        );
    }

    #[test]
    fn test_gram_counts_per_order() {
        // A word of L code points yields max(0, L + 3 - n) grams at order n.
        let tokens = tokenize("hello");
        assert_eq!(tokens.len(), 5 + 4 + 3);
        assert_eq!(tokens.first().map(String::as_str), Some("_he"));
        assert_eq!(tokens.last().map(String::as_str), Some("ello_"));
    }

    #[test]
    fn test_code_point_slicing() {
        assert_eq!(tokenize("да"), vec!["_да", "да_", "_да_"]);
        let tokens = tokenize("привет");
        assert!(tokens.contains(&"_пр".to_string()));
        assert!(tokens.contains(&"вет_".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(tokenize("the quick fox"), tokenize("the quick fox"));
    }
}
