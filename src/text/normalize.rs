//! Unicode normalization for profile training and detection input
//!
//! Every string that touches a profile — training corpus units and query
//! text alike — passes through [`normalize`] first, so counts and lookups
//! always agree on case, diacritics, and word separators.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Reduce text to the canonical form profiles are built on:
///
/// 1. Decompose to NFD and drop nonspacing marks, so `é` and `e` +
///    combining acute both collapse to `e`.
/// 2. Replace every code point that is not a letter (Ll, Lu, Lt, Lo) or a
///    space separator with a single ASCII space. Digits, punctuation,
///    symbols, and spacing marks all become word boundaries.
/// 3. Lowercase what survives.
/// 4. Recompose to NFC and trim the ends.
///
/// Interior space runs are left alone; word splitting downstream is
/// whitespace-aware and skips them. The function is pure and idempotent.
pub fn normalize(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for ch in text.nfd() {
        match get_general_category(ch) {
            // The mark half of a decomposed pair vanishes outright rather
            // than becoming a boundary inside the word.
            GeneralCategory::NonspacingMark => {}
            GeneralCategory::LowercaseLetter
            | GeneralCategory::UppercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::SpaceSeparator => mapped.extend(ch.to_lowercase()),
            _ => mapped.push(' '),
        }
    }
    let recomposed: String = mapped.nfc().collect();
    recomposed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_diacritics() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("CRÈME BRÛLÉE"), "creme brulee");
        assert_eq!(normalize("Ελληνικά"), "ελληνικα");
    }

    #[test]
    fn test_non_letters_become_spaces() {
        // Each replaced code point contributes its own space; runs are not
        // collapsed, only the ends are trimmed.
        assert_eq!(normalize("Hello, World! 123"), "hello  world");
        assert_eq!(normalize("foo-bar"), "foo bar");
        assert_eq!(normalize("1234 !?"), "");
    }

    #[test]
    fn test_keeps_other_letter_scripts() {
        assert_eq!(normalize("日本語です。"), "日本語です");
        assert_eq!(normalize("Привет"), "привет");
        // Hangul survives the NFD/NFC round trip recomposed.
        assert_eq!(normalize("한국어"), "한국어");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Hello, World! 123",
            "CRÈME brûlée  ",
            "日本語です。",
            "Ça va? Très bien!",
            "a\u{0301}bc",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_precombined_equals_decomposed() {
        // U+00E9 vs U+0065 U+0301
        assert_eq!(normalize("caf\u{00e9}"), normalize("cafe\u{0301}"));
    }
}
