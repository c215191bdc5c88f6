//! Text canonicalization for pronunciation comparison.
//!
//! The output is intentionally lossy: case, punctuation and diacritics are
//! discarded because the evaluator scores lexical closeness, not exact
//! transcription.

use unicode_normalization::UnicodeNormalization;

use crate::types::Language;

/// Normalize a string into a comparison-safe canonical form.
///
/// Applies, in order: lowercasing and trimming; language-specific folding
/// (`ё` → `е` for Russian, dotless `ı` → `i` for Turkish); NFKD decomposition
/// with every character that is neither alphanumeric nor whitespace dropped
/// (this strips combining marks, punctuation and symbols in one pass); and
/// collapsing whitespace runs to single spaces. Idempotent.
pub fn normalize(text: &str, language: Language) -> String {
    let lowered = text.trim().to_lowercase();

    let folded = match language {
        Language::Ru => lowered.replace('ё', "е"),
        Language::Tr => lowered.replace('ı', "i"),
        Language::En | Language::Uz => lowered,
    };

    folded
        .nfkd()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Hello World  ", Language::En), "hello world");
    }

    #[test]
    fn strips_punctuation_and_symbols() {
        assert_eq!(normalize("Hello, World!", Language::En), "hello world");
        assert_eq!(normalize("it's $5 + tax.", Language::En), "its 5 tax");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("café naïve", Language::En), "cafe naive");
        assert_eq!(normalize("Über", Language::En), "uber");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("salom\t\t dunyo\n", Language::Uz), "salom dunyo");
    }

    #[test]
    fn russian_folds_yo() {
        assert_eq!(normalize("Ёлка", Language::Ru), "елка");
    }

    #[test]
    fn turkish_folds_dotless_i() {
        assert_eq!(normalize("ışık", Language::Tr), "isik");
        // Dotted capital İ lowercases to i plus a combining dot, which the
        // mark strip removes.
        assert_eq!(normalize("İstanbul", Language::Tr), "istanbul");
    }

    #[test]
    fn keeps_cyrillic_letters() {
        assert_eq!(normalize("Привет, мир!", Language::Ru), "привет мир");
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize("", Language::En), "");
        assert_eq!(normalize("  \t ", Language::En), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            ("Hello, World!", Language::En),
            ("Ёжик в тумане…", Language::Ru),
            ("Oʻzbek tili — go'zal!", Language::Uz),
            ("IŞIK ılık", Language::Tr),
        ];
        for (text, lang) in samples {
            let once = normalize(text, lang);
            assert_eq!(normalize(&once, lang), once, "not idempotent for {text:?}");
        }
    }
}
