//! Sentence capitalization post-processing.
//!
//! The text is cut at every sentence end into alternating content and
//! separator fragments:
//!
//! ```text
//! "wie geht's? gut. {{c1::danke}}"
//!  └─content─┘└sep┘└c┘└sep┘└sep─┘└content┘
//! ```
//!
//! The first character of every content fragment is upper-cased with full
//! Unicode case mapping (`ä` -> `Ä`, `ß` -> `SS`). Separators are copied as-is.

use crate::engine::upper_first;
use crate::{Error, Result};
use regex::Regex;

/// Sentence ends: `.`, `!`, `:` or `?` followed by whitespace, or a cloze
/// opener such as `{{c1::`.
pub const DEFAULT_SENTENCE_END: &str = r"[.!:?]\s+|\{\{c\d{1,2}::";

/// Upper-cases the first letter of every sentence.
#[derive(Debug, Clone)]
pub struct SentenceCapitalizer {
    sentence_end: Regex,
}

impl Default for SentenceCapitalizer {
    fn default() -> Self {
        // `regex!` takes a literal only; must stay equal to DEFAULT_SENTENCE_END.
        SentenceCapitalizer { sentence_end: regex!(r"[.!:?]\s+|\{\{c\d{1,2}::").clone() }
    }
}

impl SentenceCapitalizer {
    /// Use a custom sentence-end pattern. Every match is kept verbatim in the
    /// output, whether or not the pattern has capture groups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSentencePattern`] when `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let sentence_end = Regex::new(pattern).map_err(Error::InvalidSentencePattern)?;
        Ok(SentenceCapitalizer { sentence_end })
    }

    pub fn capitalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for sep in self.sentence_end.find_iter(text) {
            out.push_str(&upper_first(&text[last..sep.start()]));
            out.push_str(sep.as_str());
            last = sep.end();
        }
        out.push_str(&upper_first(&text[last..]));
        out
    }
}

/// Capitalize `text` with [`DEFAULT_SENTENCE_END`].
///
/// ```
/// assert_eq!(rulepad::capitalize("hallo. wie geht's? {{c1::gut}}"), "Hallo. Wie geht's? {{c1::Gut}}");
/// ```
pub fn capitalize(text: &str) -> String {
    SentenceCapitalizer::default().capitalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("hello", "Hello")]
    #[case("one. two! three? four: five", "One. Two! Three? Four: Five")]
    #[case("no.space", "No.space")]
    #[case("line one.\nline two", "Line one.\nLine two")]
    #[case("end.  ", "End.  ")]
    #[case("{{c1::antwort}} ist richtig", "{{c1::Antwort}} ist richtig")]
    #[case("frage {{c12::eins}} und {{c3::zwei}}", "Frage {{c12::Eins}} und {{c3::Zwei}}")]
    #[case("{{c123::x}}", "{{c123::x}}")]
    #[case("3. punkt", "3. Punkt")]
    fn default_pattern(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[rstest]
    #[case("ärger. öl! übel? ß", "Ärger. Öl! Übel? SS")]
    #[case("é. ñ", "É. Ñ")]
    fn non_ascii_letters_use_unicode_case_mapping(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[test]
    fn default_capitalizer_uses_documented_pattern() {
        assert_eq!(SentenceCapitalizer::default().sentence_end.as_str(), DEFAULT_SENTENCE_END);
    }

    #[test]
    fn custom_pattern_keeps_separators() {
        let cap = SentenceCapitalizer::new(r";\s*").unwrap();
        assert_eq!(cap.capitalize("a; b;c. d"), "A; B;C. d");
    }

    #[test]
    fn invalid_custom_pattern_is_an_error() {
        assert!(matches!(SentenceCapitalizer::new("(["), Err(Error::InvalidSentencePattern(_))));
    }

    proptest! {
        #[test]
        fn capitalization_is_idempotent(text in r"[a-zäöüß .!?:\n{}c0-9]{0,40}") {
            let once = capitalize(&text);
            prop_assert_eq!(capitalize(&once), once.clone());
        }
    }
}
