use crate::engine::{self, RunMetrics};
use crate::notes::{DelimiterSearch, NoteSpan};
use crate::{ReplacementLog, Result, RuleSet, SentenceCapitalizer, parse_rules};
use std::time::Duration;

/// Options for a replacement run. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Only replace matches bounded by word boundaries on both sides.
    pub whole_words: bool,
    /// Also run every rule with pattern and replacement first-letter
    /// capitalized.
    pub preserve_case: bool,
    /// Record a [`ReplacementLog`].
    pub log: bool,
}

impl Options {
    pub fn whole_words(mut self, on: bool) -> Self {
        self.whole_words = on;
        self
    }

    pub fn preserve_case(mut self, on: bool) -> Self {
        self.preserve_case = on;
        self
    }

    pub fn log(mut self, on: bool) -> Self {
        self.log = on;
        self
    }
}

/// Result from [`replace_by_rules`] and [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplaceResult {
    pub result: String,
    pub log: ReplacementLog,
}

/// Result from [`replace_verbose`].
#[derive(Debug, Clone)]
pub struct ReplaceDetails {
    pub rules: RuleSet,
    pub run: RunMetrics,
    /// Time spent parsing the rule text.
    pub parse: Duration,
}

/// Parse `rule_text` and apply it to `subject`.
///
/// # Example
/// ```
/// use rulepad::{Options, replace_by_rules};
///
/// let out = replace_by_rules("\"cat\"->\"dog\"", "a cat in a category", &Options::default().whole_words(true))?;
/// assert_eq!(out.result, "a dog in a category");
/// # Ok::<(), rulepad::Error>(())
/// ```
///
/// # Errors
///
/// Returns the first rule that fails to compile.
pub fn replace_by_rules(rule_text: &str, subject: &str, options: &Options) -> Result<ReplaceResult> {
    engine::apply(&parse_rules(rule_text), subject, options)
}

/// [`replace_by_rules`] followed by sentence capitalization.
///
/// # Errors
///
/// Same as [`replace_by_rules`].
pub fn replace_and_capitalize(rule_text: &str, subject: &str, options: &Options) -> Result<ReplaceResult> {
    let ReplaceResult { result, log } = replace_by_rules(rule_text, subject, options)?;
    Ok(ReplaceResult { result: SentenceCapitalizer::default().capitalize(&result), log })
}

/// Parse and apply, keeping the parsed rules and per-pass metrics.
///
/// # Errors
///
/// Same as [`replace_by_rules`].
pub fn replace_verbose(rule_text: &str, subject: &str, options: &Options) -> Result<ReplaceDetails> {
    let parse_start = std::time::Instant::now();
    let rules = parse_rules(rule_text);
    let parse = parse_start.elapsed();
    let run = engine::apply_verbose(&rules, subject, options)?;
    Ok(ReplaceDetails { rules, run, parse })
}

// --- Note operations ---------------------------------------------------------

/// Output of [`cut_note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutNote {
    /// The note that was around the cursor.
    pub note: String,
    /// The host text without it.
    pub remaining: String,
}

/// Span of the note around `cursor`.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDelimiter`] for an empty `delimiter`.
pub fn note_span(text: &str, cursor: usize, delimiter: &str) -> Result<NoteSpan> {
    Ok(DelimiterSearch::new(delimiter)?.span(text, cursor))
}

/// Text of the note around `cursor`.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDelimiter`] for an empty `delimiter`.
pub fn current_note<'a>(text: &'a str, cursor: usize, delimiter: &str) -> Result<&'a str> {
    let span = note_span(text, cursor, delimiter)?;
    Ok(&text[span.range()])
}

/// Same as [`current_note`], owned. Everything outside the note is dropped.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDelimiter`] for an empty `delimiter`.
pub fn crop_note(text: &str, cursor: usize, delimiter: &str) -> Result<String> {
    current_note(text, cursor, delimiter).map(str::to_string)
}

/// Take the note around `cursor` out of `text`.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDelimiter`] for an empty `delimiter`.
pub fn cut_note(text: &str, cursor: usize, delimiter: &str) -> Result<CutNote> {
    let search = DelimiterSearch::new(delimiter)?;
    let span = search.span(text, cursor);
    Ok(CutNote {
        note: text[span.range()].to_string(),
        remaining: DelimiterSearch::delete_note(text, span.left, span.right, delimiter),
    })
}

/// Apply `rule_text` to the note around `cursor` only and splice the result
/// back into `text`. The other notes are left byte-for-byte intact.
///
/// # Errors
///
/// Fails on an empty `delimiter` or a rule that does not compile.
pub fn replace_in_note(
    text: &str,
    cursor: usize,
    delimiter: &str,
    rule_text: &str,
    options: &Options,
) -> Result<ReplaceResult> {
    let span = note_span(text, cursor, delimiter)?;
    let ReplaceResult { result, log } = replace_by_rules(rule_text, &text[span.range()], options)?;
    let spliced = format!("{}{}{}", &text[..span.left], result, &text[span.right..]);
    Ok(ReplaceResult { result: spliced, log })
}

/// Every note of `text`, in order. A text without delimiters is one note.
///
/// # Errors
///
/// Returns [`crate::Error::EmptyDelimiter`] for an empty `delimiter`.
pub fn split_notes<'a>(text: &'a str, delimiter: &str) -> Result<Vec<&'a str>> {
    let search = DelimiterSearch::new(delimiter)?;
    Ok(text.split(search.delimiter()).collect())
}

/// Convert a UTF-16 code unit offset (what browser text areas report as the
/// cursor position) into a byte offset into `text`.
///
/// Offsets inside a surrogate pair round down; offsets past the end map to
/// `text.len()`.
pub fn utf16_to_byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units + ch.len_utf16() > utf16_offset {
            return byte;
        }
        units += ch.len_utf16();
    }
    text.len()
}
