use std::fmt;

#[macro_use]
mod macros;
mod api;
mod capitalize;
mod engine;
mod error;
mod notes;
mod rules;

pub use api::{
    CutNote, Options, ReplaceDetails, ReplaceResult, crop_note, current_note, cut_note, note_span, replace_and_capitalize,
    replace_by_rules, replace_in_note, replace_verbose, split_notes, utf16_to_byte_offset,
};
pub use capitalize::{DEFAULT_SENTENCE_END, SentenceCapitalizer, capitalize};
pub use engine::{PassMetrics, RunMetrics, apply, apply_verbose, parse_rules};
pub use error::{Error, Result};
pub use notes::{DEFAULT_DELIMITER, DelimiterSearch, NoteSpan};
pub use rules::du2ich::{DU2ICH_RULES, du2ich};

// --- Rules -------------------------------------------------------------------

/// Replacement flag that turns a rule into a deletion of every match.
pub const DELETE_FLAG: &str = "x";

/// One `"pattern"flags->"replacement"flags` directive.
///
/// Flags are kept as the raw lowercase letters found in the rule text. They
/// are only interpreted when the rule is compiled, so parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rule {
    pub pattern: String,
    pub pattern_flags: String,
    pub replacement: String,
    pub replacement_flags: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Rule { pattern: pattern.into(), replacement: replacement.into(), ..Rule::default() }
    }

    pub fn with_pattern_flags(mut self, flags: impl Into<String>) -> Self {
        self.pattern_flags = flags.into();
        self
    }

    pub fn with_replacement_flags(mut self, flags: impl Into<String>) -> Self {
        self.replacement_flags = flags.into();
        self
    }

    /// True when the replacement flags are exactly `x`: matches are removed
    /// and the replacement text is ignored.
    pub fn deletes(&self) -> bool {
        self.replacement_flags == DELETE_FLAG
    }

    /// Render the rule back into its textual unit form.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"{}->\"{}\"{}", self.pattern, self.pattern_flags, self.replacement, self.replacement_flags)
    }
}

/// An ordered sequence of rules. Later rules see the output of earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a rule-definition blob. See [`parse_rules`].
    pub fn parse(text: &str) -> Self {
        parse_rules(text)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        RuleSet { rules: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// --- Replacement log ---------------------------------------------------------

/// Audit entry for one rule pass that matched at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Zero-based position of the rule in its [`RuleSet`].
    pub rule_index: usize,
    pub match_count: usize,
    /// The rule as applied, in rule-file form. For the capitalized pass of
    /// preserve-case mode this is the capitalized variant.
    pub rule_description: String,
}

/// Ordered audit trail of an [`apply`] run. Never affects the result text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplacementLog {
    entries: Vec<LogEntry>,
}

impl ReplacementLog {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of matches over every logged pass.
    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|e| e.match_count).sum()
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

impl fmt::Display for ReplacementLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "#{} ({}x): {}", entry.rule_index + 1, entry.match_count, entry.rule_description)?;
        }
        Ok(())
    }
}
