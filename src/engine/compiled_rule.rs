//! Turning a parsed [`Rule`] into something the replacer can run.
//!
//! Rule files follow the conventions of regex-pipeline plugins written for
//! JavaScript engines: single-letter flags after the closing quote and `$1`
//! style back-references. This module maps those conventions onto the `regex`
//! crate:
//!
//! - flag letters become inline flags (`(?ims)`) on the effective pattern,
//! - whole-word mode wraps the pattern in `\b(?:...)\b`,
//! - back-references are rewritten into the braced `${N}` form.
//!
//! A `CompiledRule` is built fresh for every pass of every run and dropped
//! right after. Nothing compiled here outlives a call to `apply`.

use crate::{Error, Result, Rule};
use regex::Regex;

bitflags::bitflags! {
    /// Pattern-side flags understood by the engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternFlags: u8 {
        /// `g`. Replacement is always global; accepted for compatibility.
        const GLOBAL      = 1 << 0;
        /// `i`
        const IGNORE_CASE = 1 << 1;
        /// `m`: `^`/`$` match at line breaks.
        const MULTI_LINE  = 1 << 2;
        /// `s`: `.` matches `\n`.
        const DOT_ALL     = 1 << 3;
        /// `u`. Unicode matching is always on; accepted for compatibility.
        const UNICODE     = 1 << 4;
    }
}

impl PatternFlags {
    /// Flags used when a rule carries none: global, multi-line.
    pub const DEFAULT: PatternFlags = PatternFlags::GLOBAL.union(PatternFlags::MULTI_LINE);

    /// Interpret flag letters. Returns the first unsupported letter on failure.
    pub fn from_letters(letters: &str) -> std::result::Result<Self, char> {
        if letters.is_empty() {
            return Ok(Self::DEFAULT);
        }
        letters.chars().try_fold(PatternFlags::empty(), |flags, c| {
            let flag = match c {
                'g' => PatternFlags::GLOBAL,
                'i' => PatternFlags::IGNORE_CASE,
                'm' => PatternFlags::MULTI_LINE,
                's' => PatternFlags::DOT_ALL,
                'u' => PatternFlags::UNICODE,
                other => return Err(other),
            };
            Ok(flags | flag)
        })
    }

    /// Inline-flag prefix for the `regex` crate, e.g. `(?im)`.
    fn inline_prefix(self) -> String {
        let mut letters = String::new();
        if self.contains(PatternFlags::IGNORE_CASE) {
            letters.push('i');
        }
        if self.contains(PatternFlags::MULTI_LINE) {
            letters.push('m');
        }
        if self.contains(PatternFlags::DOT_ALL) {
            letters.push('s');
        }
        if letters.is_empty() { letters } else { format!("(?{letters})") }
    }
}

/// Which textual variant of a rule a pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Pattern and replacement as written.
    AsWritten,
    /// Pattern and replacement with their first letter upper-cased
    /// (second pass of preserve-case mode).
    Capitalized,
}

/// A rule ready to run: compiled regex plus expanded replacement.
#[derive(Debug)]
pub struct CompiledRule {
    pub regex: Regex,
    /// Replacement in `regex` crate syntax; empty for deleting rules.
    pub replacement: String,
    /// The variant in rule-file form, used for log entries.
    pub description: String,
}

impl CompiledRule {
    /// Compile `rule` (at position `index` of its set) for one pass.
    pub fn new(index: usize, rule: &Rule, variant: Variant, whole_words: bool) -> Result<Self> {
        let flags =
            PatternFlags::from_letters(&rule.pattern_flags).map_err(|flag| Error::UnknownFlag { index, flag })?;

        let (pattern, replacement) = match variant {
            Variant::AsWritten => (rule.pattern.clone(), rule.replacement.clone()),
            Variant::Capitalized => (upper_first(&rule.pattern), upper_first(&rule.replacement)),
        };

        let body = if whole_words { format!(r"\b(?:{pattern})\b") } else { pattern.clone() };
        let effective = format!("{}{}", flags.inline_prefix(), body);
        let regex = Regex::new(&effective).map_err(|source| Error::InvalidPattern {
            index,
            pattern: pattern.clone(),
            source,
        })?;

        let description = Rule {
            pattern,
            pattern_flags: rule.pattern_flags.clone(),
            replacement: replacement.clone(),
            replacement_flags: rule.replacement_flags.clone(),
        }
        .describe();

        let replacement = if rule.deletes() { String::new() } else { expand_backrefs(&replacement, &regex) };

        Ok(CompiledRule { regex, replacement, description })
    }
}

/// Upper-case the first character of `s`, leaving the rest untouched.
pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite `$`-references from rule-file syntax into `regex` crate syntax,
/// resolving group numbers against the groups `regex` actually has.
///
/// ```text
/// $1 .. $99   -> ${N}     when group N exists
/// $12         -> ${1}2    when only group 1 exists
/// $0, $3      -> literal  when the group does not exist
/// $&          -> ${0}
/// $<name>     -> ${name}  when the pattern has named groups, else literal
/// $$          -> $$       (literal dollar)
/// $ otherwise -> $$       (literal dollar)
/// ```
///
/// `` $` `` and `$'` (text before and after the match) are not supported and
/// stay literal.
pub(crate) fn expand_backrefs(replacement: &str, regex: &Regex) -> String {
    let groups = regex.captures_len();
    let has_names = regex.capture_names().flatten().next().is_some();
    let mut out = String::with_capacity(replacement.len() + 8);
    let mut rest = replacement;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let digits = after.bytes().take(2).take_while(u8::is_ascii_digit).count();
        let group = (1..=digits)
            .rev()
            .filter_map(|len| after[..len].parse::<usize>().ok().map(|n| (len, n)))
            .find(|&(_, n)| n >= 1 && n < groups);

        if let Some((len, n)) = group {
            out.push_str(&format!("${{{n}}}"));
            rest = &after[len..];
        } else if let Some(tail) = after.strip_prefix('&') {
            out.push_str("${0}");
            rest = tail;
        } else if let Some((name, tail)) =
            after.strip_prefix('<').and_then(|s| s.split_once('>')).filter(|_| has_names)
        {
            out.push_str(&format!("${{{name}}}"));
            rest = tail;
        } else if let Some(tail) = after.strip_prefix('$') {
            out.push_str("$$");
            rest = tail;
        } else {
            out.push_str("$$");
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
