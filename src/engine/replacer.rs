//! Sequential rule application.
//!
//! Rules run as independent passes over the whole subject, in set order:
//!
//! ```text
//! subject ── rule 0 ──▶ s1 ── rule 1 ──▶ s2 ── ... ──▶ result
//!              │                 │
//!              └─ (preserve case: "Rule 0" pass right after rule 0)
//! ```
//!
//! A later rule can therefore match text an earlier rule produced
//! (`"a"->"b"` then `"b"->"c"` turns `a` into `c`). The passes are never fused
//! into one combined regex.
//!
//! Every pass compiles its own regex and walks matches with an iterator, so no
//! match cursor survives between passes or between runs.

use super::compiled_rule::{CompiledRule, Variant};
use super::metrics::{PassMetrics, RunMetrics};
use crate::{LogEntry, Options, ReplaceResult, ReplacementLog, Result, RuleSet};
use std::time::Instant;
use tracing::{debug, trace};

/// Apply `rules` to `subject` and return the result text plus audit log.
///
/// The log is empty unless `options.log` is set.
///
/// # Errors
///
/// Fails on the first rule whose pattern does not compile or whose flags are
/// not supported. Rules before it are not partially applied to any output.
pub fn apply(rules: &RuleSet, subject: &str, options: &Options) -> Result<ReplaceResult> {
    let run = apply_verbose(rules, subject, options)?;
    Ok(ReplaceResult { result: run.result, log: run.log })
}

/// Like [`apply`] but also returns per-pass metrics.
///
/// # Errors
///
/// Same as [`apply`].
pub fn apply_verbose(rules: &RuleSet, subject: &str, options: &Options) -> Result<RunMetrics> {
    let total_start = Instant::now();
    let mut current = subject.to_string();
    let mut log = ReplacementLog::default();
    let mut passes = Vec::with_capacity(rules.len() * if options.preserve_case { 2 } else { 1 });

    for (index, rule) in rules.iter().enumerate() {
        let compiled = CompiledRule::new(index, rule, Variant::AsWritten, options.whole_words)?;
        current = run_pass(index, Variant::AsWritten, &compiled, current, options, &mut log, &mut passes);

        if options.preserve_case {
            let compiled = CompiledRule::new(index, rule, Variant::Capitalized, options.whole_words)?;
            current = run_pass(index, Variant::Capitalized, &compiled, current, options, &mut log, &mut passes);
        }
    }

    let total = total_start.elapsed();
    debug!(rules = rules.len(), passes = passes.len(), logged = log.len(), ?total, "rule run finished");

    Ok(RunMetrics { result: current, log, passes, total })
}

fn run_pass(
    index: usize,
    variant: Variant,
    compiled: &CompiledRule,
    subject: String,
    options: &Options,
    log: &mut ReplacementLog,
    passes: &mut Vec<PassMetrics>,
) -> String {
    let start = Instant::now();
    let matches = compiled.regex.find_iter(&subject).count();

    if matches == 0 {
        passes.push(PassMetrics::new(index, variant, 0, start.elapsed()));
        return subject;
    }

    if options.log {
        log.push(LogEntry { rule_index: index, match_count: matches, rule_description: compiled.description.clone() });
    }

    let replaced = compiled.regex.replace_all(&subject, compiled.replacement.as_str()).into_owned();
    trace!(rule = index, ?variant, matches, rule_text = %compiled.description, "rule pass replaced");
    passes.push(PassMetrics::new(index, variant, matches, start.elapsed()));
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Rule, parse_rules};
    use rstest::rstest;
    use std::time::Duration;

    fn run(rule_text: &str, subject: &str, options: &Options) -> String {
        apply(&parse_rules(rule_text), subject, options).unwrap().result
    }

    #[test]
    fn rules_see_output_of_earlier_rules() {
        assert_eq!(run("\"a\"->\"b\"\n\"b\"->\"c\"", "a", &Options::default()), "c");
    }

    #[test]
    fn replacement_is_global_across_lines() {
        assert_eq!(run(r#""^- "->"* ""#, "- one\n- two\n- three", &Options::default()), "* one\n* two\n* three");
    }

    #[test]
    fn explicit_flags_replace_the_default_set() {
        // Without `m`, `^` only anchors at the start of the subject.
        assert_eq!(run(r#""^- "g->"* ""#, "- one\n- two", &Options::default()), "* one\n- two");
        assert_eq!(run(r#""CAT"i->"dog""#, "Cat cat CAT", &Options::default()), "dog dog dog");
    }

    #[rstest]
    #[case("category", "category")]
    #[case("a cat sat", "a dog sat")]
    #[case("cat", "dog")]
    #[case("concat cat.", "concat dog.")]
    fn whole_words_never_partial_match(#[case] subject: &str, #[case] expected: &str) {
        let options = Options::default().whole_words(true);
        assert_eq!(run(r#""cat"->"dog""#, subject, &options), expected);
    }

    #[test]
    fn without_whole_words_partial_matches_are_replaced() {
        assert_eq!(run(r#""cat"->"dog""#, "category", &Options::default()), "dogegory");
    }

    #[test]
    fn deletion_flag_removes_matches() {
        assert_eq!(run(r#""\s*\(um\)"->"whatever"x"#, "so (um) yes (um)", &Options::default()), "so yes");
    }

    #[test]
    fn flag_other_than_exactly_x_substitutes() {
        assert_eq!(run(r#""um"->"uh"xg"#, "um", &Options::default()), "uh");
    }

    #[test]
    fn back_references_use_rule_file_syntax() {
        assert_eq!(run(r#""(\w+), (\w+)"->"$2 $1""#, "Doe, Jane", &Options::default()), "Jane Doe");
        assert_eq!(run(r#""(\d)"->"$1st""#, "1", &Options::default()), "1st");
    }

    #[test]
    fn references_to_missing_groups_stay_literal() {
        assert_eq!(run(r#""cost"->"cost $0""#, "cost", &Options::default()), "cost $0");
        assert_eq!(run(r#""(a)"->"[$3]""#, "a", &Options::default()), "[$3]");
        assert_eq!(run(r#""(a)"->"$12""#, "a", &Options::default()), "a2");
    }

    #[test]
    fn preserve_case_adds_capitalized_pass() {
        let options = Options::default().whole_words(true).preserve_case(true);
        assert_eq!(run(r#""findest"->"finde""#, "Du findest das.", &options), "Du finde das.");
        assert_eq!(run(r#""findest"->"finde""#, "Findest du das?", &options), "Finde du das?");
    }

    #[test]
    fn preserve_case_only_covers_first_letter() {
        // All-caps and mid-word capitals are a known limitation of the mode.
        let options = Options::default().preserve_case(true);
        assert_eq!(run(r#""hello"->"bye""#, "hello Hello HELLO hEllo", &options), "bye Bye HELLO hEllo");
    }

    #[test]
    fn without_preserve_case_capitalized_words_are_untouched() {
        let options = Options::default().whole_words(true);
        assert_eq!(run(r#""findest"->"finde""#, "Findest du das?", &options), "Findest du das?");
    }

    #[test]
    fn empty_pattern_matches_at_every_position() {
        let out = apply(&parse_rules(r#"""->"-""#), "ab", &Options::default().log(true)).unwrap();
        assert_eq!(out.result, "-a-b-");
        assert_eq!(out.log.entries()[0].match_count, 3);
    }

    #[test]
    fn log_records_only_passes_that_matched() {
        let rules = parse_rules("\"a\"->\"b\"\n\"zzz\"->\"y\"\n\"b\"->\"c\"");
        let ReplaceResult { result, log } = apply(&rules, "a a", &Options::default().log(true)).unwrap();
        assert_eq!(result, "c c");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], LogEntry { rule_index: 0, match_count: 2, rule_description: r#""a"->"b""#.into() });
        assert_eq!(log.entries()[1].rule_index, 2);
        assert_eq!(log.total_matches(), 4);
    }

    #[test]
    fn log_disabled_yields_empty_log_and_same_result() {
        let rules = parse_rules(r#""x"->"y""#);
        let with_log = apply(&rules, "xx", &Options::default().log(true)).unwrap();
        let without_log = apply(&rules, "xx", &Options::default()).unwrap();
        assert_eq!(with_log.result, without_log.result);
        assert!(!with_log.log.is_empty());
        assert!(without_log.log.is_empty());
    }

    #[test]
    fn log_renders_one_line_per_entry() {
        let rules = parse_rules(r#""du"->"ich""#);
        let options = Options::default().whole_words(true).preserve_case(true).log(true);
        let out = apply(&rules, "Du und du", &options).unwrap();
        assert_eq!(out.result, "Ich und ich");
        assert_eq!(out.log.to_string(), "#1 (1x): \"du\"->\"ich\"\n#1 (1x): \"Du\"->\"Ich\"\n");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let rules = RuleSet::from(vec![Rule::new("ok", "fine"), Rule::new("(broken", "x")]);
        let err = apply(&rules, "ok", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { index: 1, .. }));
    }

    #[test]
    fn unsupported_flag_is_an_error() {
        let err = apply(&parse_rules(r#""a"y->"b""#), "a", &Options::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownFlag { index: 0, flag: 'y' }));
    }

    #[test]
    fn repeated_runs_are_independent() {
        let rules = parse_rules(r#""o"->"0""#);
        for _ in 0..3 {
            assert_eq!(apply(&rules, "foo boo", &Options::default()).unwrap().result, "f00 b00");
        }
    }

    #[test]
    fn verbose_run_records_every_pass() {
        let rules = parse_rules("\"a\"->\"b\"\n\"q\"->\"r\"");
        let run = apply_verbose(&rules, "aa", &Options::default().preserve_case(true)).unwrap();
        assert_eq!(run.result, "bb");
        assert_eq!(run.passes.len(), 4);
        assert_eq!(run.passes[0].matches, 2);
        assert!(run.passes[1].capitalized);
        assert_eq!(run.productive_passes().count(), 1);
        assert!(run.total >= run.passes.iter().map(|p| p.duration).sum::<Duration>());
    }

    #[test]
    fn empty_rule_set_returns_subject_unchanged() {
        assert_eq!(apply(&RuleSet::default(), "keep", &Options::default()).unwrap().result, "keep");
    }
}
