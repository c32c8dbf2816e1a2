//! Rule-file grammar.
//!
//! A rule file is a loose sequence of units:
//!
//! ```text
//! "PATTERN"flags->"REPLACEMENT"flags
//! ```
//!
//! The arrow may sit on its own line (a single line break is allowed on either
//! side of it). Anything between units that does not itself form a unit is
//! skipped, which makes blank lines and free-form comments legal. Trailing
//! garbage is ignored, so parsing never fails: a half-typed rule simply does
//! not show up yet.
//!
//! Both captures are non-greedy and the scan runs in dot-all + multi-line mode,
//! so a pattern or replacement may span several lines and may contain `->`.

use crate::{Rule, RuleSet};
use tracing::debug;

/// Parse `text` into a [`RuleSet`], keeping source order.
///
/// ```
/// let rules = rulepad::parse_rules("\"a\"->\"b\"\n\n\"c\"i->\"\"x\n");
/// assert_eq!(rules.len(), 2);
/// assert!(rules.rules()[1].deletes());
/// ```
pub fn parse_rules(text: &str) -> RuleSet {
    let grammar = regex!(r#"(?sm)"(.*?)"([a-z]*)(?:\r?\n)?->(?:\r?\n)?"(.*?)"([a-z]*)(?:\r?\n)?"#);

    let rules: RuleSet = grammar
        .captures_iter(text)
        .map(|caps| Rule {
            pattern: capture(&caps, 1),
            pattern_flags: capture(&caps, 2),
            replacement: capture(&caps, 3),
            replacement_flags: capture(&caps, 4),
        })
        .collect();

    debug!(rules = rules.len(), bytes = text.len(), "parsed rule text");
    rules
}

fn capture(caps: &regex::Captures<'_>, group: usize) -> String {
    caps.get(group).map(|m| m.as_str().to_string()).unwrap_or_default()
}
