//! German second person -> first person ("du" -> "ich").
//!
//! Swaps pronouns, possessives and the common conjugated verb forms so a
//! question like "Hast du deine Notizen?" becomes "Habe ich meine Notizen?".
//! Rules are written in lowercase and run in whole-word, preserve-case mode:
//! the capitalized pass covers sentence-initial words.

use crate::{Options, Result, RuleSet, apply, parse_rules};
use once_cell::sync::Lazy;

/// The embedded rule text.
pub const DU2ICH_RULES: &str = r#"
# pronouns
"du"->"ich"
"dich"->"mich"
"dir"->"mir"

# possessives
"dein"->"mein"
"deine"->"meine"
"deinen"->"meinen"
"deinem"->"meinem"
"deiner"->"meiner"
"deines"->"meines"

# sein, haben, werden
"bist"->"bin"
"warst"->"war"
"wärst"->"wäre"
"hast"->"habe"
"hattest"->"hatte"
"hättest"->"hätte"
"wirst"->"werde"
"würdest"->"würde"

# modal verbs
"kannst"->"kann"
"konntest"->"konnte"
"könntest"->"könnte"
"willst"->"will"
"wolltest"->"wollte"
"musst"->"muss"
"musstest"->"musste"
"müsstest"->"müsste"
"sollst"->"soll"
"solltest"->"sollte"
"darfst"->"darf"
"dürftest"->"dürfte"
"magst"->"mag"
"möchtest"->"möchte"
"weißt"->"weiß"

# regular present tense
"arbeitest"->"arbeite"
"bleibst"->"bleibe"
"brauchst"->"brauche"
"denkst"->"denke"
"erinnerst"->"erinnere"
"findest"->"finde"
"fragst"->"frage"
"freust"->"freue"
"fühlst"->"fühle"
"gehst"->"gehe"
"glaubst"->"glaube"
"hörst"->"höre"
"kennst"->"kenne"
"kommst"->"komme"
"lernst"->"lerne"
"liegst"->"liege"
"machst"->"mache"
"sagst"->"sage"
"spielst"->"spiele"
"stehst"->"stehe"
"suchst"->"suche"
"verstehst"->"verstehe"

# stem-changing present tense
"fährst"->"fahre"
"gibst"->"gebe"
"hältst"->"halte"
"hilfst"->"helfe"
"isst"->"esse"
"lässt"->"lasse"
"läufst"->"laufe"
"liest"->"lese"
"nimmst"->"nehme"
"schläfst"->"schlafe"
"siehst"->"sehe"
"sprichst"->"spreche"
"trägst"->"trage"
"triffst"->"treffe"
"vergisst"->"vergesse"
"#;

static DU2ICH: Lazy<RuleSet> = Lazy::new(|| parse_rules(DU2ICH_RULES));

/// Parsed form of [`DU2ICH_RULES`].
pub fn rule_set() -> &'static RuleSet {
    &DU2ICH
}

/// Rewrite `text` from second to first person.
///
/// # Errors
///
/// Only fails if the embedded rules stop compiling, which the tests guard.
pub fn du2ich(text: &str) -> Result<String> {
    let options = Options::default().whole_words(true).preserve_case(true);
    Ok(apply(rule_set(), text, &options)?.result)
}

#[cfg(test)]
mod tests;
