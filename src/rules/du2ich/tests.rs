use super::*;
use crate::Options;

#[test]
fn embedded_rules_all_parse_and_compile() {
    let rules = rule_set();
    assert_eq!(rules.len(), DU2ICH_RULES.matches("->").count());
    // Compiling happens inside apply; an empty subject still compiles every rule.
    assert!(apply(rules, "", &Options::default().whole_words(true).preserve_case(true)).is_ok());
}

#[test]
fn du2ich_examples() {
    let cases: Vec<(&str, &str)> = vec![
        ("Du findest das.", "Ich finde das."),
        ("Findest du das?", "Finde ich das?"),
        ("Hast du deine Notizen?", "Habe ich meine Notizen?"),
        ("Kannst du dir das merken?", "Kann ich mir das merken?"),
        ("Du bist müde, weil du zu viel arbeitest.", "Ich bin müde, weil ich zu viel arbeite."),
        ("Weißt du, was du willst?", "Weiß ich, was ich will?"),
        ("Siehst du deinen Fehler?", "Sehe ich meinen Fehler?"),
        ("Ich freue mich für dich.", "Ich freue mich für mich."),
        ("Du fährst zu deinem Bruder.", "Ich fahre zu meinem Bruder."),
        ("Vergisst du nie etwas?", "Vergesse ich nie etwas?"),
    ];

    for (input, expected) in cases {
        assert_eq!(du2ich(input).unwrap(), expected, "input: {input}");
    }
}

#[test]
fn only_whole_words_are_swapped() {
    assert_eq!(du2ich("Dusche, Dune, Kandidat, dienst").unwrap(), "Dusche, Dune, Kandidat, dienst");
    assert_eq!(du2ich("Bistro und Gastwirt").unwrap(), "Bistro und Gastwirt");
}

#[test]
fn all_caps_words_are_left_alone() {
    // Preserve-case only adds a first-letter-capitalized pass.
    assert_eq!(du2ich("DU BIST DA").unwrap(), "DU BIST DA");
}

#[test]
fn text_without_second_person_is_unchanged() {
    let text = "Ich gehe heute früh schlafen.";
    assert_eq!(du2ich(text).unwrap(), text);
}
