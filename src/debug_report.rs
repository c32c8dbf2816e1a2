use rulepad::{PassMetrics, ReplaceDetails};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print a run report to stderr; stdout stays reserved for the result text.
pub fn print_run(input: &str, details: &ReplaceDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    eprintln!("\n{}", palette.bold(palette.paint(format!("⚙  Replacing in: \"{}\"", preview(input)), ansi::CYAN)));

    eprintln!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if details.rules.is_empty() {
        eprintln!("{}", palette.dim("  No rules parsed"));
        eprintln!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        eprintln!("  • Pattern or replacement is missing its closing quote");
        eprintln!("  • The arrow is not written as ->");
        eprintln!("  • Flags contain uppercase letters or digits");
    } else {
        for (idx, rule) in details.rules.iter().enumerate() {
            eprintln!("  {} {}", palette.paint(format!("[{}]", idx + 1), ansi::GRAY), palette.paint(rule.describe(), ansi::BLUE));
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    print_passes(&details.run.passes, &palette);

    eprintln!("\n{}", palette.paint("━━━ Log ━━━", ansi::GRAY));
    if details.run.log.is_empty() {
        eprintln!("{}", palette.dim("  Nothing replaced"));
    } else {
        for entry in details.run.log.entries() {
            eprintln!(
                "  {} {} {}",
                palette.paint(format!("#{}", entry.rule_index + 1), ansi::GRAY),
                palette.bold(palette.paint(format!("{}x", entry.match_count), ansi::GREEN)),
                palette.paint(&entry.rule_description, ansi::CYAN),
            );
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    eprintln!(
        "  Parse: {}  │  Replace: {}  │  Passes: {}",
        palette.dim(format!("{:?}", details.parse)),
        palette.paint(format!("{:?}", details.run.total), ansi::GREEN),
        palette.paint(details.run.passes.len().to_string(), ansi::YELLOW),
    );
    eprintln!();
}

fn print_passes(passes: &[PassMetrics], palette: &ansi::Palette) {
    if passes.is_empty() {
        eprintln!("{}", palette.dim("  No passes run"));
        return;
    }

    for pass in passes {
        let label = if pass.capitalized {
            format!("Rule {} (Capitalized):", pass.rule_index + 1)
        } else {
            format!("Rule {}:", pass.rule_index + 1)
        };

        eprintln!(
            "  {} {}  {}",
            palette.paint(label, ansi::BLUE),
            if pass.matches > 0 {
                palette.paint(format!("✓ {} matches", pass.matches), ansi::GREEN)
            } else {
                palette.dim("✗ 0 matches")
            },
            palette.dim(format!("{:?}", pass.duration)),
        );
    }
}

fn preview(input: &str) -> String {
    let mut short: String = input.chars().take(60).collect();
    if short.len() < input.len() {
        short.push('…');
    }
    short.replace('\n', "⏎")
}
