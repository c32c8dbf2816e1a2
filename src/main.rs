mod debug_report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rulepad::{
    DEFAULT_DELIMITER, DelimiterSearch, Options, SentenceCapitalizer, du2ich, replace_verbose, utf16_to_byte_offset,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rulepad", version, about = "Rule-based text replacement for note scratchpads.")]
#[command(after_help = "Exit codes:\n  0  Success.\n  1  Rule or pattern error.\n  2  Invalid arguments or missing input.\n\n\
Set RULEPAD_LOG (e.g. RULEPAD_LOG=rulepad=debug) for diagnostics on stderr.")]
struct Cli {
    /// Force ANSI color in reports.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in reports.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a rule file to the input.
    Replace(ReplaceArgs),
    /// Rewrite German second person into first person.
    Du2ich(InputArgs),
    /// Upper-case the first letter of every sentence.
    Capitalize(CapitalizeArgs),
    /// Find, crop or delete the note around a cursor.
    Note(NoteArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Input text. Read from stdin when omitted.
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Debug, Args)]
struct ReplaceArgs {
    /// Rule file with `"pattern"flags->"replacement"flags` units.
    #[arg(short, long)]
    rules: PathBuf,

    /// Only replace whole words.
    #[arg(short, long)]
    whole_words: bool,

    /// Also apply every rule with its first letter capitalized.
    #[arg(short, long)]
    preserve_case: bool,

    /// Print the replacement log to stderr.
    #[arg(long)]
    log: bool,

    /// Capitalize sentences after replacing.
    #[arg(short, long)]
    capitalize: bool,

    /// Print a run report (rules, passes, timing) to stderr.
    #[arg(long)]
    report: bool,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct CapitalizeArgs {
    /// Custom sentence-end regex.
    #[arg(long)]
    pattern: Option<String>,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NoteAction {
    /// Print `left right` byte offsets.
    Span,
    /// Print only the note around the cursor.
    Crop,
    /// Print the text with the note removed.
    Delete,
}

#[derive(Debug, Args)]
struct NoteArgs {
    /// Cursor offset into the input.
    #[arg(long)]
    cursor: usize,

    /// Interpret --cursor as UTF-16 code units instead of bytes.
    #[arg(long)]
    utf16: bool,

    /// Note delimiter; `\n` is read as a line break.
    #[arg(long, default_value_t = DEFAULT_DELIMITER.escape_default().to_string())]
    delimiter: String,

    #[arg(long, value_enum, default_value_t = NoteAction::Crop)]
    action: NoteAction,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("error: failed to read {what}: {source}")]
    Read {
        what: String,
        #[source]
        source: io::Error,
    },
    #[error("error: no input provided")]
    NoInput,
    #[error("error: {0}")]
    Rules(#[from] rulepad::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Rules(_) => ExitCode::from(1),
            CliError::Read { .. } | CliError::NoInput => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RULEPAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stderr().is_terminal()
    };

    match cli.command {
        Command::Replace(args) => {
            let rule_text = std::fs::read_to_string(&args.rules)
                .map_err(|source| CliError::Read { what: args.rules.display().to_string(), source })?;
            let input = read_input(args.input)?;
            let options = Options::default()
                .whole_words(args.whole_words)
                .preserve_case(args.preserve_case)
                .log(args.log || args.report);

            let details = replace_verbose(&rule_text, &input, &options)?;
            let mut output = details.run.result.clone();
            if args.capitalize {
                output = SentenceCapitalizer::default().capitalize(&output);
            }

            if args.report {
                debug_report::print_run(&input, &details, color);
            } else if args.log {
                eprint!("{}", details.run.log);
            }
            print!("{output}");
        }
        Command::Du2ich(input) => {
            let input = read_input(input)?;
            print!("{}", du2ich(&input)?);
        }
        Command::Capitalize(args) => {
            let capitalizer = match &args.pattern {
                Some(pattern) => SentenceCapitalizer::new(pattern)?,
                None => SentenceCapitalizer::default(),
            };
            let input = read_input(args.input)?;
            print!("{}", capitalizer.capitalize(&input));
        }
        Command::Note(args) => {
            let input = read_input(args.input)?;
            let search = DelimiterSearch::new(args.delimiter.replace("\\n", "\n"))?;
            let cursor = if args.utf16 { utf16_to_byte_offset(&input, args.cursor) } else { args.cursor };
            let span = search.span(&input, cursor);

            match args.action {
                NoteAction::Span => println!("{} {}", span.left, span.right),
                NoteAction::Crop => print!("{}", &input[span.range()]),
                NoteAction::Delete => {
                    print!("{}", DelimiterSearch::delete_note(&input, span.left, span.right, search.delimiter()))
                }
            }
        }
    }
    Ok(())
}

fn read_input(args: InputArgs) -> Result<String, CliError> {
    if let Some(input) = args.input {
        return Ok(input);
    }
    if io::stdin().is_terminal() {
        return Err(CliError::NoInput);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| CliError::Read { what: "stdin".to_string(), source })?;
    Ok(buffer)
}
