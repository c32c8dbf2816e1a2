//! Rule parsing and replacement engine.
//!
//! ## How the parts work together
//!
//! ```text
//! rule text ── parse_rules ──▶ RuleSet                    (grammar.rs)
//!                                │
//!                                │  for each rule, in order
//!                                v
//!                   CompiledRule::new                    (compiled_rule.rs)
//!                     - flag letters -> inline flags
//!                     - whole-word wrapping
//!                     - back-reference rewriting
//!                                │
//!                                v
//! subject ───────────▶ run_pass (count, log, replace_all) (replacer.rs)
//!                                │   (+ capitalized pass in preserve-case mode)
//!                                v
//!                  RunMetrics { result, log, passes }     (metrics.rs)
//! ```
//!
//! Parsing is pure and infallible. Compilation is where user mistakes surface
//! (bad regex, unknown flag) and they are returned as errors, never skipped.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events: one `debug` event per parse and per run,
//! one `trace` event per productive pass. Run the CLI with
//! `RULEPAD_LOG=rulepad=trace` to see them.

#[path = "engine/compiled_rule.rs"]
mod compiled_rule;
#[path = "engine/grammar.rs"]
mod grammar;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/replacer.rs"]
mod replacer;

pub(crate) use compiled_rule::upper_first;
pub use grammar::parse_rules;
pub use metrics::{PassMetrics, RunMetrics};
pub use replacer::{apply, apply_verbose};
