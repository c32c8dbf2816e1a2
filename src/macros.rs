/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Only for patterns written in this crate. User-supplied rule patterns are
/// compiled fresh on every engine run.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
