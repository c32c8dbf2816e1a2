pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule pattern the regex engine refuses to compile. The run stops here;
    /// the rule is never skipped.
    #[error("rule {} has an invalid pattern {pattern:?}: {source}", .index + 1)]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {} uses unsupported pattern flag '{flag}'", .index + 1)]
    UnknownFlag { index: usize, flag: char },

    #[error("note delimiter must not be empty")]
    EmptyDelimiter,

    #[error("invalid sentence-end pattern: {0}")]
    InvalidSentencePattern(#[source] regex::Error),
}
