//! Delimiter-bounded note search.
//!
//! The editor keeps every note in one large text, separated by a fixed
//! delimiter:
//!
//! ```text
//! first note)))---(((\nsecond note)))---(((\nthird note
//! ^         ^                     ^
//! 0         left/right of note 1  ...
//! ```
//!
//! A note span is never stored. It is recomputed from the current text and a
//! reference offset (the cursor) every time it is needed, and it always
//! satisfies `0 <= left <= cursor <= right <= text.len()` for a cursor
//! outside any delimiter.
//!
//! Offsets are byte offsets into the `str`. Offsets past the end or inside a
//! multi-byte character are clamped down to the nearest char boundary. A
//! cursor strictly inside a delimiter is moved to the start of that
//! delimiter, so it belongs to the note before it.

use crate::{Error, Result};
use std::ops::Range;
use tracing::debug;

/// The separator the editor inserts for "new note".
pub const DEFAULT_DELIMITER: &str = ")))---(((\n";

/// Half-open byte range `[left, right)` of one note inside a host text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteSpan {
    pub left: usize,
    pub right: usize,
}

impl NoteSpan {
    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }

    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }
}

/// Finds note boundaries for one fixed delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSearch {
    delimiter: String,
}

impl Default for DelimiterSearch {
    fn default() -> Self {
        DelimiterSearch { delimiter: DEFAULT_DELIMITER.to_string() }
    }
}

impl DelimiterSearch {
    /// # Errors
    ///
    /// Returns [`Error::EmptyDelimiter`] for `""`: an empty delimiter would
    /// occur at every offset and no note could be delimited.
    pub fn new(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(Error::EmptyDelimiter);
        }
        Ok(DelimiterSearch { delimiter })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Start of the note containing `start_index`.
    ///
    /// This is the offset just past the nearest delimiter that ends at or
    /// before `start_index`, or 0 when there is none. When `start_index` sits
    /// at the start of a delimiter or inside one, that delimiter is not
    /// considered: the cursor belongs to the note before it.
    pub fn left_index(&self, text: &str, start_index: usize) -> usize {
        let start = self.snap_offset(text, start_index);
        if start == 0 {
            return 0;
        }
        // Searching only `text[..start]` skips a delimiter that begins at `start`.
        text[..start].rfind(self.delimiter.as_str()).map_or(0, |pos| pos + self.delimiter.len())
    }

    /// End of the note containing `start_index`: the start of the nearest
    /// delimiter at or after it (or around it), or `text.len()` when there is
    /// none.
    pub fn right_index(&self, text: &str, start_index: usize) -> usize {
        let start = self.snap_offset(text, start_index);
        text[start..].find(self.delimiter.as_str()).map_or(text.len(), |pos| start + pos)
    }

    /// Clamp `offset` and, when it falls strictly inside a delimiter, move it
    /// to that delimiter's start.
    fn snap_offset(&self, text: &str, offset: usize) -> usize {
        let start = clamp_offset(text, offset);
        let reach = start.saturating_sub(self.delimiter.len() - 1);
        (reach..start)
            .filter(|&pos| text.is_char_boundary(pos))
            .find(|&pos| text[pos..].starts_with(self.delimiter.as_str()))
            .unwrap_or(start)
    }

    /// Both boundaries of the note around `cursor`.
    pub fn span(&self, text: &str, cursor: usize) -> NoteSpan {
        let span = NoteSpan { left: self.left_index(text, cursor), right: self.right_index(text, cursor) };
        debug!(cursor, left = span.left, right = span.right, "note span");
        span
    }

    /// Remove the note around `cursor` from `text`. See [`Self::delete_note`].
    pub fn delete_at(&self, text: &str, cursor: usize) -> String {
        let span = self.span(text, cursor);
        Self::delete_note(text, span.left, span.right, &self.delimiter)
    }

    /// Remove `input[left..right]` and tidy up the delimiters around the hole.
    ///
    /// - If nothing but two delimiters is left, the result is `""`.
    /// - A doubled delimiter formed where the note used to be collapses into one.
    /// - A single leading and a single trailing delimiter are stripped, so the
    ///   result never starts or ends with an orphan separator.
    ///
    /// With an empty `delimiter` only the removal happens.
    pub fn delete_note(input: &str, left: usize, right: usize, delimiter: &str) -> String {
        let left = clamp_offset(input, left);
        let right = clamp_offset(input, right).max(left);
        let head = &input[..left];
        let mut tail = &input[right..];

        if delimiter.is_empty() {
            return format!("{head}{tail}");
        }

        if head.len() + tail.len() == 2 * delimiter.len()
            && format!("{head}{tail}").strip_prefix(delimiter).is_some_and(|rest| rest == delimiter)
        {
            debug!(left, right, "note deletion left only delimiters");
            return String::new();
        }

        if head.ends_with(delimiter) && tail.starts_with(delimiter) {
            tail = &tail[delimiter.len()..];
        }

        let joined = format!("{head}{tail}");
        let mut result = joined.as_str();
        if let Some(rest) = result.strip_prefix(delimiter) {
            result = rest;
        }
        if let Some(rest) = result.strip_suffix(delimiter) {
            result = rest;
        }

        debug!(left, right, removed = right - left, "note deleted");
        result.to_string()
    }
}

/// Clamp `offset` into `text` and move it down onto a char boundary.
pub(crate) fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
