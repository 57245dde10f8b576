//! Verse segmentation and pagination over a song's lyric body
//!
//! Lyrics are stored with verses separated by a blank line. The delimiter is
//! part of the storage format: splitting on it and joining with it must give
//! back the original text, so no trimming or empty-verse filtering happens
//! here.

use serde::Serialize;

/// Separator between two verses in stored lyrics.
pub const VERSE_DELIMITER: &str = "\n\n";

/// Split lyrics into verses. Empty text is a single empty verse.
pub fn segment(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Inverse of [`segment`].
pub fn join<S: AsRef<str>>(verses: &[S]) -> String {
    verses
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(VERSE_DELIMITER)
}

/// Up to `limit` verses starting at `offset`.
///
/// An offset at or past the end yields an empty page rather than an error,
/// and a limit reaching past the end is clamped to what remains.
pub fn slice<T: Clone>(verses: &[T], limit: usize, offset: usize) -> Vec<T> {
    if offset >= verses.len() {
        return Vec::new();
    }

    let end = offset.saturating_add(limit).min(verses.len());
    verses[offset..end].to_vec()
}

/// The verse at a 1-based `index`, or an empty string when the index is
/// outside `1..=verses`.
pub fn verse_at(text: &str, index: i64) -> String {
    if index < 1 {
        return String::new();
    }

    usize::try_from(index - 1)
        .ok()
        .and_then(|i| segment(text).get(i).map(|verse| verse.to_string()))
        .unwrap_or_default()
}

/// Normalized page bounds for a verse read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerseRange {
    pub limit: usize,
    pub offset: usize,
}

impl VerseRange {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Apply this range to `text`, returning owned verses.
    pub fn apply(&self, text: &str) -> Vec<String> {
        slice(&segment(text), self.limit, self.offset)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for VerseRange {
    fn default() -> Self {
        Self {
            limit: crate::core::filter::DEFAULT_LIMIT as usize,
            offset: 0,
        }
    }
}
