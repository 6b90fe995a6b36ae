//! Journal search and form helpers.

use bloom_api_models::{Album, Note};
use thiserror::Error;

/// Journal tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JournalTab {
    /// Album grid.
    #[default]
    Albums,
    /// Note list.
    Notes,
}

impl JournalTab {
    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Albums => "Photo Albums",
            Self::Notes => "Notes",
        }
    }
}

/// Validation failures for the journal forms.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JournalInputError {
    /// Album form submitted without a title.
    #[error("Album title is required")]
    MissingAlbumTitle,
    /// Note form submitted without a title or body.
    #[error("Note title and content are required")]
    MissingNoteFields,
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Whether an album matches a search query (title or description).
#[must_use]
pub fn album_matches(album: &Album, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || contains_folded(&album.title, &needle)
        || album
            .description
            .as_deref()
            .is_some_and(|description| contains_folded(description, &needle))
}

/// Whether a note matches a search query (title, content, or any tag).
#[must_use]
pub fn note_matches(note: &Note, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || contains_folded(&note.title, &needle)
        || contains_folded(&note.content, &needle)
        || note.tags.iter().any(|tag| contains_folded(tag, &needle))
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into the comma-separated form field.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
