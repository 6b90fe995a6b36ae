//! Journal state.
//!
//! # Design
//! - Albums and notes load independently; one failing leaves the other usable.
//! - Search is a view over the loaded collections, never a remote query.
//! - Album edits only touch metadata; photos are reconciled through their own calls.

use bloom_api_models::{Album, AlbumRequest, Note, NoteRequest, PhotoUpdate};

use crate::features::journal::logic::{
    JournalInputError, JournalTab, album_matches, join_tags, note_matches, parse_tags,
};

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Album create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumForm {
    /// Album title.
    pub title: String,
    /// Album description.
    pub description: String,
    /// Cover image URL or data URI.
    pub cover_photo: String,
}

impl AlbumForm {
    /// Form pre-filled from an album.
    #[must_use]
    pub fn from_album(album: &Album) -> Self {
        Self {
            title: album.title.clone(),
            description: album.description.clone().unwrap_or_default(),
            cover_photo: album.cover_photo.clone().unwrap_or_default(),
        }
    }

    /// Validate the form into a request payload.
    ///
    /// # Errors
    /// Returns [`JournalInputError::MissingAlbumTitle`] for a blank title.
    pub fn request(&self) -> Result<AlbumRequest, JournalInputError> {
        let title = non_empty(&self.title).ok_or(JournalInputError::MissingAlbumTitle)?;
        Ok(AlbumRequest {
            title,
            cover_photo: non_empty(&self.cover_photo),
            description: non_empty(&self.description),
        })
    }
}

/// Note create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteForm {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Attached photo URL or data URI.
    pub photo: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Mood keyword.
    pub mood: String,
}

impl NoteForm {
    /// Form pre-filled from a note.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            photo: note.photo.clone().unwrap_or_default(),
            tags: join_tags(&note.tags),
            mood: note.mood.clone().unwrap_or_default(),
        }
    }

    /// Validate the form into a request payload.
    ///
    /// # Errors
    /// Returns [`JournalInputError::MissingNoteFields`] when the title or body is blank.
    pub fn request(&self) -> Result<NoteRequest, JournalInputError> {
        let (Some(title), Some(content)) = (non_empty(&self.title), non_empty(&self.content))
        else {
            return Err(JournalInputError::MissingNoteFields);
        };
        Ok(NoteRequest {
            title,
            content,
            photo: non_empty(&self.photo),
            tags: parse_tags(&self.tags),
            mood: non_empty(&self.mood),
        })
    }
}

/// Complete journal state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JournalState {
    /// Active tab.
    pub tab: JournalTab,
    /// Search query.
    pub query: String,
    /// Albums, newest first.
    pub albums: Vec<Album>,
    /// Notes, newest first.
    pub notes: Vec<Note>,
    /// Album form.
    pub album_form: AlbumForm,
    /// Note form.
    pub note_form: NoteForm,
    /// Album being edited.
    pub editing_album: Option<String>,
    /// Note being edited.
    pub editing_note: Option<String>,
    /// Initial fetch in flight.
    pub loading: bool,
    /// Inline error message.
    pub error: Option<String>,
}

impl JournalState {
    /// Albums matching the search query.
    #[must_use]
    pub fn visible_albums(&self) -> Vec<&Album> {
        self.albums
            .iter()
            .filter(|album| album_matches(album, &self.query))
            .collect()
    }

    /// Notes matching the search query.
    #[must_use]
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note_matches(note, &self.query))
            .collect()
    }

    /// Look up an album.
    #[must_use]
    pub fn find_album(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|album| album.id == id)
    }

    /// Look up a note.
    #[must_use]
    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Replace an album by id, or put it first when it is new.
    pub fn upsert_album(&mut self, album: Album) {
        match self.albums.iter_mut().find(|existing| existing.id == album.id) {
            Some(slot) => *slot = album,
            None => self.albums.insert(0, album),
        }
    }

    /// Apply edited metadata to an album, keeping its photos.
    pub fn apply_album_metadata(&mut self, id: &str, request: &AlbumRequest) -> bool {
        let Some(album) = self.albums.iter_mut().find(|album| album.id == id) else {
            return false;
        };
        album.title.clone_from(&request.title);
        album.cover_photo.clone_from(&request.cover_photo);
        album.description.clone_from(&request.description);
        true
    }

    /// Remove an album; returns whether anything was removed.
    pub fn remove_album(&mut self, id: &str) -> bool {
        let before = self.albums.len();
        self.albums.retain(|album| album.id != id);
        self.albums.len() != before
    }

    /// Replace a note by id, or put it first when it is new.
    pub fn upsert_note(&mut self, note: Note) {
        match self.notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(slot) => *slot = note,
            None => self.notes.insert(0, note),
        }
    }

    /// Remove a note; returns whether anything was removed.
    pub fn remove_note(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.notes.len() != before
    }

    /// Apply edited fields to a photo wherever it lives.
    pub fn apply_photo_update(&mut self, photo_id: &str, update: &PhotoUpdate) -> bool {
        let Some(photo) = self
            .albums
            .iter_mut()
            .flat_map(|album| album.photos.iter_mut())
            .find(|photo| photo.id == photo_id)
        else {
            return false;
        };
        if let Some(name) = &update.name {
            photo.name.clone_from(name);
        }
        if update.notes.is_some() {
            photo.notes.clone_from(&update.notes);
        }
        true
    }

    /// Remove a photo from whichever album holds it.
    pub fn remove_photo(&mut self, photo_id: &str) -> bool {
        self.albums.iter_mut().any(|album| {
            let before = album.photos.len();
            album.photos.retain(|photo| photo.id != photo_id);
            album.photos.len() != before
        })
    }
}
