//! Journal actions.
//!
//! # Design
//! - Form fields are edited through the controller's form accessors.
//! - Every variant that carries an identifier results in a remote call.

use bloom_api_models::{NewPhoto, PhotoUpdate};

use crate::features::journal::logic::JournalTab;

/// User intents raised by the journal page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalAction {
    /// Tab selected.
    SetTab(JournalTab),
    /// Search query edited.
    SetQuery(String),
    /// Album form submitted (creates, or updates the album being edited).
    SubmitAlbum,
    /// Edit button pressed on an album.
    EditAlbum(String),
    /// Delete button pressed on an album.
    DeleteAlbum(String),
    /// Photos uploaded into an album.
    AddPhotos {
        /// Target album.
        album_id: String,
        /// Uploaded files.
        photos: Vec<NewPhoto>,
    },
    /// Photo details edited.
    UpdatePhoto {
        /// Photo to edit.
        photo_id: String,
        /// New details.
        update: PhotoUpdate,
    },
    /// Delete button pressed on a photo.
    DeletePhoto(String),
    /// Note form submitted (creates, or updates the note being edited).
    SubmitNote,
    /// Edit button pressed on a note.
    EditNote(String),
    /// Delete button pressed on a note.
    DeleteNote(String),
    /// Editing cancelled; both forms are cleared.
    CancelEdit,
    /// Reload albums and notes.
    Refresh,
}
