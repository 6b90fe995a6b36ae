//! Journal synchronization.

use std::sync::Arc;

use bloom_api_models::{NewPhoto, PhotoUpdate};
use bloom_tools_core::JournalService;
use tracing::{debug, error, info, warn};

use crate::core::mount::MountHandle;
use crate::core::sync::{Reply, SyncOutcome};
use crate::features::journal::actions::JournalAction;
use crate::features::journal::logic::{JournalInputError, JournalTab};
use crate::features::journal::state::{AlbumForm, JournalState, NoteForm};

/// Fallback message for album create/update failures.
pub const ALBUM_SAVE_FAILED: &str = "Failed to save album";
/// Fallback message for album delete failures.
pub const ALBUM_DELETE_FAILED: &str = "Failed to delete album";
/// Fallback message for photo upload failures.
pub const PHOTOS_ADD_FAILED: &str = "Failed to add photos";
/// Fallback message for photo edit failures.
pub const PHOTO_UPDATE_FAILED: &str = "Failed to update photo";
/// Fallback message for photo delete failures.
pub const PHOTO_DELETE_FAILED: &str = "Failed to delete photo";
/// Fallback message for note create/update failures.
pub const NOTE_SAVE_FAILED: &str = "Failed to save note";
/// Fallback message for note delete failures.
pub const NOTE_DELETE_FAILED: &str = "Failed to delete note";

/// Outcome of loading both journal collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JournalLoad {
    /// Album fetch outcome.
    pub albums: SyncOutcome,
    /// Note fetch outcome.
    pub notes: SyncOutcome,
}

impl JournalLoad {
    /// Single outcome for both halves; the worst one wins.
    #[must_use]
    pub const fn combined(self) -> SyncOutcome {
        const fn rank(outcome: SyncOutcome) -> u8 {
            match outcome {
                SyncOutcome::Applied | SyncOutcome::Skipped => 0,
                SyncOutcome::Rejected => 1,
                SyncOutcome::Failed => 2,
                SyncOutcome::Discarded => 3,
            }
        }
        if rank(self.notes) > rank(self.albums) {
            self.notes
        } else {
            self.albums
        }
    }
}

/// Journal controller bound to a journal service.
pub struct JournalController {
    service: Arc<dyn JournalService>,
    state: JournalState,
    mount: MountHandle,
}

impl JournalController {
    /// Controller with empty collections.
    #[must_use]
    pub fn new(service: Arc<dyn JournalService>) -> Self {
        Self {
            service,
            state: JournalState::default(),
            mount: MountHandle::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &JournalState {
        &self.state
    }

    /// Mutable access to the album form.
    pub const fn album_form_mut(&mut self) -> &mut AlbumForm {
        &mut self.state.album_form
    }

    /// Mutable access to the note form.
    pub const fn note_form_mut(&mut self) -> &mut NoteForm {
        &mut self.state.note_form
    }

    /// Handle the owner uses to signal unmount.
    #[must_use]
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Apply a user action.
    pub async fn dispatch(&mut self, action: JournalAction) -> SyncOutcome {
        match action {
            JournalAction::SetTab(tab) => {
                self.state.tab = tab;
                SyncOutcome::Skipped
            }
            JournalAction::SetQuery(query) => {
                self.state.query = query;
                SyncOutcome::Skipped
            }
            JournalAction::SubmitAlbum => {
                self.submit_album().await.unwrap_or(SyncOutcome::Skipped)
            }
            JournalAction::EditAlbum(id) => {
                self.edit_album(&id);
                SyncOutcome::Skipped
            }
            JournalAction::DeleteAlbum(id) => self.delete_album(&id).await,
            JournalAction::AddPhotos { album_id, photos } => {
                self.add_photos(&album_id, photos).await
            }
            JournalAction::UpdatePhoto { photo_id, update } => {
                self.update_photo(&photo_id, update).await
            }
            JournalAction::DeletePhoto(id) => self.delete_photo(&id).await,
            JournalAction::SubmitNote => self.submit_note().await.unwrap_or(SyncOutcome::Skipped),
            JournalAction::EditNote(id) => {
                self.edit_note(&id);
                SyncOutcome::Skipped
            }
            JournalAction::DeleteNote(id) => self.delete_note(&id).await,
            JournalAction::CancelEdit => {
                self.cancel_edit();
                SyncOutcome::Skipped
            }
            JournalAction::Refresh => self.load().await.combined(),
        }
    }

    fn discarded(&self, operation: &'static str) -> bool {
        let gone = !self.mount.is_mounted();
        if gone {
            debug!(operation, "discarding journal result after unmount");
        }
        gone
    }

    /// Translate a mutation reply, surfacing failures inline.
    fn settle<T>(
        &mut self,
        reply: Reply<T>,
        operation: &'static str,
        fallback: &str,
    ) -> Result<Option<T>, SyncOutcome> {
        match reply {
            Reply::Accepted(data) => Ok(data),
            Reply::Rejected(message) => {
                warn!(operation, error = ?message, "journal request rejected");
                self.state.error = Some(message.unwrap_or_else(|| fallback.to_string()));
                Err(SyncOutcome::Rejected)
            }
            Reply::Failed(err) => {
                error!(operation, error = %err, "journal request failed");
                self.state.error = Some(fallback.to_string());
                Err(SyncOutcome::Failed)
            }
        }
    }

    /// Fetch albums and notes; each failure leaves its collection empty.
    pub async fn load(&mut self) -> JournalLoad {
        self.state.loading = true;
        self.state.error = None;

        let albums = Reply::from(self.service.get_albums().await);
        if self.discarded("journal.albums") {
            return JournalLoad {
                albums: SyncOutcome::Discarded,
                notes: SyncOutcome::Discarded,
            };
        }
        let albums_outcome = albums.outcome();
        self.state.albums = match albums {
            Reply::Accepted(albums) => albums.unwrap_or_default(),
            Reply::Rejected(message) => {
                debug!(error = ?message, "no albums available");
                Vec::new()
            }
            Reply::Failed(err) => {
                warn!(error = %err, "failed to load albums");
                Vec::new()
            }
        };

        let notes = Reply::from(self.service.get_notes().await);
        if self.discarded("journal.notes") {
            return JournalLoad {
                albums: albums_outcome,
                notes: SyncOutcome::Discarded,
            };
        }
        let notes_outcome = notes.outcome();
        self.state.notes = match notes {
            Reply::Accepted(notes) => notes.unwrap_or_default(),
            Reply::Rejected(message) => {
                debug!(error = ?message, "no notes available");
                Vec::new()
            }
            Reply::Failed(err) => {
                warn!(error = %err, "failed to load notes");
                Vec::new()
            }
        };

        self.state.loading = false;
        info!(
            albums = self.state.albums.len(),
            notes = self.state.notes.len(),
            "loaded journal"
        );
        JournalLoad {
            albums: albums_outcome,
            notes: notes_outcome,
        }
    }

    /// Start editing an album; returns whether it exists.
    pub fn edit_album(&mut self, id: &str) -> bool {
        let Some(album) = self.state.find_album(id) else {
            return false;
        };
        self.state.album_form = AlbumForm::from_album(album);
        self.state.editing_album = Some(id.to_string());
        self.state.tab = JournalTab::Albums;
        true
    }

    /// Start editing a note; returns whether it exists.
    pub fn edit_note(&mut self, id: &str) -> bool {
        let Some(note) = self.state.find_note(id) else {
            return false;
        };
        self.state.note_form = NoteForm::from_note(note);
        self.state.editing_note = Some(id.to_string());
        self.state.tab = JournalTab::Notes;
        true
    }

    /// Leave edit mode and clear both forms.
    pub fn cancel_edit(&mut self) {
        self.state.editing_album = None;
        self.state.editing_note = None;
        self.state.album_form = AlbumForm::default();
        self.state.note_form = NoteForm::default();
    }

    /// Validate the album form and create or update the album.
    ///
    /// # Errors
    /// Returns the validation error (also stored as the inline message).
    pub async fn submit_album(&mut self) -> Result<SyncOutcome, JournalInputError> {
        self.state.error = None;
        let request = match self.state.album_form.request() {
            Ok(request) => request,
            Err(err) => {
                self.state.error = Some(err.to_string());
                return Err(err);
            }
        };

        let outcome = if let Some(id) = self.state.editing_album.clone() {
            let reply = Reply::from(self.service.update_album(&id, request.clone()).await);
            if self.discarded("journal.update_album") {
                return Ok(SyncOutcome::Discarded);
            }
            match self.settle(reply, "journal.update_album", ALBUM_SAVE_FAILED) {
                Ok(_) => {
                    self.state.apply_album_metadata(&id, &request);
                    info!(id = %id, "updated album");
                    SyncOutcome::Applied
                }
                Err(outcome) => outcome,
            }
        } else {
            let reply = Reply::from(self.service.create_album(request).await);
            if self.discarded("journal.create_album") {
                return Ok(SyncOutcome::Discarded);
            }
            match self.settle(reply, "journal.create_album", ALBUM_SAVE_FAILED) {
                Ok(Some(album)) => {
                    info!(id = %album.id, "created album");
                    self.state.upsert_album(album);
                    SyncOutcome::Applied
                }
                Ok(None) => {
                    self.state.error = Some(ALBUM_SAVE_FAILED.to_string());
                    SyncOutcome::Rejected
                }
                Err(outcome) => outcome,
            }
        };
        if outcome.is_applied() {
            self.state.editing_album = None;
            self.state.album_form = AlbumForm::default();
        }
        Ok(outcome)
    }

    /// Delete an album.
    pub async fn delete_album(&mut self, id: &str) -> SyncOutcome {
        self.state.error = None;
        let reply = Reply::from(self.service.delete_album(id).await);
        if self.discarded("journal.delete_album") {
            return SyncOutcome::Discarded;
        }
        match self.settle(reply, "journal.delete_album", ALBUM_DELETE_FAILED) {
            Ok(_) => {
                self.state.remove_album(id);
                if self.state.editing_album.as_deref() == Some(id) {
                    self.cancel_edit();
                }
                info!(id, "deleted album");
                SyncOutcome::Applied
            }
            Err(outcome) => outcome,
        }
    }

    /// Upload photos into an album and adopt the returned album.
    pub async fn add_photos(&mut self, album_id: &str, photos: Vec<NewPhoto>) -> SyncOutcome {
        if photos.is_empty() {
            return SyncOutcome::Skipped;
        }
        self.state.error = None;
        let count = photos.len();
        let reply = Reply::from(self.service.add_photos_to_album(album_id, photos).await);
        if self.discarded("journal.add_photos") {
            return SyncOutcome::Discarded;
        }
        match self.settle(reply, "journal.add_photos", PHOTOS_ADD_FAILED) {
            Ok(Some(album)) => {
                info!(album_id, count, "added photos");
                self.state.upsert_album(album);
                SyncOutcome::Applied
            }
            Ok(None) => {
                self.state.error = Some(PHOTOS_ADD_FAILED.to_string());
                SyncOutcome::Rejected
            }
            Err(outcome) => outcome,
        }
    }

    /// Edit a photo's name or notes.
    pub async fn update_photo(&mut self, photo_id: &str, update: PhotoUpdate) -> SyncOutcome {
        self.state.error = None;
        let reply = Reply::from(self.service.update_photo(photo_id, update.clone()).await);
        if self.discarded("journal.update_photo") {
            return SyncOutcome::Discarded;
        }
        match self.settle(reply, "journal.update_photo", PHOTO_UPDATE_FAILED) {
            Ok(_) => {
                self.state.apply_photo_update(photo_id, &update);
                SyncOutcome::Applied
            }
            Err(outcome) => outcome,
        }
    }

    /// Delete a photo and drop it from its album.
    pub async fn delete_photo(&mut self, photo_id: &str) -> SyncOutcome {
        self.state.error = None;
        let reply = Reply::from(self.service.delete_photo(photo_id).await);
        if self.discarded("journal.delete_photo") {
            return SyncOutcome::Discarded;
        }
        match self.settle(reply, "journal.delete_photo", PHOTO_DELETE_FAILED) {
            Ok(_) => {
                self.state.remove_photo(photo_id);
                info!(photo_id, "deleted photo");
                SyncOutcome::Applied
            }
            Err(outcome) => outcome,
        }
    }

    /// Validate the note form and create or update the note.
    ///
    /// # Errors
    /// Returns the validation error (also stored as the inline message).
    pub async fn submit_note(&mut self) -> Result<SyncOutcome, JournalInputError> {
        self.state.error = None;
        let request = match self.state.note_form.request() {
            Ok(request) => request,
            Err(err) => {
                self.state.error = Some(err.to_string());
                return Err(err);
            }
        };

        let editing = self.state.editing_note.clone();
        let reply = Reply::from(match editing.as_deref() {
            Some(id) => self.service.update_note(id, request).await,
            None => self.service.create_note(request).await,
        });
        if self.discarded("journal.save_note") {
            return Ok(SyncOutcome::Discarded);
        }
        let outcome = match self.settle(reply, "journal.save_note", NOTE_SAVE_FAILED) {
            Ok(Some(mut note)) => {
                if let Some(id) = editing {
                    if let Some(existing) = self.state.find_note(&id) {
                        note.created_at = existing.created_at;
                    }
                    note.id = id;
                }
                info!(id = %note.id, "saved note");
                self.state.upsert_note(note);
                SyncOutcome::Applied
            }
            Ok(None) => {
                self.state.error = Some(NOTE_SAVE_FAILED.to_string());
                SyncOutcome::Rejected
            }
            Err(outcome) => outcome,
        };
        if outcome.is_applied() {
            self.state.editing_note = None;
            self.state.note_form = NoteForm::default();
        }
        Ok(outcome)
    }

    /// Delete a note.
    pub async fn delete_note(&mut self, id: &str) -> SyncOutcome {
        self.state.error = None;
        let reply = Reply::from(self.service.delete_note(id).await);
        if self.discarded("journal.delete_note") {
            return SyncOutcome::Discarded;
        }
        match self.settle(reply, "journal.delete_note", NOTE_DELETE_FAILED) {
            Ok(_) => {
                self.state.remove_note(id);
                if self.state.editing_note.as_deref() == Some(id) {
                    self.cancel_edit();
                }
                info!(id, "deleted note");
                SyncOutcome::Applied
            }
            Err(outcome) => outcome,
        }
    }
}
