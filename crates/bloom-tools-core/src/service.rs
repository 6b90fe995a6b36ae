//! Remote collaborators used by the tool controllers.
//!
//! Every call resolves to an [`ApiEnvelope`]. `Err` is reserved for calls that
//! never produced one (network failure, undecodable body).

use async_trait::async_trait;
use bloom_api_models::{
    Ack, Album, AlbumRequest, ApiEnvelope, CreateMetricRequest, DiaperLog, DiaperPayload,
    DueDateLog, MetricList, MetricRecord, NewPhoto, Note, NoteRequest, PhotoUpdate,
    SaveDueDateRequest,
};

use crate::error::ServiceResult;

/// Saved health metrics (BMI and friends).
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Fetch every metric stored for the current user.
    async fn get_all(&self) -> ServiceResult<ApiEnvelope<MetricList>>;

    /// Persist a new metric and return the stored record.
    async fn create_metric(
        &self,
        payload: CreateMetricRequest,
    ) -> ServiceResult<ApiEnvelope<MetricRecord>>;

    /// Delete a metric by identifier.
    async fn delete_metric(&self, id: i64) -> ServiceResult<Ack>;
}

/// Saved due-date calculation.
#[async_trait]
pub trait DueDateService: Send + Sync {
    /// Fetch the saved calculation, if any.
    async fn get_due_date(&self) -> ServiceResult<ApiEnvelope<DueDateLog>>;

    /// Store the latest calculation.
    async fn save_due_date(
        &self,
        payload: SaveDueDateRequest,
    ) -> ServiceResult<ApiEnvelope<DueDateLog>>;
}

/// Diaper change log.
#[async_trait]
pub trait DiaperService: Send + Sync {
    /// Fetch every logged change.
    async fn get_diapers(&self) -> ServiceResult<ApiEnvelope<Vec<DiaperLog>>>;

    /// Log a new change.
    async fn add_diaper(&self, payload: DiaperPayload) -> ServiceResult<ApiEnvelope<DiaperLog>>;

    /// Edit an existing change.
    async fn update_diaper(
        &self,
        id: i64,
        payload: DiaperPayload,
    ) -> ServiceResult<ApiEnvelope<DiaperLog>>;

    /// Delete a change by identifier.
    async fn delete_diaper(&self, id: i64) -> ServiceResult<Ack>;
}

/// Photo albums and notes.
#[async_trait]
pub trait JournalService: Send + Sync {
    /// Fetch every album.
    async fn get_albums(&self) -> ServiceResult<ApiEnvelope<Vec<Album>>>;

    /// Create an empty album.
    async fn create_album(&self, payload: AlbumRequest) -> ServiceResult<ApiEnvelope<Album>>;

    /// Edit album metadata.
    async fn update_album(
        &self,
        id: &str,
        payload: AlbumRequest,
    ) -> ServiceResult<ApiEnvelope<Album>>;

    /// Delete an album and its photos.
    async fn delete_album(&self, id: &str) -> ServiceResult<Ack>;

    /// Append photos to an album, returning the updated album.
    async fn add_photos_to_album(
        &self,
        album_id: &str,
        photos: Vec<NewPhoto>,
    ) -> ServiceResult<ApiEnvelope<Album>>;

    /// Edit photo metadata.
    async fn update_photo(&self, photo_id: &str, payload: PhotoUpdate) -> ServiceResult<Ack>;

    /// Delete a photo.
    async fn delete_photo(&self, photo_id: &str) -> ServiceResult<Ack>;

    /// Fetch every note.
    async fn get_notes(&self) -> ServiceResult<ApiEnvelope<Vec<Note>>>;

    /// Create a note.
    async fn create_note(&self, payload: NoteRequest) -> ServiceResult<ApiEnvelope<Note>>;

    /// Edit a note.
    async fn update_note(&self, id: &str, payload: NoteRequest)
    -> ServiceResult<ApiEnvelope<Note>>;

    /// Delete a note.
    async fn delete_note(&self, id: &str) -> ServiceResult<Ack>;
}
