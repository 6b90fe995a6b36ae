//! In-memory service implementations.
//!
//! Each mock keeps its data behind a mutex and follows a [`MockPlan`] that can
//! make reads, writes, or deletes answer `success: false` or fail outright.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bloom_api_models::{
    Ack, Album, AlbumRequest, ApiEnvelope, CreateMetricRequest, DiaperLog, DiaperPayload,
    DueDateLog, MetricList, MetricRecord, NewPhoto, Note, NoteRequest, Photo, PhotoUpdate,
    SaveDueDateRequest,
};
use bloom_tools_core::{
    DiaperService, DueDateService, JournalService, MetricsService, ServiceError, ServiceResult,
};
use chrono::Utc;

/// Message returned by rejecting mocks.
pub const REJECTED_MESSAGE: &str = "Request rejected";

/// How a class of calls behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Behavior {
    /// Serve the call from memory.
    #[default]
    Succeed,
    /// Answer `success: false`.
    Reject,
    /// Return a transport error.
    Fail,
}

impl Behavior {
    fn intercept<T>(self, operation: &'static str) -> Option<ServiceResult<ApiEnvelope<T>>> {
        match self {
            Self::Succeed => None,
            Self::Reject => Some(Ok(ApiEnvelope::failure(Some(REJECTED_MESSAGE.to_string())))),
            Self::Fail => Some(Err(ServiceError::Unavailable { operation })),
        }
    }
}

/// Behaviour per call class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockPlan {
    /// Fetches.
    pub reads: Behavior,
    /// Creates and updates.
    pub writes: Behavior,
    /// Deletes.
    pub deletes: Behavior,
}

impl MockPlan {
    /// Every call succeeds.
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            reads: Behavior::Succeed,
            writes: Behavior::Succeed,
            deletes: Behavior::Succeed,
        }
    }

    /// Every call answers `success: false`.
    #[must_use]
    pub const fn rejecting() -> Self {
        Self {
            reads: Behavior::Reject,
            writes: Behavior::Reject,
            deletes: Behavior::Reject,
        }
    }

    /// Every call fails before producing an envelope.
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            reads: Behavior::Fail,
            writes: Behavior::Fail,
            deletes: Behavior::Fail,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn not_found<T>(what: &str) -> ServiceResult<ApiEnvelope<T>> {
    Ok(ApiEnvelope::failure(Some(format!("{what} not found"))))
}

/// In-memory metrics store.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    plan: MockPlan,
    records: Mutex<Vec<MetricRecord>>,
    create_calls: Mutex<Vec<CreateMetricRequest>>,
    next_id: AtomicI64,
}

impl InMemoryMetrics {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store seeded with records.
    #[must_use]
    pub fn with_records(records: Vec<MetricRecord>) -> Self {
        Self {
            plan: MockPlan::healthy(),
            records: Mutex::new(records),
            create_calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
        }
    }

    /// Replace the failure plan.
    #[must_use]
    pub const fn with_plan(mut self, plan: MockPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Records currently stored.
    #[must_use]
    pub fn records(&self) -> Vec<MetricRecord> {
        lock(&self.records).clone()
    }

    /// Every creation payload received, including rejected ones.
    #[must_use]
    pub fn create_calls(&self) -> Vec<CreateMetricRequest> {
        lock(&self.create_calls).clone()
    }
}

#[async_trait]
impl MetricsService for InMemoryMetrics {
    async fn get_all(&self) -> ServiceResult<ApiEnvelope<MetricList>> {
        if let Some(reply) = self.plan.reads.intercept("metrics.get_all") {
            return reply;
        }
        Ok(ApiEnvelope::ok(MetricList {
            metrics: self.records(),
        }))
    }

    async fn create_metric(
        &self,
        payload: CreateMetricRequest,
    ) -> ServiceResult<ApiEnvelope<MetricRecord>> {
        lock(&self.create_calls).push(payload.clone());
        if let Some(reply) = self.plan.writes.intercept("metrics.create") {
            return reply;
        }
        let now = Utc::now();
        let record = MetricRecord {
            id: Some(self.next_id.fetch_add(1, Ordering::Relaxed)),
            title: payload.title,
            value: payload.value,
            unit: Some(payload.unit),
            notes: Some(payload.notes),
            created_at: Some(now),
            updated_at: Some(now),
        };
        lock(&self.records).insert(0, record.clone());
        Ok(ApiEnvelope::ok(record))
    }

    async fn delete_metric(&self, id: i64) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.deletes.intercept("metrics.delete") {
            return reply;
        }
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|record| record.id != Some(id));
        if records.len() == before {
            return not_found("Metric");
        }
        Ok(Ack::acknowledged())
    }
}

/// In-memory due-date store.
#[derive(Debug, Default)]
pub struct InMemoryDueDate {
    plan: MockPlan,
    log: Mutex<Option<DueDateLog>>,
}

impl InMemoryDueDate {
    /// Store with nothing saved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a saved log.
    #[must_use]
    pub fn with_log(log: DueDateLog) -> Self {
        Self {
            plan: MockPlan::healthy(),
            log: Mutex::new(Some(log)),
        }
    }

    /// Replace the failure plan.
    #[must_use]
    pub const fn with_plan(mut self, plan: MockPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Currently saved log.
    #[must_use]
    pub fn saved(&self) -> Option<DueDateLog> {
        lock(&self.log).clone()
    }
}

#[async_trait]
impl DueDateService for InMemoryDueDate {
    async fn get_due_date(&self) -> ServiceResult<ApiEnvelope<DueDateLog>> {
        if let Some(reply) = self.plan.reads.intercept("due_date.get") {
            return reply;
        }
        Ok(self
            .saved()
            .map_or_else(|| ApiEnvelope::failure(None), ApiEnvelope::ok))
    }

    async fn save_due_date(
        &self,
        payload: SaveDueDateRequest,
    ) -> ServiceResult<ApiEnvelope<DueDateLog>> {
        if let Some(reply) = self.plan.writes.intercept("due_date.save") {
            return reply;
        }
        let mut log = lock(&self.log);
        let saved = DueDateLog {
            id: Some(log.as_ref().and_then(|existing| existing.id).unwrap_or(1)),
            lmp_date: payload.lmp_date,
            weeks_pregnant: payload.weeks_pregnant,
        };
        *log = Some(saved.clone());
        Ok(ApiEnvelope::ok(saved))
    }
}

/// In-memory diaper log.
#[derive(Debug, Default)]
pub struct InMemoryDiapers {
    plan: MockPlan,
    entries: Mutex<Vec<DiaperLog>>,
    next_id: AtomicI64,
}

impl InMemoryDiapers {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Log seeded with entries.
    #[must_use]
    pub fn with_entries(entries: Vec<DiaperLog>) -> Self {
        Self {
            plan: MockPlan::healthy(),
            entries: Mutex::new(entries),
            next_id: AtomicI64::new(100),
        }
    }

    /// Replace the failure plan.
    #[must_use]
    pub const fn with_plan(mut self, plan: MockPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Entries currently stored.
    #[must_use]
    pub fn entries(&self) -> Vec<DiaperLog> {
        lock(&self.entries).clone()
    }
}

#[async_trait]
impl DiaperService for InMemoryDiapers {
    async fn get_diapers(&self) -> ServiceResult<ApiEnvelope<Vec<DiaperLog>>> {
        if let Some(reply) = self.plan.reads.intercept("diapers.list") {
            return reply;
        }
        Ok(ApiEnvelope::ok(self.entries()))
    }

    async fn add_diaper(&self, payload: DiaperPayload) -> ServiceResult<ApiEnvelope<DiaperLog>> {
        if let Some(reply) = self.plan.writes.intercept("diapers.add") {
            return reply;
        }
        let now = Utc::now();
        let entry = DiaperLog {
            id: Some(self.next_id.fetch_add(1, Ordering::Relaxed)),
            user_id: Some(1),
            diaper_type: payload.diaper_type,
            occurred_at: payload.occurred_at,
            color: payload.color,
            consistency: payload.consistency,
            notes: payload.notes,
            created_at: Some(now),
            updated_at: Some(now),
        };
        lock(&self.entries).insert(0, entry.clone());
        Ok(ApiEnvelope::ok(entry))
    }

    async fn update_diaper(
        &self,
        id: i64,
        payload: DiaperPayload,
    ) -> ServiceResult<ApiEnvelope<DiaperLog>> {
        if let Some(reply) = self.plan.writes.intercept("diapers.update") {
            return reply;
        }
        let mut entries = lock(&self.entries);
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == Some(id)) else {
            return not_found("Diaper entry");
        };
        entry.diaper_type = payload.diaper_type;
        entry.occurred_at = payload.occurred_at;
        entry.color = payload.color;
        entry.consistency = payload.consistency;
        entry.notes = payload.notes;
        entry.updated_at = Some(Utc::now());
        Ok(ApiEnvelope::ok(entry.clone()))
    }

    async fn delete_diaper(&self, id: i64) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.deletes.intercept("diapers.delete") {
            return reply;
        }
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|entry| entry.id != Some(id));
        if entries.len() == before {
            return not_found("Diaper entry");
        }
        Ok(Ack::acknowledged())
    }
}

/// In-memory journal with albums and notes.
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    plan: MockPlan,
    albums: Mutex<Vec<Album>>,
    notes: Mutex<Vec<Note>>,
    next_id: AtomicI64,
}

impl InMemoryJournal {
    /// Empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_content(Vec::new(), Vec::new())
    }

    /// Journal seeded with albums and notes.
    #[must_use]
    pub fn with_content(albums: Vec<Album>, notes: Vec<Note>) -> Self {
        Self {
            plan: MockPlan::healthy(),
            albums: Mutex::new(albums),
            notes: Mutex::new(notes),
            next_id: AtomicI64::new(100),
        }
    }

    /// Replace the failure plan.
    #[must_use]
    pub const fn with_plan(mut self, plan: MockPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Albums currently stored.
    #[must_use]
    pub fn albums(&self) -> Vec<Album> {
        lock(&self.albums).clone()
    }

    /// Notes currently stored.
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        lock(&self.notes).clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl JournalService for InMemoryJournal {
    async fn get_albums(&self) -> ServiceResult<ApiEnvelope<Vec<Album>>> {
        if let Some(reply) = self.plan.reads.intercept("journal.albums") {
            return reply;
        }
        Ok(ApiEnvelope::ok(self.albums()))
    }

    async fn create_album(&self, payload: AlbumRequest) -> ServiceResult<ApiEnvelope<Album>> {
        if let Some(reply) = self.plan.writes.intercept("journal.create_album") {
            return reply;
        }
        let now = Utc::now();
        let album = Album {
            id: self.next_id("album"),
            title: payload.title,
            cover_photo: payload.cover_photo,
            description: payload.description,
            photos: Vec::new(),
            created_at: now,
            last_updated: now,
        };
        lock(&self.albums).insert(0, album.clone());
        Ok(ApiEnvelope::ok(album))
    }

    async fn update_album(
        &self,
        id: &str,
        payload: AlbumRequest,
    ) -> ServiceResult<ApiEnvelope<Album>> {
        if let Some(reply) = self.plan.writes.intercept("journal.update_album") {
            return reply;
        }
        let mut albums = lock(&self.albums);
        let Some(album) = albums.iter_mut().find(|album| album.id == id) else {
            return not_found("Album");
        };
        album.title = payload.title;
        album.cover_photo = payload.cover_photo;
        album.description = payload.description;
        album.last_updated = Utc::now();
        Ok(ApiEnvelope::ok(album.clone()))
    }

    async fn delete_album(&self, id: &str) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.deletes.intercept("journal.delete_album") {
            return reply;
        }
        let mut albums = lock(&self.albums);
        let before = albums.len();
        albums.retain(|album| album.id != id);
        if albums.len() == before {
            return not_found("Album");
        }
        Ok(Ack::acknowledged())
    }

    async fn add_photos_to_album(
        &self,
        album_id: &str,
        photos: Vec<NewPhoto>,
    ) -> ServiceResult<ApiEnvelope<Album>> {
        if let Some(reply) = self.plan.writes.intercept("journal.add_photos") {
            return reply;
        }
        let mut albums = lock(&self.albums);
        let Some(album) = albums.iter_mut().find(|album| album.id == album_id) else {
            return not_found("Album");
        };
        let now = Utc::now();
        for upload in photos {
            album.photos.push(Photo {
                id: self.next_id("photo"),
                file: upload.file_url,
                name: upload.name,
                notes: upload.notes,
                created_at: now,
                uploaded_at: now,
            });
        }
        album.last_updated = now;
        Ok(ApiEnvelope::ok(album.clone()))
    }

    async fn update_photo(&self, photo_id: &str, payload: PhotoUpdate) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.writes.intercept("journal.update_photo") {
            return reply;
        }
        let mut albums = lock(&self.albums);
        let Some(photo) = albums
            .iter_mut()
            .flat_map(|album| album.photos.iter_mut())
            .find(|photo| photo.id == photo_id)
        else {
            return not_found("Photo");
        };
        if let Some(name) = payload.name {
            photo.name = name;
        }
        if payload.notes.is_some() {
            photo.notes = payload.notes;
        }
        Ok(Ack::acknowledged())
    }

    async fn delete_photo(&self, photo_id: &str) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.deletes.intercept("journal.delete_photo") {
            return reply;
        }
        let removed = lock(&self.albums).iter_mut().any(|album| {
            let before = album.photos.len();
            album.photos.retain(|photo| photo.id != photo_id);
            album.photos.len() != before
        });
        if removed {
            Ok(Ack::acknowledged())
        } else {
            not_found("Photo")
        }
    }

    async fn get_notes(&self) -> ServiceResult<ApiEnvelope<Vec<Note>>> {
        if let Some(reply) = self.plan.reads.intercept("journal.notes") {
            return reply;
        }
        Ok(ApiEnvelope::ok(self.notes()))
    }

    async fn create_note(&self, payload: NoteRequest) -> ServiceResult<ApiEnvelope<Note>> {
        if let Some(reply) = self.plan.writes.intercept("journal.create_note") {
            return reply;
        }
        let now = Utc::now();
        let note = Note {
            id: self.next_id("note"),
            title: payload.title,
            content: payload.content,
            photo: payload.photo,
            tags: payload.tags,
            mood: payload.mood,
            created_at: now,
            last_updated: now,
        };
        lock(&self.notes).insert(0, note.clone());
        Ok(ApiEnvelope::ok(note))
    }

    async fn update_note(
        &self,
        id: &str,
        payload: NoteRequest,
    ) -> ServiceResult<ApiEnvelope<Note>> {
        if let Some(reply) = self.plan.writes.intercept("journal.update_note") {
            return reply;
        }
        let mut notes = lock(&self.notes);
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            return not_found("Note");
        };
        note.title = payload.title;
        note.content = payload.content;
        note.photo = payload.photo;
        note.tags = payload.tags;
        note.mood = payload.mood;
        note.last_updated = Utc::now();
        Ok(ApiEnvelope::ok(note.clone()))
    }

    async fn delete_note(&self, id: &str) -> ServiceResult<Ack> {
        if let Some(reply) = self.plan.deletes.intercept("journal.delete_note") {
            return reply;
        }
        let mut notes = lock(&self.notes);
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return not_found("Note");
        }
        Ok(Ack::acknowledged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_albums, sample_bmi_record};

    #[tokio::test]
    async fn metrics_store_round_trips_creates_and_deletes() {
        let store = InMemoryMetrics::with_records(vec![sample_bmi_record()]);
        let created = store
            .create_metric(CreateMetricRequest {
                title: "BMI".into(),
                value: "23.5".into(),
                unit: "lbs/ft".into(),
                notes: "{}".into(),
            })
            .await
            .expect("envelope")
            .into_data()
            .expect("record");
        assert_eq!(created.id, Some(100));
        assert_eq!(store.records()[0].id, Some(100));

        let missing = store.delete_metric(7).await.expect("envelope");
        assert!(!missing.success);
        assert_eq!(missing.error.as_deref(), Some("Metric not found"));
        assert!(store.delete_metric(1).await.expect("envelope").success);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn plans_intercept_each_call_class() {
        let plan = MockPlan {
            writes: Behavior::Reject,
            deletes: Behavior::Fail,
            ..MockPlan::healthy()
        };
        let store = InMemoryJournal::with_content(sample_albums(), Vec::new()).with_plan(plan);
        assert!(store.get_albums().await.expect("envelope").success);

        let rejected = store
            .create_album(AlbumRequest::default())
            .await
            .expect("envelope");
        assert_eq!(rejected.error.as_deref(), Some(REJECTED_MESSAGE));

        let err = store.delete_album("1").await.expect_err("offline");
        assert_eq!(err.operation(), "journal.delete_album");
        assert_eq!(store.albums().len(), 2);
    }

    #[tokio::test]
    async fn due_date_store_answers_failure_when_empty() {
        let store = InMemoryDueDate::new();
        assert!(!store.get_due_date().await.expect("envelope").success);
        let saved = store
            .save_due_date(SaveDueDateRequest {
                lmp_date: Utc::now(),
                weeks_pregnant: 4,
            })
            .await
            .expect("envelope");
        assert_eq!(saved.data.and_then(|log| log.id), Some(1));
        assert!(store.get_due_date().await.expect("envelope").success);
    }
}
