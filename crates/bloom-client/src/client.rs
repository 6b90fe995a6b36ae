//! `reqwest` implementation of the Bloom service contracts.
//!
//! # Design
//! - One client instance carries one request id, sent on every call.
//! - Non-2xx responses are still decoded as envelopes when the body allows it;
//!   only bodies that are not envelopes become errors.

use async_trait::async_trait;
use bloom_api_models::{
    Ack, Album, AlbumRequest, ApiEnvelope, CreateMetricRequest, DiaperLog, DiaperPayload,
    DueDateLog, MetricList, MetricRecord, NewPhoto, Note, NoteRequest, PhotoUpdate,
    SaveDueDateRequest,
};
use bloom_tools_core::{
    DiaperService, DueDateService, JournalService, MetricsService, ServiceError, ServiceResult,
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::{ClientConfig, ConfigError};

/// Header carrying the per-client request identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

const METRICS: [&str; 3] = ["api", "bbtools", "metrics"];
const DUE_DATE: [&str; 3] = ["api", "bbtools", "due-date"];
const DIAPERS: [&str; 3] = ["api", "bbtools", "diapers"];
const ALBUMS: [&str; 3] = ["api", "journal", "albums"];
const PHOTOS: [&str; 3] = ["api", "journal", "photos"];
const NOTES: [&str; 3] = ["api", "journal", "notes"];

#[derive(Serialize)]
struct PhotoBatch<'a> {
    photos: &'a [NewPhoto],
}

/// HTTP client for the Bloom tools API.
#[derive(Clone, Debug)]
pub struct HttpBloomClient {
    http: Client,
    base_url: Url,
    request_id: String,
}

impl HttpBloomClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the token is not a valid header value or
    /// the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let request_id = Uuid::new_v4().to_string();
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(HEADER_REQUEST_ID, value);
        }
        if let Some(token) = &config.token {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| ConfigError::InvalidToken)?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ConfigError::HttpClient { source })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            request_id,
        })
    }

    /// Identifier sent in the `x-request-id` header.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    fn endpoint(&self, prefix: &[&str], rest: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Config validation guarantees the base URL carries segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(prefix).extend(rest);
        }
        url
    }

    fn request(&self, method: Method, url: Url, operation: &'static str) -> RequestBuilder {
        debug!(operation, %method, %url, request_id = %self.request_id, "sending request");
        self.http.request(method, url)
    }

    async fn get<T>(&self, operation: &'static str, url: Url) -> ServiceResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.execute(operation, self.request(Method::GET, url, operation))
            .await
    }

    async fn send<B, T>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: &B,
    ) -> ServiceResult<ApiEnvelope<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(operation, self.request(method, url, operation).json(body))
            .await
    }

    async fn delete(&self, operation: &'static str, url: Url) -> ServiceResult<Ack> {
        self.execute(operation, self.request(Method::DELETE, url, operation))
            .await
    }

    async fn execute<T>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ServiceResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|err| ServiceError::transport(operation, err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ServiceError::transport(operation, err))?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => {
                if !status.is_success() {
                    warn!(
                        operation,
                        status = status.as_u16(),
                        success = envelope.success,
                        "backend answered with an error status"
                    );
                }
                Ok(envelope)
            }
            Err(err) if status.is_success() => Err(ServiceError::decode(operation, err)),
            Err(_) => Err(ServiceError::Status {
                operation,
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl MetricsService for HttpBloomClient {
    async fn get_all(&self) -> ServiceResult<ApiEnvelope<MetricList>> {
        self.get("metrics.get_all", self.endpoint(&METRICS, &[]))
            .await
    }

    async fn create_metric(
        &self,
        payload: CreateMetricRequest,
    ) -> ServiceResult<ApiEnvelope<MetricRecord>> {
        let url = self.endpoint(&METRICS, &[]);
        self.send("metrics.create", Method::POST, url, &payload)
            .await
    }

    async fn delete_metric(&self, id: i64) -> ServiceResult<Ack> {
        let id = id.to_string();
        self.delete("metrics.delete", self.endpoint(&METRICS, &[id.as_str()]))
            .await
    }
}

#[async_trait]
impl DueDateService for HttpBloomClient {
    async fn get_due_date(&self) -> ServiceResult<ApiEnvelope<DueDateLog>> {
        self.get("due_date.get", self.endpoint(&DUE_DATE, &[])).await
    }

    async fn save_due_date(
        &self,
        payload: SaveDueDateRequest,
    ) -> ServiceResult<ApiEnvelope<DueDateLog>> {
        let url = self.endpoint(&DUE_DATE, &[]);
        self.send("due_date.save", Method::POST, url, &payload)
            .await
    }
}

#[async_trait]
impl DiaperService for HttpBloomClient {
    async fn get_diapers(&self) -> ServiceResult<ApiEnvelope<Vec<DiaperLog>>> {
        self.get("diapers.list", self.endpoint(&DIAPERS, &[])).await
    }

    async fn add_diaper(&self, payload: DiaperPayload) -> ServiceResult<ApiEnvelope<DiaperLog>> {
        let url = self.endpoint(&DIAPERS, &[]);
        self.send("diapers.add", Method::POST, url, &payload).await
    }

    async fn update_diaper(
        &self,
        id: i64,
        payload: DiaperPayload,
    ) -> ServiceResult<ApiEnvelope<DiaperLog>> {
        let id = id.to_string();
        let url = self.endpoint(&DIAPERS, &[id.as_str()]);
        self.send("diapers.update", Method::PUT, url, &payload)
            .await
    }

    async fn delete_diaper(&self, id: i64) -> ServiceResult<Ack> {
        let id = id.to_string();
        self.delete("diapers.delete", self.endpoint(&DIAPERS, &[id.as_str()]))
            .await
    }
}

#[async_trait]
impl JournalService for HttpBloomClient {
    async fn get_albums(&self) -> ServiceResult<ApiEnvelope<Vec<Album>>> {
        self.get("journal.albums", self.endpoint(&ALBUMS, &[])).await
    }

    async fn create_album(&self, payload: AlbumRequest) -> ServiceResult<ApiEnvelope<Album>> {
        let url = self.endpoint(&ALBUMS, &[]);
        self.send("journal.create_album", Method::POST, url, &payload)
            .await
    }

    async fn update_album(
        &self,
        id: &str,
        payload: AlbumRequest,
    ) -> ServiceResult<ApiEnvelope<Album>> {
        let url = self.endpoint(&ALBUMS, &[id]);
        self.send("journal.update_album", Method::PUT, url, &payload)
            .await
    }

    async fn delete_album(&self, id: &str) -> ServiceResult<Ack> {
        self.delete("journal.delete_album", self.endpoint(&ALBUMS, &[id]))
            .await
    }

    async fn add_photos_to_album(
        &self,
        album_id: &str,
        photos: Vec<NewPhoto>,
    ) -> ServiceResult<ApiEnvelope<Album>> {
        let url = self.endpoint(&ALBUMS, &[album_id, "photos"]);
        let batch = PhotoBatch { photos: &photos };
        self.send("journal.add_photos", Method::POST, url, &batch)
            .await
    }

    async fn update_photo(&self, photo_id: &str, payload: PhotoUpdate) -> ServiceResult<Ack> {
        let url = self.endpoint(&PHOTOS, &[photo_id]);
        self.send("journal.update_photo", Method::PUT, url, &payload)
            .await
    }

    async fn delete_photo(&self, photo_id: &str) -> ServiceResult<Ack> {
        self.delete("journal.delete_photo", self.endpoint(&PHOTOS, &[photo_id]))
            .await
    }

    async fn get_notes(&self) -> ServiceResult<ApiEnvelope<Vec<Note>>> {
        self.get("journal.notes", self.endpoint(&NOTES, &[])).await
    }

    async fn create_note(&self, payload: NoteRequest) -> ServiceResult<ApiEnvelope<Note>> {
        let url = self.endpoint(&NOTES, &[]);
        self.send("journal.create_note", Method::POST, url, &payload)
            .await
    }

    async fn update_note(
        &self,
        id: &str,
        payload: NoteRequest,
    ) -> ServiceResult<ApiEnvelope<Note>> {
        let url = self.endpoint(&NOTES, &[id]);
        self.send("journal.update_note", Method::PUT, url, &payload)
            .await
    }

    async fn delete_note(&self, id: &str) -> ServiceResult<Ack> {
        self.delete("journal.delete_note", self.endpoint(&NOTES, &[id]))
            .await
    }
}
