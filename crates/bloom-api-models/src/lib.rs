#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Bloom tools API.
//!
//! Every endpoint answers with an [`ApiEnvelope`]. The payload types below are
//! re-used by the HTTP client, the in-memory mocks, and the UI feature slices so
//! the wire contract has a single definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric title used for BMI entries.
pub const BMI_METRIC_TITLE: &str = "BMI";

/// `{success, data, error}` envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Payload for successful requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Backend-provided failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying a payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope with an optional message.
    #[must_use]
    pub fn failure(error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error,
        }
    }

    /// Payload when the envelope reports success and carries data.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Acknowledgement envelope for endpoints without a meaningful payload.
pub type Ack = ApiEnvelope<serde_json::Value>;

impl Ack {
    /// Successful acknowledgement with no payload.
    #[must_use]
    pub const fn acknowledged() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Persisted user measurement entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Identifier assigned by the backend once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Category tag (e.g. `BMI`).
    pub title: String,
    /// Numeric value as decimal text.
    pub value: String,
    /// Unit string such as `kg/cm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Serialized structured payload describing the raw inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MetricRecord {
    /// Recency used for ordering: update timestamp, falling back to creation.
    #[must_use]
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}

/// Payload accepted by the metric creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateMetricRequest {
    /// Category tag.
    pub title: String,
    /// Numeric value as decimal text.
    pub value: String,
    /// Unit string.
    pub unit: String,
    /// Serialized structured payload.
    pub notes: String,
}

/// Response body of the metric listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MetricList {
    /// Every metric stored for the current user.
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
}

/// Saved due-date calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DueDateLog {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// First day of the last menstrual period.
    pub lmp_date: DateTime<Utc>,
    /// Completed gestational weeks at save time.
    pub weeks_pregnant: u32,
}

/// Payload accepted by the due-date save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveDueDateRequest {
    /// First day of the last menstrual period.
    pub lmp_date: DateTime<Utc>,
    /// Completed gestational weeks.
    pub weeks_pregnant: u32,
}

/// Kind of diaper change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiaperType {
    /// Urine only.
    Wet,
    /// Stool only.
    Dirty,
    /// Urine and stool.
    Both,
}

impl DiaperType {
    /// Whether the change counts as wet.
    #[must_use]
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Wet | Self::Both)
    }

    /// Whether the change counts as dirty.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty | Self::Both)
    }
}

/// Stool color recorded for dirty changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoolColor {
    /// Mustard yellow, typical for breastfed babies.
    Yellow,
    /// Brown, typical for formula or mixed feeding.
    Brown,
    /// Green.
    Green,
    /// Black (meconium in the first days).
    Black,
    /// Red or red-streaked.
    Red,
    /// White or chalky.
    White,
    /// Anything the client does not recognise.
    #[serde(other)]
    Other,
}

/// Stool consistency recorded for dirty changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoolConsistency {
    /// Seedy texture.
    Seedy,
    /// Pasty texture.
    Pasty,
    /// Watery texture.
    Watery,
    /// Formed stool.
    Formed,
    /// Anything the client does not recognise.
    #[serde(other)]
    Other,
}

/// Saved diaper change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiaperLog {
    /// Identifier assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Kind of change.
    pub diaper_type: DiaperType,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
    /// Stool color, for dirty changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StoolColor>,
    /// Stool consistency, for dirty changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<StoolConsistency>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload accepted by the diaper add/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiaperPayload {
    /// Kind of change.
    pub diaper_type: DiaperType,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
    /// Stool color, for dirty changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StoolColor>,
    /// Stool consistency, for dirty changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<StoolConsistency>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Photo stored inside a journal album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Photo identifier.
    pub id: String,
    /// File URL or data URI.
    pub file: String,
    /// Display name.
    pub name: String,
    /// Caption or notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Journal photo album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album identifier.
    pub id: String,
    /// Album title.
    pub title: String,
    /// Cover image URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    /// Album description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Photos in upload order.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
}

/// Payload accepted by the album create/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRequest {
    /// Album title.
    pub title: String,
    /// Cover image URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    /// Album description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Photo upload descriptor for an album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    /// Uploaded file URL.
    pub file_url: String,
    /// Display name.
    pub name: String,
    /// Caption or notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Editable photo fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PhotoUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New caption or notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Journal note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note identifier.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Attached photo URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Mood keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
}

/// Payload accepted by the note create/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NoteRequest {
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Attached photo URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Mood keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}
