//! Video models for the catalog service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Field;

/// Identity and audit timestamps shared by every stored record.
///
/// Embedded by value in [`Video`] and flattened into its JSON form; `id` and
/// `created` are written once at insert and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audit {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Video record as persisted by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub audit: Audit,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub completed: Option<bool>,
}

/// Insertable shape of a video; the store assigns identity and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub completed: Option<bool>,
}

/// Request body for creating or updating a video.
///
/// A request without an `id` always creates. Every data field is a
/// [`Field`], so a field that was not sent or was sent as `null` leaves the
/// stored value untouched on update, while a sent value (including an empty
/// string) overwrites it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVideoRequest {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub user_id: Field<Uuid>,
    #[serde(default)]
    pub user_name: Field<String>,
    #[serde(default)]
    pub completed: Field<bool>,
}

/// Video representation returned to clients.
///
/// Unset fields are omitted from the JSON output rather than rendered as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    #[serde(flatten)]
    pub audit: Audit,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Filter predicates for the filtered listing; absent predicates are not applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    /// Match a single video id
    pub id: Option<Uuid>,
    /// Case-insensitive title equality
    pub title: Option<String>,
    /// Exact completion flag equality
    pub completed: Option<bool>,
}

/// Response for paginated listing
#[derive(Debug, Clone, Serialize)]
pub struct VideoListResponse {
    pub items: Vec<VideoResponse>,
    pub page: u32,
    pub size: u32,
    pub total: i64,
}
