//! Persistence layer for video records

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::video::{NewVideo, Video};

pub mod memory;
pub mod postgres;

/// Storage operations for video records.
///
/// The store is the only place identity and audit stamps come from:
/// [`insert`](VideoStore::insert) assigns the id and both timestamps, and
/// [`update`](VideoStore::update) refreshes `updated` while leaving `id` and
/// `created` alone. Listings are returned newest first with the id as a
/// tie-break so page boundaries stay stable across requests.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a single record by id
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Video>>;

    /// Fetch the oldest record whose title matches exactly
    async fn get_by_title(&self, title: &str) -> Result<Option<Video>>;

    /// Persist a new record, assigning its id and timestamps
    async fn insert(&self, draft: NewVideo) -> Result<Video>;

    /// Overwrite an existing record; `None` when the id is no longer present
    async fn update(&self, video: &Video) -> Result<Option<Video>>;

    /// Remove a record; `false` when the id was not present
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Fetch every record, newest first
    async fn list_all(&self) -> Result<Vec<Video>>;

    /// Fetch one page of records together with the total record count
    async fn list_page(&self, offset: i64, limit: i64) -> Result<(Vec<Video>, i64)>;
}
