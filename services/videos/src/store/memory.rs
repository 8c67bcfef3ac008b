//! In-memory video store
//!
//! Backs the service in tests and local runs without a database. Shares the
//! audit-stamping and ordering contract of the Postgres store.

use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::video::{Audit, NewVideo, Video};
use crate::store::VideoStore;

/// Video store held in process memory
#[derive(Default)]
pub struct MemoryVideoStore {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl MemoryVideoStore {
    /// Create an empty in-memory video store
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(a: &Video, b: &Video) -> Ordering {
    b.audit
        .created
        .cmp(&a.audit.created)
        .then_with(|| a.audit.id.cmp(&b.audit.id))
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let videos = self.videos.read().await;
        Ok(videos.get(&id).cloned())
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Video>> {
        let videos = self.videos.read().await;
        let found = videos
            .values()
            .filter(|video| video.title == title)
            .min_by(|a, b| {
                a.audit
                    .created
                    .cmp(&b.audit.created)
                    .then_with(|| a.audit.id.cmp(&b.audit.id))
            })
            .cloned();
        Ok(found)
    }

    async fn insert(&self, draft: NewVideo) -> Result<Video> {
        let now = Utc::now();
        let video = Video {
            audit: Audit {
                id: Uuid::new_v4(),
                created: now,
                updated: now,
            },
            title: draft.title,
            description: draft.description,
            user_id: draft.user_id,
            user_name: draft.user_name,
            completed: draft.completed,
        };

        let mut videos = self.videos.write().await;
        videos.insert(video.audit.id, video.clone());
        Ok(video)
    }

    async fn update(&self, video: &Video) -> Result<Option<Video>> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&video.audit.id) {
            Some(slot) => {
                let mut next = video.clone();
                next.audit.created = slot.audit.created;
                next.audit.updated = Utc::now();
                *slot = next.clone();
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut videos = self.videos.write().await;
        Ok(videos.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Video>> {
        let videos = self.videos.read().await;
        let mut all: Vec<Video> = videos.values().cloned().collect();
        all.sort_by(newest_first);
        Ok(all)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<(Vec<Video>, i64)> {
        let videos = self.videos.read().await;
        let total = videos.len() as i64;

        let mut all: Vec<Video> = videos.values().cloned().collect();
        all.sort_by(newest_first);

        let page = all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }
}
