//! Postgres-backed video store

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::video::{Audit, NewVideo, Video};
use crate::store::VideoStore;

/// Video store backed by the `videos` table.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE videos (
///     id          UUID PRIMARY KEY,
///     title       VARCHAR(30) NOT NULL,
///     description VARCHAR(100),
///     user_id     UUID,
///     user_name   TEXT,
///     completed   BOOLEAN,
///     created     TIMESTAMPTZ NOT NULL,
///     updated     TIMESTAMPTZ NOT NULL
/// );
/// ```
#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    /// Create a new Postgres video store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn video_from_row(row: PgRow) -> Video {
    Video {
        audit: Audit {
            id: row.get("id"),
            created: row.get("created"),
            updated: row.get("updated"),
        },
        title: row.get("title"),
        description: row.get("description"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        completed: row.get("completed"),
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, user_id, user_name, completed, created, updated
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(video_from_row))
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, user_id, user_name, completed, created, updated
            FROM videos
            WHERE title = $1
            ORDER BY created ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(video_from_row))
    }

    async fn insert(&self, draft: NewVideo) -> Result<Video> {
        let row = sqlx::query(
            r#"
            INSERT INTO videos (id, title, description, user_id, user_name, completed, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, title, description, user_id, user_name, completed, created, updated
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.user_id)
        .bind(&draft.user_name)
        .bind(draft.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(video_from_row(row))
    }

    async fn update(&self, video: &Video) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            UPDATE videos
            SET title = $2,
                description = $3,
                user_id = $4,
                user_name = $5,
                completed = $6,
                updated = NOW()
            WHERE id = $1
            RETURNING id, title, description, user_id, user_name, completed, created, updated
            "#,
        )
        .bind(video.audit.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.user_id)
        .bind(&video.user_name)
        .bind(video.completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(video_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Video>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, user_id, user_name, completed, created, updated
            FROM videos
            ORDER BY created DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(video_from_row).collect())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<(Vec<Video>, i64)> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, user_id, user_name, completed, created, updated
            FROM videos
            ORDER BY created DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows.into_iter().map(video_from_row).collect(), total))
    }
}
