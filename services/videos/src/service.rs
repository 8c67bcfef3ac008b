//! Video service: validation, merge flow, filtering, and lookups

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::mapper;
use crate::models::PageQuery;
use crate::models::video::{SaveVideoRequest, VideoListResponse, VideoQuery, VideoResponse};
use crate::store::VideoStore;

/// Domain operations over video records.
///
/// Every read and write goes through the [`VideoStore`]; the service itself
/// holds no mutable state, so concurrent requests only contend inside the
/// store.
#[derive(Clone)]
pub struct VideoService {
    store: Arc<dyn VideoStore>,
}

impl VideoService {
    /// Create a new video service on top of a store
    pub fn new(store: Arc<dyn VideoStore>) -> Self {
        Self { store }
    }

    /// Create a new video or merge a partial update into an existing one.
    ///
    /// A request without an id always creates. A request with an id updates
    /// the record it names and fails with `NotFound` when that record is
    /// missing; an unknown id never silently turns into a create.
    pub async fn save(&self, request: SaveVideoRequest) -> ServiceResult<VideoResponse> {
        tracing::debug!("save: [{:?}]", request);
        validate(&request)?;

        match request.id {
            Some(id) => {
                let existing = self.store.get_by_id(id).await?.ok_or_else(|| {
                    tracing::error!("Video with id '{}' not found", id);
                    video_not_found()
                })?;

                let merged = mapper::merge(&request, existing);
                tracing::info!("Video to be saved with id '{}'", id);

                let saved = self.store.update(&merged).await?.ok_or_else(|| {
                    tracing::error!("Video with id '{}' vanished before the update", id);
                    video_not_found()
                })?;

                Ok(mapper::to_response(saved))
            }
            None => {
                let draft = mapper::new_video(&request).ok_or(ServiceError::Validation {
                    field: "title",
                    message: "title is required",
                })?;

                let saved = self.store.insert(draft).await?;
                tracing::info!("Video saved with id '{}'", saved.audit.id);

                Ok(mapper::to_response(saved))
            }
        }
    }

    /// Fetch a single video by id
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<VideoResponse> {
        tracing::debug!("find video by id: [{}]", id);

        let found = self.store.get_by_id(id).await?.ok_or_else(|| {
            tracing::error!("Video with id '{}' not found", id);
            video_not_found()
        })?;

        Ok(mapper::to_response(found))
    }

    /// Fetch the oldest video carrying exactly the given title.
    ///
    /// Duplicate titles are legal, the earliest created record wins. Not
    /// routed over HTTP; callers reach it through the service directly.
    pub async fn find_by_title(&self, title: &str) -> ServiceResult<VideoResponse> {
        tracing::debug!("find video by title: [{}]", title);

        let found = self.store.get_by_title(title).await?.ok_or_else(|| {
            tracing::error!("Video with title '{}' does not exist", title);
            ServiceError::NotFound {
                entity: "title",
                message: "Video with the given title does not exist",
            }
        })?;

        Ok(mapper::to_response(found))
    }

    /// Fetch one page of videos, newest first
    pub async fn find_all(&self, page: PageQuery) -> ServiceResult<VideoListResponse> {
        tracing::debug!("find all videos: [page: {}, size: {}]", page.page, page.size);

        let offset = i64::from(page.page).saturating_mul(i64::from(page.size));
        let (videos, total) = self.store.list_page(offset, i64::from(page.size)).await?;

        Ok(VideoListResponse {
            items: videos.into_iter().map(mapper::to_response).collect(),
            page: page.page,
            size: page.size,
            total,
        })
    }

    /// Fetch every video matching all supplied filter predicates.
    ///
    /// Predicates compose with AND. Title matching ignores case, and a record
    /// without a completion flag matches neither `completed=true` nor
    /// `completed=false`.
    ///
    /// Note: unlike the usual list-endpoint convention, an empty result is
    /// reported as `NotFound` instead of an empty list, so callers can tell
    /// "the criteria matched nothing" apart from a successful listing.
    pub async fn find_with_filters(&self, query: VideoQuery) -> ServiceResult<Vec<VideoResponse>> {
        tracing::debug!(
            "find videos with filters: [id: {:?}, title: {:?}, completed: {:?}]",
            query.id,
            query.title,
            query.completed
        );

        let wanted_title = query.title.as_ref().map(|title| title.to_lowercase());

        let matches: Vec<VideoResponse> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|video| {
                query.id.is_none_or(|id| video.audit.id == id)
                    && wanted_title
                        .as_ref()
                        .is_none_or(|wanted| video.title.to_lowercase() == *wanted)
                    && query
                        .completed
                        .is_none_or(|completed| video.completed == Some(completed))
            })
            .map(mapper::to_response)
            .collect();

        if matches.is_empty() {
            tracing::error!("No videos matched the provided filters");
            return Err(ServiceError::NotFound {
                entity: "filterCriteria",
                message: "No videos matched the criteria",
            });
        }

        tracing::debug!("Filtered videos count: {}", matches.len());
        Ok(matches)
    }

    /// Mark a video as completed.
    ///
    /// The flag is set unconditionally, so repeating the call is idempotent.
    pub async fn set_completed(&self, id: Uuid) -> ServiceResult<VideoResponse> {
        tracing::debug!("set completed: [{}]", id);

        let mut video = self.store.get_by_id(id).await?.ok_or_else(|| {
            tracing::error!("Video with id '{}' not found", id);
            video_not_found()
        })?;

        video.completed = Some(true);
        let saved = self.store.update(&video).await?.ok_or_else(|| {
            tracing::error!("Video with id '{}' vanished before the update", id);
            video_not_found()
        })?;

        Ok(mapper::to_response(saved))
    }

    /// Delete a video and return its last stored state
    pub async fn delete(&self, id: Uuid) -> ServiceResult<VideoResponse> {
        let found = self.store.get_by_id(id).await?.ok_or_else(|| {
            tracing::error!("Video with id '{}' not found", id);
            video_not_found()
        })?;

        if !self.store.delete(id).await? {
            tracing::error!("Video with id '{}' was already deleted", id);
            return Err(video_not_found());
        }

        tracing::debug!("Video with id '{}' deleted", id);
        Ok(mapper::to_response(found))
    }
}

fn video_not_found() -> ServiceError {
    ServiceError::NotFound {
        entity: "id",
        message: "Video does not exist",
    }
}

fn validate(request: &SaveVideoRequest) -> ServiceResult<()> {
    if let Some(title) = request.title.as_set() {
        let length = title.chars().count();
        if length == 0 || length > 30 {
            return Err(ServiceError::Validation {
                field: "title",
                message: "title must be between 1 and 30 characters",
            });
        }
    }

    if let Some(description) = request.description.as_set() {
        if description.chars().count() > 100 {
            return Err(ServiceError::Validation {
                field: "description",
                message: "description must be at most 100 characters",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use crate::models::video::{NewVideo, Video};
    use crate::store::memory::MemoryVideoStore;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::time::Duration;

    fn service() -> VideoService {
        VideoService::new(Arc::new(MemoryVideoStore::new()))
    }

    fn create_request(title: &str) -> SaveVideoRequest {
        SaveVideoRequest {
            title: Field::Set(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_equal_stamps() {
        let service = service();
        let request = SaveVideoRequest {
            title: Field::Set("Intro".to_string()),
            description: Field::Set("basics".to_string()),
            ..Default::default()
        };

        let saved = service.save(request).await.unwrap();

        assert_eq!(saved.title, "Intro");
        assert_eq!(saved.description, Some("basics".to_string()));
        assert_eq!(saved.audit.created, saved.audit.updated);
        assert_eq!(saved.completed, None);
    }

    #[tokio::test]
    async fn create_without_a_title_is_rejected() {
        let service = service();

        let err = service.save(SaveVideoRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "title", .. }));
        assert_eq!(err.to_string(), "title is required");

        let err = service
            .save(SaveVideoRequest {
                title: Field::Null,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[tokio::test]
    async fn title_length_is_validated() {
        let service = service();

        let err = service.save(create_request("")).await.unwrap_err();
        assert_eq!(err.to_string(), "title must be between 1 and 30 characters");

        let err = service
            .save(create_request(&"x".repeat(31)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "title must be between 1 and 30 characters");

        assert!(service.save(create_request("x")).await.is_ok());
        assert!(service.save(create_request(&"x".repeat(30))).await.is_ok());
    }

    #[tokio::test]
    async fn description_length_is_validated() {
        let service = service();

        let request = SaveVideoRequest {
            title: Field::Set("Intro".to_string()),
            description: Field::Set("d".repeat(101)),
            ..Default::default()
        };
        let err = service.save(request).await.unwrap_err();
        assert_eq!(err.to_string(), "description must be at most 100 characters");

        let request = SaveVideoRequest {
            title: Field::Set("Intro".to_string()),
            description: Field::Set("d".repeat(100)),
            ..Default::default()
        };
        assert!(service.save(request).await.is_ok());

        let request = SaveVideoRequest {
            title: Field::Set("Short".to_string()),
            description: Field::Set(String::new()),
            ..Default::default()
        };
        let saved = service.save(request).await.unwrap();
        assert_eq!(saved.description, Some(String::new()));
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let service = service();
        let request = SaveVideoRequest {
            title: Field::Set("Intro".to_string()),
            description: Field::Set("basics".to_string()),
            ..Default::default()
        };
        let created = service.save(request).await.unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;

        let patch = SaveVideoRequest {
            id: Some(created.audit.id),
            completed: Field::Set(true),
            ..Default::default()
        };
        let updated = service.save(patch).await.unwrap();

        assert_eq!(updated.title, "Intro");
        assert_eq!(updated.description, Some("basics".to_string()));
        assert_eq!(updated.completed, Some(true));
        assert_eq!(updated.audit.created, created.audit.created);
        assert!(updated.audit.updated > created.audit.updated);
    }

    #[tokio::test]
    async fn null_fields_leave_stored_values_untouched() {
        let service = service();
        let request = SaveVideoRequest {
            title: Field::Set("Intro".to_string()),
            description: Field::Set("basics".to_string()),
            ..Default::default()
        };
        let created = service.save(request).await.unwrap();

        let patch = SaveVideoRequest {
            id: Some(created.audit.id),
            title: Field::Null,
            description: Field::Null,
            ..Default::default()
        };
        let updated = service.save(patch).await.unwrap();
        assert_eq!(updated.title, "Intro");
        assert_eq!(updated.description, Some("basics".to_string()));

        let patch = SaveVideoRequest {
            id: Some(created.audit.id),
            description: Field::Set(String::new()),
            ..Default::default()
        };
        let updated = service.save(patch).await.unwrap();
        assert_eq!(updated.description, Some(String::new()));
    }

    #[tokio::test]
    async fn update_with_unknown_id_is_not_found_and_writes_nothing() {
        let service = service();

        let request = SaveVideoRequest {
            id: Some(Uuid::new_v4()),
            title: Field::Set("Ghost".to_string()),
            ..Default::default()
        };
        let err = service.save(request).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { entity: "id", .. }));
        assert_eq!(err.to_string(), "Video does not exist");

        let page = service.find_all(PageQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn set_completed_is_idempotent() {
        let service = service();
        let created = service.save(create_request("Intro")).await.unwrap();

        let first = service.set_completed(created.audit.id).await.unwrap();
        assert_eq!(first.completed, Some(true));

        let second = service.set_completed(created.audit.id).await.unwrap();
        assert_eq!(second.completed, Some(true));
        assert_eq!(second.title, "Intro");
    }

    #[tokio::test]
    async fn set_completed_on_unknown_id_is_not_found() {
        let service = service();

        let err = service.set_completed(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { entity: "id", .. }));
    }

    #[tokio::test]
    async fn delete_returns_the_last_state_exactly_once() {
        let service = service();
        let created = service.save(create_request("Intro")).await.unwrap();

        let deleted = service.delete(created.audit.id).await.unwrap();
        assert_eq!(deleted.title, "Intro");

        let err = service.find_by_id(created.audit.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "id", .. }));

        let err = service.delete(created.audit.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "id", .. }));
    }

    #[tokio::test]
    async fn title_lookup_is_exact_and_reports_missing_titles() {
        let service = service();
        service.save(create_request("Intro")).await.unwrap();

        let found = service.find_by_title("Intro").await.unwrap();
        assert_eq!(found.title, "Intro");

        let err = service.find_by_title("intro").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "title", .. }));
        assert_eq!(err.to_string(), "Video with the given title does not exist");
    }

    #[tokio::test]
    async fn title_lookup_prefers_the_oldest_duplicate() {
        let service = service();
        let first = service.save(create_request("Same")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        service.save(create_request("Same")).await.unwrap();

        let found = service.find_by_title("Same").await.unwrap();

        assert_eq!(found.audit.id, first.audit.id);
    }

    #[tokio::test]
    async fn filters_compose_with_and() {
        let service = service();
        let intro = service
            .save(SaveVideoRequest {
                title: Field::Set("Intro".to_string()),
                completed: Field::Set(true),
                ..Default::default()
            })
            .await
            .unwrap();
        service
            .save(SaveVideoRequest {
                title: Field::Set("Outro".to_string()),
                completed: Field::Set(false),
                ..Default::default()
            })
            .await
            .unwrap();
        service.save(create_request("Intro")).await.unwrap();

        let query = VideoQuery {
            title: Some("INTRO".to_string()),
            completed: Some(true),
            ..Default::default()
        };
        let matches = service.find_with_filters(query).await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].audit.id, intro.audit.id);
    }

    #[tokio::test]
    async fn records_without_a_flag_match_neither_completed_value() {
        let service = service();
        service.save(create_request("Unflagged")).await.unwrap();
        service
            .save(SaveVideoRequest {
                title: Field::Set("Done".to_string()),
                completed: Field::Set(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let done = service
            .find_with_filters(VideoQuery {
                completed: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "Done");

        let err = service
            .find_with_filters(VideoQuery {
                completed: Some(false),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "filterCriteria",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn an_empty_filter_result_is_not_found() {
        let service = service();
        service.save(create_request("Intro")).await.unwrap();

        let err = service
            .find_with_filters(VideoQuery {
                title: Some("missing".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "filterCriteria",
                ..
            }
        ));
        assert_eq!(err.to_string(), "No videos matched the criteria");
    }

    #[tokio::test]
    async fn a_filter_without_predicates_returns_everything() {
        let service = service();
        service.save(create_request("One")).await.unwrap();
        service.save(create_request("Two")).await.unwrap();

        let matches = service.find_with_filters(VideoQuery::default()).await.unwrap();

        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn pages_are_newest_first_with_totals() {
        let service = service();
        for title in ["first", "second", "third"] {
            service.save(create_request(title)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let page = service
            .find_all(PageQuery { page: 0, size: 2 })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "third");
        assert_eq!(page.items[1].title, "second");

        let rest = service
            .find_all(PageQuery { page: 1, size: 2 })
            .await
            .unwrap();
        assert_eq!(rest.items.len(), 1);
        assert_eq!(rest.items[0].title, "first");
    }

    #[tokio::test]
    async fn a_zero_size_page_is_empty_but_counts_records() {
        let service = service();
        service.save(create_request("Intro")).await.unwrap();

        let page = service
            .find_all(PageQuery { page: 0, size: 0 })
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn a_page_past_the_end_is_empty_but_counts_records() {
        let service = service();
        service.save(create_request("Intro")).await.unwrap();

        let page = service
            .find_all(PageQuery { page: 7, size: 10 })
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    struct FailingStore;

    #[async_trait]
    impl VideoStore for FailingStore {
        async fn get_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Video>> {
            Err(anyhow!("database unreachable"))
        }

        async fn get_by_title(&self, _title: &str) -> anyhow::Result<Option<Video>> {
            Err(anyhow!("database unreachable"))
        }

        async fn insert(&self, _draft: NewVideo) -> anyhow::Result<Video> {
            Err(anyhow!("database unreachable"))
        }

        async fn update(&self, _video: &Video) -> anyhow::Result<Option<Video>> {
            Err(anyhow!("database unreachable"))
        }

        async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
            Err(anyhow!("database unreachable"))
        }

        async fn list_all(&self) -> anyhow::Result<Vec<Video>> {
            Err(anyhow!("database unreachable"))
        }

        async fn list_page(&self, _offset: i64, _limit: i64) -> anyhow::Result<(Vec<Video>, i64)> {
            Err(anyhow!("database unreachable"))
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_unexpected() {
        let service = VideoService::new(Arc::new(FailingStore));

        let err = service.find_by_id(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Unexpected(_)));
    }
}
