//! HTTP routes for the videos service

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{OriginalUri, Path, Query, State},
    http::{Uri, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ServiceError},
    models::{
        PageQuery,
        video::{SaveVideoRequest, VideoQuery},
    },
    state::AppState,
};

/// Create the router for the videos service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/videos/ping", get(ping))
        .route(
            "/api/videos",
            get(get_videos).post(save_video).put(save_video),
        )
        .route("/api/videos/filter", get(filter_videos))
        .route(
            "/api/videos/:id",
            get(get_video_by_id)
                .patch(set_completed)
                .delete(delete_video),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "videos-service"
    }))
}

/// Plain-text liveness probe
pub async fn ping() -> impl IntoResponse {
    tracing::debug!("Ping request received");
    "pong"
}

/// List videos with pagination
pub async fn get_videos(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(page) = page.map_err(|rejection| query_mismatch(&uri, rejection))?;
    tracing::debug!(
        "Fetching videos with pagination - page: {}, size: {}",
        page.page,
        page.size
    );

    let videos = state
        .service
        .find_all(page)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    Ok(Json(videos))
}

/// List videos matching the supplied filters
pub async fn filter_videos(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<VideoQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| query_mismatch(&uri, rejection))?;
    tracing::debug!(
        "Fetching videos with filters - id: {:?}, title: {:?}, completed: {:?}",
        query.id,
        query.title,
        query.completed
    );

    let videos = state
        .service
        .find_with_filters(query)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    Ok(Json(videos))
}

/// Get a video by ID
pub async fn get_video_by_id(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| id_mismatch(&uri))?;
    tracing::debug!("Fetch video by id: [{}]", id);

    let video = state
        .service
        .find_by_id(id)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    Ok(Json(video))
}

/// Create a new video or update an existing one
pub async fn save_video(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<SaveVideoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|rejection| body_mismatch(&uri, rejection))?;

    let saved = state
        .service
        .save(payload)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    let location = format!("/api/videos/{}", saved.audit.id);
    Ok(([(LOCATION, location)], Json(saved)))
}

/// Mark a video as completed
pub async fn set_completed(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| id_mismatch(&uri))?;
    tracing::debug!("Set video completed: [{}]", id);

    let saved = state
        .service
        .set_completed(id)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    let location = uri.path().to_string();
    Ok(([(LOCATION, location)], Json(saved)))
}

/// Delete a video by ID
pub async fn delete_video(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| id_mismatch(&uri))?;
    tracing::debug!("Delete video: [{}]", id);

    let deleted = state
        .service
        .delete(id)
        .await
        .map_err(|error| ApiError::new(error, &uri))?;

    Ok(Json(deleted))
}

fn id_mismatch(uri: &Uri) -> ApiError {
    ApiError::new(
        ServiceError::TypeMismatch {
            field: "id".to_string(),
            message: "id type is invalid.".to_string(),
        },
        uri,
    )
}

fn query_mismatch(uri: &Uri, rejection: QueryRejection) -> ApiError {
    ApiError::new(
        ServiceError::TypeMismatch {
            field: "query".to_string(),
            message: rejection.body_text(),
        },
        uri,
    )
}

fn body_mismatch(uri: &Uri, rejection: JsonRejection) -> ApiError {
    ApiError::new(
        ServiceError::TypeMismatch {
            field: "video".to_string(),
            message: rejection.body_text(),
        },
        uri,
    )
}
