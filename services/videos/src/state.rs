//! Application state shared across handlers

use crate::service::VideoService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: VideoService,
}
