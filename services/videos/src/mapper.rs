//! Conversion between stored video records and their transport shapes.
//!
//! Everything here is pure: the merge primitive builds the record an update
//! should persist, and the store applies it. Identity and the `created`
//! timestamp can never be overwritten because [`SaveVideoRequest`] does not
//! carry them; `updated` is stamped by the store on write, not here.

use crate::models::Field;
use crate::models::video::{NewVideo, SaveVideoRequest, Video, VideoResponse};

/// Convert a stored record into its client representation
pub fn to_response(video: Video) -> VideoResponse {
    VideoResponse {
        audit: video.audit,
        title: video.title,
        description: video.description,
        user_id: video.user_id,
        user_name: video.user_name,
        completed: video.completed,
    }
}

/// Build the insertable record for a creation request.
///
/// Only supplied values are carried over; fields that were absent or `null`
/// stay unset rather than becoming zero values. Returns `None` when the
/// request carries no title, which a creation is never allowed to omit.
pub fn new_video(request: &SaveVideoRequest) -> Option<NewVideo> {
    let title = request.title.as_set()?.clone();

    Some(NewVideo {
        title,
        description: request.description.clone().into_option(),
        user_id: request.user_id.clone().into_option(),
        user_name: request.user_name.clone().into_option(),
        completed: request.completed.clone().into_option(),
    })
}

/// Merge a partial update onto an existing record.
///
/// Field-by-field conditional overwrite: a field that was sent with a value
/// (an empty string is a value) replaces the stored one, a field that was
/// absent or sent as `null` is left untouched. A partial update can
/// therefore never turn into a full overwrite.
pub fn merge(request: &SaveVideoRequest, mut existing: Video) -> Video {
    if let Field::Set(title) = &request.title {
        existing.title = title.clone();
    }
    if let Field::Set(description) = &request.description {
        existing.description = Some(description.clone());
    }
    if let Field::Set(user_id) = &request.user_id {
        existing.user_id = Some(*user_id);
    }
    if let Field::Set(user_name) = &request.user_name {
        existing.user_name = Some(user_name.clone());
    }
    if let Field::Set(completed) = &request.completed {
        existing.completed = Some(*completed);
    }

    existing
}
