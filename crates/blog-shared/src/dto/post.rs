use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::rules::not_blank;
use super::{CommentResponse, TagResponse};
use crate::Nullable;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(required(message = "is required"))]
    pub author_id: Option<Uuid>,

    #[validate(
        length(min = 2, max = 100, message = "must be between 2 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub slug: String,

    #[validate(
        length(min = 2, max = 100, message = "must be between 2 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 10, message = "must be at least 10 characters long"),
        custom(function = "not_blank")
    )]
    pub content: String,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Request to update a post.
///
/// `title` and `content` are always replaced. `tagIds` is tri-state: omitted
/// keeps the current tags, `null` removes them all, a list replaces them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(
        length(min = 2, max = 100, message = "must be between 2 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 10, message = "must be at least 10 characters long"),
        custom(function = "not_blank")
    )]
    pub content: String,

    #[validate(
        length(min = 2, max = 100, message = "must be between 2 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub slug: Option<String>,

    pub published: Option<bool>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tag_ids: Nullable<Vec<Uuid>>,
}

/// Query string accepted by `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub author_id: Option<Uuid>,
    /// Only posts created after this date (00:00 UTC).
    pub created_at_gt: Option<NaiveDate>,
    /// Only posts created before this date (00:00 UTC).
    pub created_at_lt: Option<NaiveDate>,
    pub tag_id: Option<Uuid>,
    pub title_cont: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
