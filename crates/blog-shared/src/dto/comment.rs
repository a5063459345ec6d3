use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::rules::not_blank;

/// Request to create a comment. A missing `postId` is rejected by the
/// service as an invalid argument rather than a validation error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"),
        custom(function = "not_blank")
    )]
    pub body: String,

    pub post_id: Option<Uuid>,
}

/// Request to update a comment. `postId`, when given, moves the comment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[validate(
        length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"),
        custom(function = "not_blank")
    )]
    pub body: String,

    pub post_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub body: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}
