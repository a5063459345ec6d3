use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - belongs to exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            body,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a comment. The post reference is checked by the service.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub post_id: Option<Uuid>,
}

/// Update of a comment. `post_id: None` keeps the current post.
#[derive(Debug, Clone)]
pub struct CommentChanges {
    pub body: String,
    pub post_id: Option<Uuid>,
}
