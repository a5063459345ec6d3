use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentChanges, NewComment};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

use super::RepoResultExt;

const ENTITY: &str = "Comment";

/// Comment management. Every comment points at an existing post.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    pub async fn list(&self) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.ensure_post_exists(post_id).await?;
        Ok(self.comments.find_by_post_id(post_id).await?)
    }

    pub async fn create(&self, input: NewComment) -> Result<Comment, DomainError> {
        let post_id = input
            .post_id
            .ok_or_else(|| DomainError::InvalidArgument("Post ID is required".to_string()))?;
        self.ensure_post_exists(post_id).await?;

        let comment = self.comments.insert(Comment::new(post_id, input.body)).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    /// Replace the body; move the comment only when a different post id is given.
    pub async fn update(&self, id: Uuid, changes: CommentChanges) -> Result<Comment, DomainError> {
        let mut comment = self.get(id).await?;

        if let Some(post_id) = changes.post_id {
            if post_id != comment.post_id {
                self.ensure_post_exists(post_id).await?;
                comment.post_id = post_id;
            }
        }
        comment.body = changes.body;

        let comment = self.comments.update(comment).await.or_not_found(ENTITY, id)?;
        tracing::info!(comment_id = %id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.comments.exists(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        self.comments.delete(id).await.or_not_found(ENTITY, id)?;
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }

    async fn ensure_post_exists(&self, post_id: Uuid) -> Result<(), DomainError> {
        if self.posts.exists(post_id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Post", post_id))
        }
    }
}
