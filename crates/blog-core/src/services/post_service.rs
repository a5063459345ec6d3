use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Page, PageRequest, Post, PostChanges, PostDetails, PostFilter};
use crate::error::DomainError;
use crate::ports::{PostRepository, TagRepository, UserRepository};

use super::RepoResultExt;

const ENTITY: &str = "Post";

/// Post management, including the tag links of each post.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    tags: Arc<dyn TagRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self { posts, users, tags }
    }

    pub async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostDetails>, DomainError> {
        if page.offset().is_none() {
            return Err(DomainError::InvalidArgument(format!(
                "Page {} of size {} is out of range",
                page.page, page.size
            )));
        }
        Ok(self.posts.find_page(filter, page).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<PostDetails, DomainError> {
        self.posts
            .find_details(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Create a post. The author and every tag must already exist.
    pub async fn create(&self, input: NewPost) -> Result<PostDetails, DomainError> {
        if !self.users.exists(input.author_id).await? {
            return Err(DomainError::not_found("User", input.author_id));
        }
        self.ensure_slug_free(&input.slug).await?;

        let tag_ids = dedup(input.tag_ids);
        self.ensure_tags_exist(&tag_ids).await?;

        let post = Post::new(
            input.author_id,
            input.slug,
            input.title,
            input.content,
            input.published,
        );
        let details = self.posts.insert_with_tags(post, &tag_ids).await?;
        tracing::info!(post_id = %details.post.id, tags = tag_ids.len(), "Post created");
        Ok(details)
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<PostDetails, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        if let Some(slug) = &changes.slug {
            if *slug != post.slug {
                self.ensure_slug_free(slug).await?;
            }
        }

        let tag_ids = changes.tag_ids.clone().map(dedup);
        if let Some(ids) = &tag_ids {
            self.ensure_tags_exist(ids).await?;
        }

        post.apply(&changes);
        let details = self
            .posts
            .update_with_tags(post, tag_ids.as_deref())
            .await
            .or_not_found(ENTITY, id)?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(details)
    }

    /// Delete a post. Its comments and tag links go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.posts.exists(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        self.posts.delete(id).await.or_not_found(ENTITY, id)?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str) -> Result<(), DomainError> {
        if self.posts.find_by_slug(slug).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Post with slug '{}' already exists",
                slug
            )));
        }
        Ok(())
    }

    async fn ensure_tags_exist(&self, ids: &[Uuid]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }
        let found: HashSet<Uuid> = self
            .tags
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        match ids.iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(DomainError::not_found("Tag", *missing)),
            None => Ok(()),
        }
    }
}

/// Drop repeated ids, keeping first occurrences in order.
fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
