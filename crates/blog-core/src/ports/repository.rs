use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Page, PageRequest, Post, PostDetails, PostFilter, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Check whether a row with this ID exists.
    async fn exists(&self, id: ID) -> Result<bool, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Writes that touch the tag links run in one transaction.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Load a post with its tags and comments.
    async fn find_details(&self, id: Uuid) -> Result<Option<PostDetails>, RepoError>;

    /// One page of posts matching every predicate of the filter.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostDetails>, RepoError>;

    /// Insert a post and link it to the given tags.
    async fn insert_with_tags(&self, post: Post, tag_ids: &[Uuid]) -> Result<PostDetails, RepoError>;

    /// Overwrite a post; when `tag_ids` is `Some` the tag set is replaced.
    async fn update_with_tags(
        &self,
        post: Post,
        tag_ids: Option<&[Uuid]>,
    ) -> Result<PostDetails, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_all(&self) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError>;

    /// Insert all tags or none of them.
    async fn insert_many(&self, tags: Vec<Tag>) -> Result<Vec<Tag>, RepoError>;

    /// Number of posts linked to the tag.
    async fn count_posts(&self, tag_id: Uuid) -> Result<u64, RepoError>;
}
