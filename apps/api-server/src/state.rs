//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TagRepository, UserRepository,
};
use blog_core::services::{CommentService, PostService, TagService, UserService};
use blog_infra::{
    Argon2PasswordService, SqlCommentRepository, SqlPostRepository, SqlTagRepository,
    SqlUserRepository,
};
use sea_orm::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub tags: Arc<TagService>,
}

impl AppState {
    /// Wire the SQL repositories and services over one connection pool.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(db.clone()));
        let post_repo: Arc<dyn PostRepository> = Arc::new(SqlPostRepository::new(db.clone()));
        let comment_repo: Arc<dyn CommentRepository> =
            Arc::new(SqlCommentRepository::new(db.clone()));
        let tag_repo: Arc<dyn TagRepository> = Arc::new(SqlTagRepository::new(db.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        tracing::info!("Application state initialized");

        Self {
            users: Arc::new(UserService::new(user_repo.clone(), passwords)),
            posts: Arc::new(PostService::new(
                post_repo.clone(),
                user_repo,
                tag_repo.clone(),
            )),
            comments: Arc::new(CommentService::new(comment_repo, post_repo)),
            tags: Arc::new(TagService::new(tag_repo)),
            db,
        }
    }
}
