//! Shared fixtures: an in-memory SQLite database with the real schema.

#![allow(dead_code)]

use std::sync::Arc;

use blog_core::domain::{NewPost, NewUser, PostDetails, Tag, User};
use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TagRepository, UserRepository,
};
use blog_core::services::{CommentService, PostService, TagService, UserService};
use blog_infra::{
    Argon2PasswordService, SqlCommentRepository, SqlPostRepository, SqlTagRepository,
    SqlUserRepository,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DbConn};
use uuid::Uuid;

/// One pooled connection, so every query sees the same in-memory database.
pub async fn test_db() -> DbConn {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub struct Services {
    pub db: Arc<DbConn>,
    pub post_repo: Arc<dyn PostRepository>,
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub tags: TagService,
}

pub async fn services() -> Services {
    let db = Arc::new(test_db().await);

    let user_repo: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(db.clone()));
    let post_repo: Arc<dyn PostRepository> = Arc::new(SqlPostRepository::new(db.clone()));
    let comment_repo: Arc<dyn CommentRepository> = Arc::new(SqlCommentRepository::new(db.clone()));
    let tag_repo: Arc<dyn TagRepository> = Arc::new(SqlTagRepository::new(db.clone()));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    Services {
        users: UserService::new(user_repo.clone(), passwords),
        posts: PostService::new(post_repo.clone(), user_repo, tag_repo.clone()),
        comments: CommentService::new(comment_repo, post_repo.clone()),
        tags: TagService::new(tag_repo),
        post_repo,
        db,
    }
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        birthday: None,
        password: None,
    }
}

pub fn new_post(author_id: Uuid, slug: &str, tag_ids: Vec<Uuid>) -> NewPost {
    NewPost {
        author_id,
        slug: slug.to_string(),
        title: format!("Post {}", slug),
        content: "Content long enough to be valid.".to_string(),
        published: false,
        tag_ids,
    }
}

impl Services {
    pub async fn user(&self, email: &str) -> User {
        self.users.create(new_user(email)).await.expect("create user")
    }

    pub async fn post(&self, author_id: Uuid, slug: &str, tag_ids: Vec<Uuid>) -> PostDetails {
        self.posts
            .create(new_post(author_id, slug, tag_ids))
            .await
            .expect("create post")
    }

    pub async fn tag(&self, name: &str) -> Tag {
        self.tags.create(name.to_string()).await.expect("create tag")
    }
}
