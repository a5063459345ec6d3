//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire. Create requests validate through
//! `#[derive(Validate)]`; patch requests holding [`Nullable`](crate::Nullable)
//! fields implement `Validate` by hand.

mod comment;
mod page;
mod post;
mod rules;
mod tag;
mod user;

pub use comment::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
pub use page::PageResponse;
pub use post::{CreatePostRequest, PostListQuery, PostResponse, UpdatePostRequest};
pub use tag::{CreateTagRequest, TagResponse, UpdateTagRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
