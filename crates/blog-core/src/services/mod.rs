//! Services - the business rules behind each resource.
//!
//! Handlers call exactly one service method per request. Services validate
//! cross-entity rules (existence of referenced rows, uniqueness) and talk to
//! storage only through the ports.

mod comment_service;
mod post_service;
mod tag_service;
mod user_service;

pub use comment_service::CommentService;
pub use post_service::PostService;
pub use tag_service::TagService;
pub use user_service::UserService;

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Turns a repository `NotFound` into a domain `NotFound` for a known id.
pub(crate) trait RepoResultExt<T> {
    fn or_not_found(self, entity_type: &'static str, id: Uuid) -> Result<T, DomainError>;
}

impl<T> RepoResultExt<T> for Result<T, RepoError> {
    fn or_not_found(self, entity_type: &'static str, id: Uuid) -> Result<T, DomainError> {
        self.map_err(|err| match err {
            RepoError::NotFound => DomainError::not_found(entity_type, id),
            other => other.into(),
        })
    }
}
