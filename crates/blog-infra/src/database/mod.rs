//! Database access: connection management, entities and repositories.

mod base;
mod connections;
mod post_repo;
mod repositories;
mod specification;

pub mod entity;

pub use base::SqlBaseRepository;
pub use connections::{DatabaseConfig, connect};
pub use post_repo::SqlPostRepository;
pub use repositories::{SqlCommentRepository, SqlTagRepository, SqlUserRepository};
pub use specification::PostSpecification;
