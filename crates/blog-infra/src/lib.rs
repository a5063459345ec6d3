//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SeaORM-backed repositories, the post filter specification, connection
//! management and Argon2 password hashing.

pub mod auth;
pub mod database;

pub use auth::Argon2PasswordService;
pub use database::{
    DatabaseConfig, SqlCommentRepository, SqlPostRepository, SqlTagRepository,
    SqlUserRepository, connect,
};
