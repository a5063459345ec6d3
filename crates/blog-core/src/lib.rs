//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Entities, business rules and the ports infrastructure must implement.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
