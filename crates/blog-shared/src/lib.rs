//! # Blog Shared
//!
//! Wire types shared by the HTTP layer and its clients: request and response
//! DTOs, the tri-state [`Nullable`] patch value and RFC 7807 error bodies.

pub mod dto;
pub mod nullable;
pub mod response;

pub use nullable::Nullable;
pub use response::ErrorResponse;
