//! Middleware and request plumbing.

pub mod error;
pub mod validated;
