//! Shared HTTP API types
//!
//! Framework-free response envelopes. The service crate wraps them with
//! axum `IntoResponse` implementations.

pub mod types;

pub use types::{BodyResponse, ErrorResponse, MessageResponse, PaginatedResponse};
