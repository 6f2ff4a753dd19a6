//! # Songbook Common Library
//!
//! Shared code for the songbook service:
//! - Error type
//! - Configuration resolution
//! - Pagination metadata
//! - API response envelopes
//! - Database bootstrap

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod pagination;

pub use error::{Error, Result};
pub use pagination::{calculate_metadata, PageRequest, PaginationMetadata};
