//! Response envelopes shared by every songbook endpoint
//!
//! Success: `{message, body?, metadata?}`. Failure: `{message, errors[]}`.

use serde::{Deserialize, Serialize};

use crate::pagination::PaginationMetadata;

// ========================================
// Success Envelopes
// ========================================

/// Message-only success response (delete, update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Success response carrying a single body
///
/// # Examples
///
/// ```
/// use songbook_common::api::types::BodyResponse;
///
/// let resp = BodyResponse::new("song successfully created", 42);
/// let json = serde_json::to_value(&resp).unwrap();
/// assert_eq!(json["body"], 42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyResponse<T> {
    pub message: String,
    pub body: T,
}

impl<T> BodyResponse<T> {
    pub fn new(message: impl Into<String>, body: T) -> Self {
        Self {
            message: message.into(),
            body,
        }
    }
}

/// Success response carrying one page of results plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub message: String,
    pub body: Vec<T>,
    pub metadata: PaginationMetadata,
}

impl<T> PaginatedResponse<T> {
    pub fn new(message: impl Into<String>, body: Vec<T>, metadata: PaginationMetadata) -> Self {
        Self {
            message: message.into(),
            body,
            metadata,
        }
    }
}

// ========================================
// Error Envelope
// ========================================

/// Failure response
///
/// `errors` holds per-field or per-cause messages and is omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::calculate_metadata;

    #[test]
    fn test_paginated_response_shape() {
        let resp = PaginatedResponse::new(
            "songs successfully retrieved",
            vec!["A".to_string()],
            calculate_metadata(3, 1, 1),
        );

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "songs successfully retrieved");
        assert_eq!(json["body"][0], "A");
        assert_eq!(json["metadata"]["current_page"], 1);
        assert_eq!(json["metadata"]["first_page"], 1);
        assert_eq!(json["metadata"]["last_page"], 3);
        assert_eq!(json["metadata"]["total_records"], 3);
    }

    #[test]
    fn test_error_response_omits_empty_errors() {
        let json = serde_json::to_string(&ErrorResponse::new("internal server error")).unwrap();
        assert!(!json.contains("errors"));

        let resp = ErrorResponse::with_errors("invalid request", vec!["song: must not be empty".into()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["errors"][0], "song: must not be empty");
    }
}
