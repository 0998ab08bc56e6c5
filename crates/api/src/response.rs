//! Shared response envelope for API handlers.
//!
//! Every success body has the shape
//! `{ "status": "success", "message"?: ..., "data"?: ... }`. Errors use the
//! matching `{ "status": "error", ... }` shape built in [`crate::error`].

use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::data(project)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Payload only.
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    /// Payload with a human-readable message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Message only, no `data` key.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }
}
