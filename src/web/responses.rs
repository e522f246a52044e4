//! HTTP response types
//!
//! Structured JSON bodies for the lookup surface. Absence of a file is
//! a 404 with a machine-readable body; any unexpected handler error
//! surfaces as a structured 500. The process never crashes from a
//! request.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use crate::errors::WebError;

/// Body of every non-image response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

/// 404 for a known route whose item has no materialized image.
pub fn image_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            message: "Image Not Found".to_string(),
        }),
    )
        .into_response()
}

/// 404 for any unmatched path.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            message: "Not Found".to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let message = if message.is_empty() {
            "Internal Server Error".to_string()
        } else {
            message
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": message })),
        )
            .into_response()
    }
}
