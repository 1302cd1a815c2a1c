//! Success envelope shared by every admin endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata attached to every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResponseMetadata {
    /// Short human-readable outcome
    #[schema(example = "Event saved successfully.")]
    pub message: String,
    /// Mirrors the HTTP status of the response
    #[serde(rename = "statusCode")]
    #[schema(example = 200)]
    pub status_code: u16,
}

/// `{ "_data": T, "_metadata": { "message", "statusCode" } }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "_data")]
    pub data: T,
    #[serde(rename = "_metadata")]
    pub metadata: ResponseMetadata,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data,
            metadata: ResponseMetadata {
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(data, message, StatusCode::OK)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(data, message, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiEnvelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.metadata.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
