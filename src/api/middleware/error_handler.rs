//! Error envelope mapping.
//!
//! Handlers return [`ApiResult`]: an [`AppError`] paired with a static
//! description of the operation that failed. Each error kind maps to its own
//! status code and [`ErrorCode`]; the error's own message is sent verbatim.

use std::borrow::Cow;
use std::error::Error as _;

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::{ErrorCode, ErrorResponse};
use crate::error::{AppError, AppResult};

/// Largest non-JSON error body the fallback rewriter reads.
const MAX_FALLBACK_BODY: usize = 64 * 1024;

/// An [`AppError`] with the description of the operation it aborted.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub description: Cow<'static, str>,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Attaches an operation description to a failed result.
///
/// ```ignore
/// let admin = state.services.admin.get_me(id).await.describe("Failed to fetch me")?;
/// ```
pub trait Describe<T> {
    fn describe(self, description: &'static str) -> ApiResult<T>;
}

impl<T> Describe<T> for AppResult<T> {
    fn describe(self, description: &'static str) -> ApiResult<T> {
        self.map_err(|error| ApiError {
            error,
            description: Cow::Borrowed(description),
        })
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let description = match &error {
            AppError::Validation { .. } | AppError::ValidationErrors { .. } => {
                "Request validation failed."
            }
            AppError::BadRequest { .. } => "The request could not be processed.",
            AppError::PayloadTooLarge { .. } => "Request payload is too large.",
            AppError::UnsupportedMedia { .. } => "Unsupported media type.",
            AppError::Unauthorized { .. } => "Authentication required.",
            AppError::Forbidden { .. } => "Access denied.",
            AppError::NotFound { .. } => "Requested resource was not found.",
            AppError::Duplicate { .. } => "Resource already exists.",
            AppError::Unexpected { .. } => "Unexpected error.",
            AppError::Upload { .. } => "Image storage request failed.",
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Internal { .. } => "Internal server error.",
        };
        ApiError {
            error,
            description: Cow::Borrowed(description),
        }
    }
}

/// Status code and client-facing code for each error kind.
pub fn classify(error: &AppError) -> (StatusCode, ErrorCode) {
    match error {
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => {
            (StatusCode::BAD_REQUEST, ErrorCode::ValidationError)
        }
        AppError::BadRequest { .. } => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        AppError::Unexpected { .. } => (StatusCode::BAD_REQUEST, ErrorCode::UnexpectedError),
        AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        AppError::NotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        AppError::Duplicate { .. } => (StatusCode::CONFLICT, ErrorCode::DuplicateEntry),
        AppError::PayloadTooLarge { .. } => {
            (StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::PayloadTooLarge)
        }
        AppError::UnsupportedMedia { .. } => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::UnsupportedMediaType,
        ),
        AppError::Upload { .. } => (StatusCode::BAD_GATEWAY, ErrorCode::UploadFailed),
        AppError::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
        AppError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ConfigurationError,
        ),
        AppError::ConnectionPool { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable)
        }
        AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError),
    }
}

impl ApiError {
    fn to_body(&self) -> (StatusCode, ErrorResponse) {
        let (status, code) = classify(&self.error);

        // A wrapped failure speaks for itself; the wrapper names where it happened.
        let (message, cause) = match self.error.source() {
            Some(source) if !self.error.hides_source() => (
                DisplayChain(source).to_string(),
                Some(self.error.to_string()),
            ),
            _ => (self.error.to_string(), None),
        };

        let mut body = ErrorResponse::new(status.as_u16(), code, &message, &self.description);
        if let Some(cause) = cause {
            body = body.with_cause(cause);
        }
        if let AppError::ValidationErrors { errors } = &self.error {
            body = body.with_errors(errors.clone());
        }

        (status, body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_body();

        if self.error.is_infrastructure() {
            let source = self
                .error
                .source()
                .map(|s| DisplayChain(s).to_string())
                .unwrap_or_default();
            tracing::error!(
                error = %self.error,
                source = %source,
                description = %self.description,
                "Request failed"
            );
        } else if status.is_server_error() {
            tracing::warn!(
                error = %self.error,
                cause = body.cause.as_deref().unwrap_or_default(),
                description = %self.description,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error = %self.error,
                status = status.as_u16(),
                description = %self.description,
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

/// Lets extractors and middleware return `AppError` directly.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

struct DisplayChain<'a>(&'a (dyn std::error::Error + 'static));

impl std::fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut next = self.0.source();
        while let Some(err) = next {
            write!(f, ": {}", err)?;
            next = err.source();
        }
        Ok(())
    }
}

/// Rewrites error responses that did not come from [`ApiError`] (router
/// fallbacks, method mismatches, framework rejections) into the error
/// envelope. JSON error bodies pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, MAX_FALLBACK_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let (code, default_message, description) = match status {
        StatusCode::NOT_FOUND => (
            ErrorCode::NotFound,
            format!("No route for {} {}", method, path),
            "Request could not be routed.",
        ),
        StatusCode::METHOD_NOT_ALLOWED => (
            ErrorCode::MethodNotAllowed,
            format!("Method {} is not allowed for {}", method, path),
            "Request could not be routed.",
        ),
        StatusCode::PAYLOAD_TOO_LARGE => (
            ErrorCode::PayloadTooLarge,
            "Request payload too large".to_string(),
            "Request payload is too large.",
        ),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => (
            ErrorCode::UnsupportedMediaType,
            "Unsupported media type".to_string(),
            "Unsupported media type.",
        ),
        StatusCode::REQUEST_TIMEOUT => (
            ErrorCode::RequestTimeout,
            "Request timed out".to_string(),
            "The request took too long to process.",
        ),
        StatusCode::UNAUTHORIZED => (
            ErrorCode::Unauthorized,
            "Unauthorized".to_string(),
            "Authentication required.",
        ),
        s if s.is_client_error() => (
            ErrorCode::BadRequest,
            "Bad request".to_string(),
            "The request could not be processed.",
        ),
        StatusCode::SERVICE_UNAVAILABLE => (
            ErrorCode::ServiceUnavailable,
            "Service temporarily unavailable".to_string(),
            "Internal server error.",
        ),
        _ => (
            ErrorCode::InternalError,
            "An internal server error occurred".to_string(),
            "Internal server error.",
        ),
    };

    // Router fallbacks send an empty body; use the synthesized message then.
    let message = if original.is_empty() {
        default_message
    } else {
        original
    };

    let body = ErrorResponse::new(status.as_u16(), code, &message, description);
    let mut rewritten = (status, Json(body)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use axum::{Router, body::Body, middleware, routing::get};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn every_kind() -> Vec<(AppError, StatusCode, &'static str)> {
        vec![
            (
                AppError::Validation {
                    field: "title".to_string(),
                    reason: "required".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::BadRequest {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (AppError::unexpected("boom"), StatusCode::BAD_REQUEST, "UNEXPECTED_ERROR"),
            (
                AppError::Unauthorized {
                    message: "no".to_string(),
                },
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                AppError::Forbidden {
                    message: "no".to_string(),
                },
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                AppError::NotFound {
                    entity: "admin".to_string(),
                    field: "id".to_string(),
                    value: "1".to_string(),
                },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::Duplicate {
                    entity: "admins".to_string(),
                    field: "email".to_string(),
                    value: "a@b.co".to_string(),
                },
                StatusCode::CONFLICT,
                "DUPLICATE_ENTRY",
            ),
            (
                AppError::PayloadTooLarge {
                    message: "big".to_string(),
                },
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
            ),
            (
                AppError::UnsupportedMedia {
                    message: "pdf".to_string(),
                },
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
            ),
            (
                AppError::Upload {
                    operation: "upload image".to_string(),
                    source: anyhow::anyhow!("Invalid image file"),
                },
                StatusCode::BAD_GATEWAY,
                "UPLOAD_FAILED",
            ),
            (
                AppError::Database {
                    operation: "insert".to_string(),
                    source: anyhow::anyhow!("password=hunter2 rejected"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("oops"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ]
    }

    #[tokio::test]
    async fn test_every_kind_maps_to_its_status_and_code() {
        for (error, status, code) in every_kind() {
            let message = match error.source() {
                Some(source) if !error.hides_source() => source.to_string(),
                _ => error.to_string(),
            };
            let response = Err::<(), _>(error)
                .describe("Failed to fetch me")
                .unwrap_err()
                .into_response();

            assert_eq!(response.status(), status, "{}", code);
            let body = body_json(response).await;
            assert_eq!(body["code"], code);
            assert_eq!(body["statusCode"], status.as_u16());
            assert_eq!(body["message"], message);
            assert_eq!(body["description"], "Failed to fetch me");
        }
    }

    #[tokio::test]
    async fn test_unexpected_message_passes_through_verbatim() {
        let response = Err::<(), _>(AppError::unexpected("inquiry store offline"))
            .describe("Failed to fetch user inquries.")
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "inquiry store offline");
        assert_eq!(body["code"], "UNEXPECTED_ERROR");
        assert!(body.get("cause").is_none());
    }

    #[tokio::test]
    async fn test_wrapped_failure_message_is_sent_with_operation_as_cause() {
        let upload = ApiError::from(AppError::Upload {
            operation: "upload image".to_string(),
            source: anyhow::anyhow!("Invalid image file"),
        });
        let body = body_json(upload.into_response()).await;
        assert_eq!(body["message"], "Invalid image file");
        assert_eq!(body["cause"], "Image upload failed: upload image");

        let database = ApiError::from(AppError::Database {
            operation: "list user inquiries".to_string(),
            source: anyhow::anyhow!("relation \"user_inquiries\" does not exist")
                .context("query failed"),
        });
        let body = body_json(database.into_response()).await;
        assert_eq!(
            body["message"],
            "query failed: relation \"user_inquiries\" does not exist"
        );
        assert_eq!(body["cause"], "Database operation failed: list user inquiries");
    }

    #[tokio::test]
    async fn test_configuration_source_stays_in_logs() {
        let error = ApiError::from(AppError::Configuration {
            key: "database.url".to_string(),
            source: anyhow::anyhow!("postgres://admin:hunter2@db/eventhub"),
        });
        let body = body_json(error.into_response()).await;

        assert_eq!(body["message"], "Configuration error: database.url");
        assert!(body.get("cause").is_none());
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_validation_errors_are_listed() {
        let error = AppError::ValidationErrors {
            errors: vec![crate::error::ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }],
        };
        let body = body_json(error.into_response()).await;

        assert_eq!(body["description"], "Request validation failed.");
        assert_eq!(body["errors"][0]["field"], "email");
    }

    fn fallback_router() -> Router {
        Router::new()
            .route("/only-get", get(|| async { "ok" }))
            .route(
                "/plain-error",
                get(|| async { (StatusCode::BAD_REQUEST, "plain text failure") }),
            )
            .layer(middleware::from_fn(global_error_handler))
    }

    #[tokio::test]
    async fn test_unknown_route_is_rewritten() {
        let response = fallback_router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "No route for GET /nope");
    }

    #[tokio::test]
    async fn test_wrong_method_is_rewritten() {
        let response = fallback_router()
            .oneshot(Request::post("/only-get").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_plain_text_error_keeps_its_message() {
        let response = fallback_router()
            .oneshot(Request::get("/plain-error").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "plain text failure");
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let response = fallback_router()
            .oneshot(Request::get("/only-get").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }
}
