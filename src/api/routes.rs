//! Router configuration for the API.
//!
//! Centralized route registration, middleware stack and OpenAPI serving.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ApiDoc;
use crate::api::handlers::{admin, auth, health};
use crate::api::middleware::{
    REQUEST_ID_HEADER, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. CORS and compression
/// 2. Request ID - generates/propagates request IDs
/// 3. Logging - logs requests with request IDs
/// 4. Global error handler - rewrites non-JSON error responses, including
///    timeouts
///
/// # Routes
/// - `/api/v1/me`, `/api/v1/user-inquries`, `/api/v1/event` - Admin endpoints
/// - `/api/v1/auth/login` - Login
/// - `/health`, `/health/live` - Health checks
/// - `/docs` - Swagger UI, OpenAPI document at `/docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(
            "/api/v1",
            admin::admin_routes(&state).nest("/auth", auth::auth_routes()),
        )
        .merge(health::health_routes())
        .split_for_parts();

    let request_timeout = Duration::from_secs(state.settings.server.request_timeout);

    router
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", api))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id])
}
