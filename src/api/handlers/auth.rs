//! Authentication handlers.

use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{AdminResponse, ApiEnvelope, ErrorResponse, LoginRequest, LoginResponse};
use crate::api::middleware::{ApiResult, Describe};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /login` - Authenticate an admin and get an access token
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(login))
}

/// POST /api/v1/auth/login - Authenticate admin
///
/// Credentials are validated before they reach the auth service.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiEnvelope<LoginResponse>),
        (status = 400, description = "Invalid credentials format", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<LoginRequest>, AppError>,
) -> ApiResult<ApiEnvelope<LoginResponse>> {
    let ValidatedJson(credentials) = payload.describe("Failed to log in.")?;

    let session = state
        .services
        .auth
        .login(&credentials.email, &credentials.password)
        .await
        .describe("Failed to log in.")?;

    Ok(ApiEnvelope::ok(
        LoginResponse {
            admin: AdminResponse::from(session.admin),
            access_token: session.access_token,
            token_type: "Bearer".to_string(),
            expires_in: session.expires_in,
        },
        "Admin successfully logged in.",
    ))
}
