//! Admin endpoints: own profile, user inquiries and event creation.

use axum::{
    Extension, middleware,
    extract::{DefaultBodyLimit, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ADMIN_TAG;
use crate::api::dto::{
    AdminResponse, ApiEnvelope, CreateEventForm, ErrorResponse, EventResponse, EventSubmission,
    UserInquiryResponse,
};
use crate::api::middleware::{ApiResult, AuthAdmin, Describe, auth_middleware};
use crate::error::AppError;
use crate::state::AppState;

/// Room for the text parts of an event form on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Creates the admin routes.
///
/// # Routes
/// - `GET /me` - Authenticated admin's profile
/// - `GET /user-inquries` - All contact inquiries
/// - `POST /event` - Create an event with an optional image
///
/// Each route gets the auth middleware when its flag in `auth.routes` is set.
pub fn admin_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let guards = &state.settings.auth.routes;
    let body_limit = state.settings.upload.max_image_bytes + FORM_OVERHEAD_BYTES;

    OpenApiRouter::new()
        .merge(guarded(
            OpenApiRouter::new().routes(routes!(get_me)),
            guards.me,
            state,
        ))
        .merge(guarded(
            OpenApiRouter::new().routes(routes!(get_all_user_inquries)),
            guards.user_inquiries,
            state,
        ))
        .merge(guarded(
            OpenApiRouter::new()
                .routes(routes!(create_event))
                .layer(DefaultBodyLimit::max(body_limit)),
            guards.create_event,
            state,
        ))
}

fn guarded(
    router: OpenApiRouter<AppState>,
    enabled: bool,
    state: &AppState,
) -> OpenApiRouter<AppState> {
    if enabled {
        router.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    } else {
        router
    }
}

/// GET /api/v1/me - Get the authenticated admin
#[utoipa::path(
    get,
    path = "/me",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Admin profile", body = ApiEnvelope<AdminResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Admin no longer exists", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_me(
    State(state): State<AppState>,
    Extension(auth_admin): Extension<AuthAdmin>,
) -> ApiResult<ApiEnvelope<AdminResponse>> {
    let admin = state
        .services
        .admin
        .get_me(auth_admin.admin_id)
        .await
        .describe("Failed to fetch me")?;

    Ok(ApiEnvelope::ok(
        AdminResponse::from(admin),
        "Admin successfully me fetched.",
    ))
}

/// GET /api/v1/user-inquries - List contact inquiries, newest first
#[utoipa::path(
    get,
    path = "/user-inquries",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "All user inquiries", body = ApiEnvelope<Vec<UserInquiryResponse>>),
        (status = 400, description = "Inquiries could not be loaded", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_all_user_inquries(
    State(state): State<AppState>,
) -> ApiResult<ApiEnvelope<Vec<UserInquiryResponse>>> {
    let inquiries = state
        .services
        .admin
        .get_all_user_inquiries()
        .await
        .describe("Failed to fetch user inquries.")?;

    Ok(ApiEnvelope::ok(
        inquiries.into_iter().map(UserInquiryResponse::from).collect(),
        "User inquries successfully fetched.",
    ))
}

/// POST /api/v1/event - Create an event
///
/// An attached image is uploaded to the image store before the event is
/// saved; it is removed again if saving fails.
#[utoipa::path(
    post,
    path = "/event",
    tag = ADMIN_TAG,
    request_body(content = CreateEventForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created", body = ApiEnvelope<EventResponse>),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
        (status = 415, description = "Attachment is not an image", body = ErrorResponse),
        (status = 502, description = "Image storage failed", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_event(
    State(state): State<AppState>,
    Extension(auth_admin): Extension<AuthAdmin>,
    submission: Result<EventSubmission, AppError>,
) -> ApiResult<ApiEnvelope<EventResponse>> {
    let EventSubmission { request, image } = submission.describe("Failed to save new event.")?;

    let event = state
        .services
        .admin
        .publish_event(request, auth_admin.admin_id, image)
        .await
        .describe("Failed to save new event.")?;

    Ok(ApiEnvelope::created(
        EventResponse::from(event),
        "Event saved successfully.",
    ))
}
