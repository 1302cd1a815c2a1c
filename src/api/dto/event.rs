//! Event creation DTOs and the multipart form extractor.

use axum::extract::{FromRequest, Multipart, Request};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::format_timestamp;
use crate::error::{AppError, AppResult};
use crate::models::Event;
use crate::services::ImageUpload;
use crate::state::AppState;

/// Validated event fields taken from the submitted form.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,
    pub starts_at: Option<Timestamp>,
}

/// Form layout of `POST /event`, for the OpenAPI document only.
#[allow(dead_code)]
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateEventForm {
    #[schema(example = "Autumn Meetup")]
    title: String,
    description: Option<String>,
    location: Option<String>,
    /// RFC 3339 timestamp
    #[schema(example = "2026-11-01T18:00:00Z")]
    starts_at: Option<String>,
    /// Optional image file
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Autumn Meetup")]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[schema(example = "2026-11-01T18:00:00.000Z")]
    pub starts_at: Option<String>,
    pub image_url: Option<String>,
    /// Admin that created the event
    pub created_by: i32,
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub updated_at: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            starts_at: event.starts_at.as_ref().map(format_timestamp),
            image_url: event.image_url,
            created_by: event.created_by,
            created_at: format_timestamp(&event.created_at),
            updated_at: format_timestamp(&event.updated_at),
        }
    }
}

/// A parsed and validated `multipart/form-data` event submission.
///
/// Recognised parts: `title`, `description`, `location`, `startsAt` and an
/// optional `image` file. An `image` part without content counts as absent.
#[derive(Debug)]
pub struct EventSubmission {
    pub request: CreateEventRequest,
    pub image: Option<ImageUpload>,
}

impl FromRequest<AppState> for EventSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> AppResult<Self> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let max_image_bytes = state.settings.upload.max_image_bytes;

        let mut request = CreateEventRequest::default();
        let mut image = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => request.title = field.text().await?.trim().to_string(),
                "description" => request.description = non_blank(field.text().await?),
                "location" => request.location = non_blank(field.text().await?),
                "startsAt" => {
                    request.starts_at = match non_blank(field.text().await?) {
                        Some(raw) => Some(parse_starts_at(&raw)?),
                        None => None,
                    }
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if bytes.is_empty() {
                        continue;
                    }
                    if !content_type.starts_with("image/") {
                        return Err(AppError::UnsupportedMedia {
                            message: format!(
                                "Event image must be an image, got '{}'",
                                content_type
                            ),
                        });
                    }
                    if bytes.len() > max_image_bytes {
                        return Err(AppError::PayloadTooLarge {
                            message: format!(
                                "Event image exceeds {} bytes",
                                max_image_bytes
                            ),
                        });
                    }
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        request.validate()?;
        Ok(EventSubmission { request, image })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_starts_at(raw: &str) -> AppResult<Timestamp> {
    raw.parse().map_err(|_| AppError::Validation {
        field: "startsAt".to_string(),
        reason: format!("'{}' is not an RFC 3339 timestamp", raw),
    })
}
