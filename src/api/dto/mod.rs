//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `envelope` - Success envelope wrapping every response
//! - `error` - Error response and code taxonomy
//! - `auth` - Login request/response
//! - `admin`, `inquiry`, `event` - Resource representations

mod admin;
mod auth;
mod envelope;
mod error;
mod event;
mod inquiry;

pub use admin::AdminResponse;
pub use auth::{LoginRequest, LoginResponse};
pub use envelope::{ApiEnvelope, ResponseMetadata};
pub use error::{ErrorCode, ErrorResponse};
pub use event::{CreateEventForm, CreateEventRequest, EventResponse, EventSubmission};
pub use inquiry::UserInquiryResponse;

/// Stored timestamps are UTC wall-clock values.
fn format_timestamp(value: &jiff_diesel::DateTime) -> String {
    value
        .to_jiff()
        .strftime("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_is_utc_millis() {
        let civil: jiff::civil::DateTime = "2026-03-04T05:06:07.5".parse().unwrap();
        let stored = jiff_diesel::DateTime::from(civil);
        assert_eq!(format_timestamp(&stored), "2026-03-04T05:06:07.500Z");
    }
}
