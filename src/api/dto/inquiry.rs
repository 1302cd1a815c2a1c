use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format_timestamp;
use crate::models::UserInquiry;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInquiryResponse {
    pub id: i32,
    #[schema(example = "Jane Visitor")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "Group tickets")]
    pub subject: Option<String>,
    pub message: String,
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub created_at: String,
}

impl From<UserInquiry> for UserInquiryResponse {
    fn from(inquiry: UserInquiry) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            subject: inquiry.subject,
            message: inquiry.message,
            created_at: format_timestamp(&inquiry.created_at),
        }
    }
}
