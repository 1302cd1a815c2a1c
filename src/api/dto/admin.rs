use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format_timestamp;
use crate::models::Admin;

/// Admin profile; the password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Admin")]
    pub name: String,
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T12:00:00.000Z")]
    pub updated_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            created_at: format_timestamp(&admin.created_at),
            updated_at: format_timestamp(&admin.updated_at),
        }
    }
}
