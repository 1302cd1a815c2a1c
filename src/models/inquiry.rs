use diesel::prelude::*;
use jiff_diesel::DateTime;

/// Contact inquiry submitted by a site visitor
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::user_inquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserInquiry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime,
}
