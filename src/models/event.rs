use diesel::prelude::*;
use jiff_diesel::DateTime;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime>,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
    /// Admin that created the event
    pub created_by: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Insert payload; the image columns are set only when an upload succeeded.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime>,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
    pub created_by: i32,
}
