use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Deserialize;

/// Admin account as stored; `password` holds the argon2 PHC string.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Admin {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::admins)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}
