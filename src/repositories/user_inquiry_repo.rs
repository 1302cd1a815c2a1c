//! User inquiry repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::UserInquiry;

#[async_trait]
pub trait UserInquiryRepository: Send + Sync {
    /// All inquiries, newest first.
    async fn list_all(&self) -> Result<Vec<UserInquiry>, AppError>;
}

#[derive(Clone)]
pub struct PgUserInquiryRepository {
    pool: AsyncDbPool,
}

impl PgUserInquiryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInquiryRepository for PgUserInquiryRepository {
    async fn list_all(&self) -> Result<Vec<UserInquiry>, AppError> {
        use crate::schema::user_inquiries::dsl::*;
        let mut conn = self.pool.get().await?;

        user_inquiries
            .order((created_at.desc(), id.desc()))
            .select(UserInquiry::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list user inquiries"))
    }
}
