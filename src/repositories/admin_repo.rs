//! Admin repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{Admin, NewAdmin};

/// Persistence operations on admin accounts.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, new_admin: NewAdmin) -> Result<Admin, AppError>;

    async fn find_by_id(&self, admin_id: i32) -> Result<Option<Admin>, AppError>;

    async fn find_by_email(&self, admin_email: &str) -> Result<Option<Admin>, AppError>;
}

/// PostgreSQL admin repository.
///
/// `AsyncDbPool` (bb8::Pool) uses `Arc` internally, so cloning is cheap.
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: AsyncDbPool,
}

impl PgAdminRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn create(&self, new_admin: NewAdmin) -> Result<Admin, AppError> {
        use crate::schema::admins::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(admins)
            .values(&new_admin)
            .returning(Admin::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create admin"))
    }

    async fn find_by_id(&self, admin_id: i32) -> Result<Option<Admin>, AppError> {
        use crate::schema::admins::dsl::*;
        let mut conn = self.pool.get().await?;

        admins
            .filter(id.eq(admin_id))
            .select(Admin::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find admin by id"))
    }

    async fn find_by_email(&self, admin_email: &str) -> Result<Option<Admin>, AppError> {
        use crate::schema::admins::dsl::*;
        let mut conn = self.pool.get().await?;

        admins
            .filter(email.eq(admin_email))
            .select(Admin::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find admin by email"))
    }
}
