//! Repository layer for data access operations.
//!
//! Each entity has a trait seam with a PostgreSQL implementation backed by
//! diesel_async. Services depend on the traits only.

mod admin_repo;
mod event_repo;
mod user_inquiry_repo;

#[cfg(test)]
pub mod memory;

pub use admin_repo::{AdminRepository, PgAdminRepository};
pub use event_repo::{EventRepository, PgEventRepository};
pub use user_inquiry_repo::{PgUserInquiryRepository, UserInquiryRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub admins: Arc<dyn AdminRepository>,
    pub user_inquiries: Arc<dyn UserInquiryRepository>,
    pub events: Arc<dyn EventRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            admins: Arc::new(PgAdminRepository::new(pool.clone())),
            user_inquiries: Arc::new(PgUserInquiryRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool)),
        }
    }
}
