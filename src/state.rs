//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::external::{CloudinaryClient, ImageStore, client::build_http_client};
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: services hold `Arc`s, the pool is reference counted
/// and settings are shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Settings the application was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Builds PostgreSQL repositories and the Cloudinary image store, then
    /// wires services on top of them.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings)?;
    /// ```
    pub fn new(pool: AsyncDbPool, settings: Settings) -> anyhow::Result<Self> {
        let http = build_http_client()?;
        let images: Arc<dyn ImageStore> =
            Arc::new(CloudinaryClient::new(http, settings.cloudinary.clone()));
        let repos = Repositories::new(pool.clone());

        Ok(Self::from_parts(pool, repos, images, settings))
    }

    /// Assembles state from already constructed collaborators.
    pub fn from_parts(
        pool: AsyncDbPool,
        repos: Repositories,
        images: Arc<dyn ImageStore>,
        settings: Settings,
    ) -> Self {
        let services = Services::new(repos, images, &settings);
        Self {
            services,
            db_pool: pool,
            settings: Arc::new(settings),
        }
    }
}
