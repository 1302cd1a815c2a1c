//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the image store and handlers.

mod admin_service;
mod auth_service;

#[cfg(test)]
pub mod testing;

pub use admin_service::{AdminService, ImageUpload};
pub use auth_service::{AuthService, AuthSession};

use std::sync::Arc;

use crate::config::Settings;
use crate::external::ImageStore;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub admin: AdminService,
    pub auth: AuthService,
}

impl Services {
    pub fn new(repos: Repositories, images: Arc<dyn ImageStore>, settings: &Settings) -> Self {
        Self {
            admin: AdminService::new(
                repos.admins.clone(),
                repos.user_inquiries,
                repos.events,
                images,
                settings.upload.clone(),
            ),
            auth: AuthService::new(repos.admins, settings.jwt.clone()),
        }
    }
}
