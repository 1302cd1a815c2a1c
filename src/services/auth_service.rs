//! Admin authentication and account provisioning.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Admin, NewAdmin};
use crate::repositories::AdminRepository;
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

/// Issued on a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub admin: Admin,
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminRepository>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(admins: Arc<dyn AdminRepository>, jwt: JwtConfig) -> Self {
        Self { admins, jwt }
    }

    /// Checks credentials and issues an access token.
    ///
    /// Unknown e-mails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let invalid = || AppError::Unauthorized {
            message: "Invalid email or password".to_string(),
        };

        let admin = self.admins.find_by_email(email).await?.ok_or_else(invalid)?;

        if !verify_password(password, &admin.password)? {
            tracing::warn!(admin_id = admin.id, "Rejected login with wrong password");
            return Err(invalid());
        }

        let access_token = generate_access_token(
            admin.id,
            admin.email.clone(),
            admin.name.clone(),
            &self.jwt.secret,
            self.jwt.access_token_expiration,
        )?;

        tracing::info!(admin_id = admin.id, "Admin logged in");

        Ok(AuthSession {
            admin,
            access_token,
            expires_in: self.jwt.access_token_expiration * 3600,
        })
    }

    /// Creates an admin account, hashing the password before it is stored.
    pub async fn register_admin(&self, name: &str, email: &str, password: &str) -> AppResult<Admin> {
        let admin = self
            .admins
            .create(NewAdmin {
                name: name.to_string(),
                email: email.to_string(),
                password: hash_password(password)?,
            })
            .await?;

        tracing::info!(admin_id = admin.id, "Admin account created");
        Ok(admin)
    }
}
