//! Create-admin command handler
//!
//! Provisions admin accounts from the command line; the HTTP API has no
//! registration endpoint.

use std::sync::Arc;

use validator::ValidateEmail;

use crate::cli::parser::ADMIN_PASSWORD_ENV;
use crate::config::settings::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::{AppError, AppResult};
use crate::models::Admin;
use crate::repositories::PgAdminRepository;
use crate::services::AuthService;

const MIN_PASSWORD_LEN: usize = 8;

pub struct CreateAdminCommandHandler {
    config: Settings,
}

impl CreateAdminCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(
        &self,
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> AppResult<()> {
        let pool = establish_async_connection_pool(&self.config.database).await?;
        let auth = AuthService::new(
            Arc::new(PgAdminRepository::new(pool)),
            self.config.jwt.clone(),
        );

        let admin = create_admin(&auth, name, email, password).await?;
        println!("✓ Created admin #{} <{}>", admin.id, admin.email);
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

/// Validates the input and registers the admin through `auth`.
pub async fn create_admin(
    auth: &AuthService,
    name: &str,
    email: &str,
    password: Option<&str>,
) -> AppResult<Admin> {
    let name = name.trim();
    let email = email.trim();

    if !email.validate_email() {
        return Err(AppError::Validation {
            field: "email".to_string(),
            reason: format!("'{}' is not a valid e-mail address", email),
        });
    }

    let password = password.ok_or_else(|| AppError::Validation {
        field: "password".to_string(),
        reason: format!("Pass --password or set {}", ADMIN_PASSWORD_ENV),
    })?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation {
            field: "password".to_string(),
            reason: format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        });
    }

    auth.register_admin(name, email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::valid_settings;
    use crate::repositories::memory::InMemoryAdminRepository;
    use crate::repositories::AdminRepository;
    use crate::utils::password::verify_password;

    fn auth_with(repo: Arc<InMemoryAdminRepository>) -> AuthService {
        AuthService::new(repo, valid_settings().jwt)
    }

    #[tokio::test]
    async fn test_creates_admin_with_hashed_password() {
        let repo = Arc::new(InMemoryAdminRepository::default());
        let auth = auth_with(repo.clone());

        let admin = create_admin(&auth, " Ops ", "ops@example.com", Some("s3cret-pass"))
            .await
            .unwrap();

        assert_eq!(admin.name, "Ops");
        let stored = repo.find_by_email("ops@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password, "s3cret-pass");
        assert!(verify_password("s3cret-pass", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let auth = auth_with(Arc::new(InMemoryAdminRepository::default()));
        create_admin(&auth, "Ops", "ops@example.com", Some("s3cret-pass"))
            .await
            .unwrap();

        let err = create_admin(&auth, "Other", "ops@example.com", Some("another-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { ref field, .. } if field == "email"));
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let auth = auth_with(Arc::new(InMemoryAdminRepository::default()));

        let cases = [
            ("not-an-email", Some("s3cret-pass"), "email"),
            ("ops@example.com", None, "password"),
            ("ops@example.com", Some("short"), "password"),
        ];
        for (email, password, expected_field) in cases {
            match create_admin(&auth, "Ops", email, password).await {
                Err(AppError::Validation { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("Expected validation error on {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_handler_keeps_config() {
        let config = valid_settings();
        let handler = CreateAdminCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }
}
