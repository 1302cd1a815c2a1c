//! Serve command handler
//!
//! Either validates configuration (dry run) or runs the HTTP server.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server until a shutdown signal, or only validates when
    /// `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }

        Server::new(self.config).run().await
    }

    /// Validates configuration without binding or touching the database.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database URL is configured");
        println!(
            "✓ Image uploads go to Cloudinary cloud '{}' (max {} bytes)",
            self.config.cloudinary.cloud_name, self.config.upload.max_image_bytes
        );
        println!(
            "✓ Auth guard on /user-inquries: {}",
            if self.config.auth.routes.user_inquiries {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::valid_settings;
    use crate::error::AppError;

    #[test]
    fn test_serve_handler_new() {
        let config = valid_settings();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(valid_settings());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = valid_settings();
        config.server.port = 0;

        let err = ServeCommandHandler::new(config).validate_only().unwrap_err();
        assert!(matches!(err, AppError::Configuration { .. }));
    }
}
