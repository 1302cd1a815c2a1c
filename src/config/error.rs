//! Errors raised while loading or validating configuration

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing
    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The merged sources do not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value is out of range or inconsistent
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// `EVENTHUB_APP_ENV` or `--env` names an unknown environment
    #[error("Invalid environment '{value}'. Valid values are: {expected}")]
    InvalidEnvironment { value: String, expected: String },

    /// Both a config directory and a single config file were requested
    #[error("{dir_var} and {file_var} cannot both be set; use one source of configuration")]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field path the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_helper_and_field() {
        let err = ConfigError::validation("server.port", "Port must be between 1 and 65535.");
        assert_eq!(err.field(), Some("server.port"));
        assert_eq!(
            err.to_string(),
            "Validation error: server.port - Port must be between 1 and 65535."
        );
    }

    #[test]
    fn test_file_not_found_message() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("config/default.toml"),
        };
        assert_eq!(err.field(), None);
        assert!(err.to_string().ends_with("config/default.toml"));
    }
}
