//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional, not committed)
//! 4. `EVENTHUB_*` environment variables, `__` between nested keys
//!
//! A single file given through `EVENTHUB_CONFIG_FILE` or `--config` replaces
//! layers 1-3.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "EVENTHUB_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "EVENTHUB_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// `EVENTHUB_SERVER__PORT` maps to `server.port`
const ENV_PREFIX: &str = "EVENTHUB";
const ENV_SEPARATOR: &str = "__";

/// Where file-based configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `default.toml`, `{environment}.toml` and `local.toml` in a directory
    Layered(PathBuf),
    /// One file, nothing else
    SingleFile(PathBuf),
}

#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `EVENTHUB_CONFIG_DIR`, `EVENTHUB_CONFIG_FILE` and
    /// `EVENTHUB_APP_ENV`.
    ///
    /// # Errors
    ///
    /// `ConflictingSources` when both the directory and the file variable
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);
        let file = std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from);

        let source = match (dir, file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingSources {
                    dir_var: CONFIG_DIR_ENV,
                    file_var: CONFIG_FILE_ENV,
                });
            }
            (_, Some(file)) => ConfigSource::SingleFile(file),
            (Some(dir), None) => ConfigSource::Layered(dir),
            (None, None) => ConfigSource::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Switches to single-file mode.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = ConfigSource::SingleFile(path.into());
        self
    }

    /// Replaces the environment read from `EVENTHUB_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Merges every source, deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` for a missing `default.toml` or single file
    /// - `ParseError` when the merged values do not fit `Settings`
    /// - `ValidationError` from [`Settings::validate`]
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self
            .build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.source {
            ConfigSource::SingleFile(path) => toml_source(Config::builder(), path, true)?,
            ConfigSource::Layered(dir) => {
                let builder = toml_source(Config::builder(), &dir.join("default.toml"), true)?;
                let env_file = dir.join(format!("{}.toml", self.environment.as_str()));
                let builder = toml_source(builder, &env_file, false)?;
                toml_source(builder, &dir.join("local.toml"), false)?
            }
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }
}

fn toml_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    Ok(builder.add_source(
        File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
    ))
}
