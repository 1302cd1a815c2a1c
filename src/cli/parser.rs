//! CLI argument parsing with clap
//!
//! Commands, global flags and their help text.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Environment variable consulted when `create-admin` is run without `--password`
pub const ADMIN_PASSWORD_ENV: &str = "EVENTHUB_ADMIN_PASSWORD";

/// Admin API for the EventHub platform
#[derive(Parser, Debug)]
#[command(name = "eventhub-admin")]
#[command(about = "Admin API for the EventHub platform")]
#[command(long_about = "
eventhub-admin serves the administrative REST API of EventHub: the
authenticated admin profile, the user inquiry inbox and event creation with
optional image upload.

EXAMPLES:
    # Start the server with default configuration
    eventhub-admin serve

    # Start server on custom host and port
    eventhub-admin serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    eventhub-admin --config /etc/eventhub/production.toml serve

    # Check configuration without starting the server
    eventhub-admin serve --dry-run

    # Apply or preview database migrations
    eventhub-admin migrate
    eventhub-admin migrate --dry-run

    # Provision an admin account (password read from EVENTHUB_ADMIN_PASSWORD)
    eventhub-admin create-admin --name 'Ops' --email ops@example.com
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads this single TOML file instead of the layered `config/` directory.
    /// `EVENTHUB_*` environment variables still override its values.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` layer is loaded instead of
    /// reading `EVENTHUB_APP_ENV`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   eventhub-admin serve                           # Start with defaults
    ///   eventhub-admin serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   eventhub-admin serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to (default: 127.0.0.1)
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (default: 3000)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit without binding
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   eventhub-admin migrate                    # Apply all pending migrations
    ///   eventhub-admin migrate --dry-run          # Show pending migrations without applying
    ///   eventhub-admin migrate --rollback 1       # Revert the most recent migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Provision an admin account
    ///
    /// The password is hashed with argon2 before it is stored. Registering an
    /// e-mail that already exists fails.
    CreateAdmin {
        /// Display name of the admin
        #[arg(long)]
        name: String,

        /// Login e-mail of the admin
        #[arg(long)]
        email: String,

        /// Login password; prefer the environment variable over the flag
        #[arg(long, env = ADMIN_PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        match &self.command {
            Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(_),
            }) => Err("Cannot use --dry-run and --rollback together".to_string()),
            Some(Commands::CreateAdmin { name, email, .. }) => {
                if name.trim().is_empty() {
                    return Err("--name cannot be blank".to_string());
                }
                if email.trim().is_empty() {
                    return Err("--email cannot be blank".to_string());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
        .to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
