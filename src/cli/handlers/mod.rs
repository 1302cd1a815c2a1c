//! Command handlers for CLI operations
//!
//! Execution logic for each subcommand, kept apart from parsing and
//! configuration merging.

pub mod create_admin;
pub mod migrate;
pub mod serve;

pub use create_admin::CreateAdminCommandHandler;
pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
