/// Seed catalog and display settings from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Store backend selection
pub mod store;
