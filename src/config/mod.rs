/// REST backend connection settings from environment variables
pub mod api;

/// Draft starting values loaded from config.toml
pub mod defaults;
