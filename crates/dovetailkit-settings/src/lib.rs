//! # DovetailKit Settings
//!
//! Configuration file support: default joint parameters and layout tunables,
//! stored as JSON or TOML in the platform config directory.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config};
pub use error::{SettingsError, SettingsResult};
