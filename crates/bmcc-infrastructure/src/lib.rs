//! File-system adapters for the BMCC guide: config directory layout,
//! `secret.json`, `config.toml`, and log output.

pub mod config_service;
pub mod logging;
pub mod paths;
pub mod secret_service;

pub use config_service::ConfigService;
pub use logging::init_tracing;
pub use paths::{GuidePaths, PathError};
pub use secret_service::{API_KEY_ENV, SecretServiceImpl};
