//! Path management for guide configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/bmcc-guide/        # Config directory (platform config dir)
//! ├── config.toml              # Endpoint, retry and knowledge settings
//! ├── secret.json              # Gemini API key
//! └── logs/                    # Application logs
//!     └── bmcc-guide.log.YYYY-MM-DD
//! ```

use bmcc_core::config::{GeminiConfig, SecretConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "bmcc-guide";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find the user configuration directory")]
    ConfigDirNotFound,
}

/// Resolves every file the guide reads or writes.
///
/// `GuidePaths::from_platform()` uses the platform config directory; tests and the
/// `--config-dir` flag pass an explicit root instead.
#[derive(Debug, Clone)]
pub struct GuidePaths {
    root: PathBuf,
}

impl GuidePaths {
    /// Uses `root` as the config directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<platform config dir>/bmcc-guide`.
    pub fn from_platform() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::new(base.join(APP_DIR)))
    }

    /// Explicit root if given, platform default otherwise.
    pub fn resolve(root: Option<&Path>) -> Result<Self, PathError> {
        match root {
            Some(root) => Ok(Self::new(root)),
            None => Self::from_platform(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to `secret.json`. Keep it at 600 permissions.
    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Ensures the secret file exists, creating an empty template if it doesn't.
    ///
    /// On Unix the new file gets mode 600 (user read/write only).
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        tracing::info!("[Paths] created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}
