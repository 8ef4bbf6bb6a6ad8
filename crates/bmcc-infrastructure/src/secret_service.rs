//! Secret service implementation backed by `secret.json`.

use crate::paths::GuidePaths;
use bmcc_core::config::{GeminiConfig, SecretConfig};
use bmcc_core::secret::SecretService;
use bmcc_core::{GuideError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable consulted when `secret.json` has no key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Loads the Gemini key from `secret.json`, falling back to the environment.
///
/// A configuration that contains a key is cached. While no key is available
/// the file is read again on every call, so adding a key takes effect on the
/// next question without a restart.
#[derive(Clone)]
pub struct SecretServiceImpl {
    file_path: PathBuf,
    env_api_key: Option<String>,
    /// Cached secret config loaded from the file.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Reads `secret.json` under `paths` and captures `GEMINI_API_KEY`.
    pub fn new(paths: &GuidePaths) -> Self {
        Self::with_env_key(paths, std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`SecretServiceImpl::new`] with an explicit environment value.
    pub fn with_env_key(paths: &GuidePaths, env_api_key: Option<String>) -> Self {
        Self {
            file_path: paths.secret_file(),
            env_api_key: env_api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    fn read_file(&self) -> Result<SecretConfig> {
        if !self.file_path.exists() {
            return Ok(SecretConfig::default());
        }
        let content = std::fs::read_to_string(&self.file_path).map_err(|e| {
            GuideError::io(format!(
                "Failed to read {}: {}",
                self.file_path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            GuideError::config(format!(
                "Failed to parse {}: {}",
                self.file_path.display(),
                e
            ))
        })
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self.secrets.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.read_file()?;
        if loaded.gemini_api_key().is_none() {
            if let Some(ref key) = self.env_api_key {
                tracing::debug!("[Secrets] using {} from the environment", API_KEY_ENV);
                let model_name = loaded.gemini_model();
                loaded.gemini = Some(GeminiConfig {
                    api_key: key.clone(),
                    model_name,
                });
            }
        }

        if loaded.gemini_api_key().is_some() {
            let mut write_lock = self.secrets.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        } else {
            tracing::warn!(
                "[Secrets] no Gemini API key in {} or {}",
                self.file_path.display(),
                API_KEY_ENV
            );
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }
}
