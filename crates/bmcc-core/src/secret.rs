//! Secret management service trait.
//!
//! Defines the interface for loading the Gemini API key.

use crate::config::SecretConfig;
use crate::error::{GuideError, Result};

/// Service for loading secret configuration.
///
/// The completion client asks for the key on every call, so a key added
/// while the guide is running is picked up by the next question.
///
/// # Security Note
///
/// Implementations must never log the key or put it in error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Returns the API key, or `MissingCredential` when none is configured.
    async fn api_key(&self) -> Result<String> {
        self.load_secrets()
            .await?
            .gemini_api_key()
            .ok_or(GuideError::MissingCredential)
    }
}

/// Fixed secrets held in memory. Used by tests and embedders that manage
/// keys themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretService {
    config: SecretConfig,
}

impl StaticSecretService {
    pub fn new(config: SecretConfig) -> Self {
        Self { config }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(SecretConfig {
            gemini: Some(crate::config::GeminiConfig {
                api_key: api_key.into(),
                model_name: None,
            }),
        })
    }
}

#[async_trait::async_trait]
impl SecretService for StaticSecretService {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        Ok(self.config.clone())
    }
}
