//! Configuration types shared by the guide crates.
//!
//! `SecretConfig` mirrors `secret.json`; `GuideConfig` mirrors `config.toml`.
//! Loading lives in `bmcc-infrastructure`.

use crate::error::{GuideError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The Gemini key, if one is present and not blank.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    pub fn gemini_model(&self) -> Option<String> {
        self.gemini
            .as_ref()
            .and_then(|g| g.model_name.as_ref())
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Root of `config.toml`. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct GuideConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_secs() -> u64 {
    1
}

/// Completion endpoint settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Ceiling for a single attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts when the endpoint answers 503.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Wait before the first retry; doubles after every further 503.
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_secs(self.base_delay_secs)
    }

    /// Rejects settings the client cannot work with: no attempts at all, or
    /// a zero per-attempt timeout.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(GuideError::config(
                "completion.max_attempts must be at least 1",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(GuideError::config(
                "completion.timeout_secs must be at least 1",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(GuideError::config("completion.model must not be empty"));
        }
        Ok(())
    }
}

/// Knowledge base override.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct KnowledgeConfig {
    /// Plain-text file used verbatim instead of the built-in BMCC facts.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: GuideConfig = toml::from_str("").unwrap();
        assert_eq!(config, GuideConfig::default());
        assert_eq!(config.completion.timeout(), Duration::from_secs(30));
        assert_eq!(config.completion.max_attempts, 5);
        assert_eq!(config.completion.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: GuideConfig = toml::from_str(
            r#"
            [completion]
            model = "gemini-2.0-flash"
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.completion.model, "gemini-2.0-flash");
        assert_eq!(config.completion.max_attempts, 3);
        assert_eq!(config.completion.base_delay_secs, 1);
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_validate_rejects_unusable_settings() {
        assert!(CompletionConfig::default().validate().is_ok());

        let no_attempts = CompletionConfig {
            max_attempts: 0,
            ..CompletionConfig::default()
        };
        assert!(matches!(no_attempts.validate(), Err(GuideError::Config(_))));

        let no_timeout = CompletionConfig {
            timeout_secs: 0,
            ..CompletionConfig::default()
        };
        assert!(matches!(no_timeout.validate(), Err(GuideError::Config(_))));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "   "}}"#).unwrap();
        assert_eq!(secrets.gemini_api_key(), None);

        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "abc", "model_name": "m"}}"#).unwrap();
        assert_eq!(secrets.gemini_api_key().as_deref(), Some("abc"));
        assert_eq!(secrets.gemini_model().as_deref(), Some("m"));
    }
}
