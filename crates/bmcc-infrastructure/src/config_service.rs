//! Configuration service implementation.
//!
//! Loads `config.toml` from the guide's config directory and resolves the
//! knowledge base text it points to.

use crate::paths::GuidePaths;
use bmcc_core::config::{GuideConfig, SecretConfig};
use bmcc_core::{GuideError, KnowledgeBase, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file_path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<GuideConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &GuidePaths) -> Self {
        Self {
            file_path: paths.config_file(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse, or sets zero attempts or a zero timeout, is an error.
    pub fn get_config(&self) -> Result<GuideConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    fn load_config(&self) -> Result<GuideConfig> {
        if !self.file_path.exists() {
            tracing::info!(
                "[Config] {} not found, using defaults",
                self.file_path.display()
            );
            return Ok(GuideConfig::default());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        let config: GuideConfig = toml::from_str(&content)?;
        config.completion.validate().inspect_err(|e| {
            tracing::error!("[Config] {} rejected: {}", self.file_path.display(), e);
        })?;
        tracing::info!(
            "[Config] loaded {} (model: {})",
            self.file_path.display(),
            config.completion.model
        );
        Ok(config)
    }

    /// The configuration with `model_name` from `secret.json` applied on top.
    pub fn effective_config(&self, secrets: &SecretConfig) -> Result<GuideConfig> {
        let mut config = self.get_config()?;
        if let Some(model) = secrets.gemini_model() {
            tracing::debug!("[Config] model overridden by secret.json: {}", model);
            config.completion.model = model;
        }
        Ok(config)
    }

    /// The knowledge base named by `[knowledge] path`, or the built-in one.
    pub fn knowledge_base(config: &GuideConfig) -> Result<KnowledgeBase> {
        match config.knowledge.path {
            Some(ref path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    GuideError::config(format!(
                        "Failed to read knowledge file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::info!(
                    "[Config] knowledge base loaded from {} ({} bytes)",
                    path.display(),
                    text.len()
                );
                Ok(KnowledgeBase::new(text))
            }
            None => Ok(KnowledgeBase::bmcc()),
        }
    }
}
