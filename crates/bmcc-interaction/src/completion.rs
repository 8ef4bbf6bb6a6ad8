//! Completion client: one grounded, structured answer per chat turn.

use crate::gemini_api_agent::{GeminiTransport, extract_text_response, map_http_error};
use crate::prompt::render_system_instruction;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::transport::{CompletionRequest, CompletionTransport, TransportResponse};
use bmcc_core::config::CompletionConfig;
use bmcc_core::secret::SecretService;
use bmcc_core::{ApplicantProfile, GuideError, KnowledgeBase, Result};
use serde::Deserialize;
use std::sync::Arc;

const STATUS_OK: u16 = 200;
const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// The `{answer, suggestions}` object the model is asked to produce.
///
/// Both keys are required. Suggestions are returned as given; trimming to
/// the display limit happens in the suggestion set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Completion {
    pub answer: String,
    pub suggestions: Vec<String>,
}

impl Completion {
    /// Error-shaped result: the error's user text and no suggestions.
    pub fn from_error(err: &GuideError) -> Self {
        Self {
            answer: err.user_message(),
            suggestions: Vec::new(),
        }
    }

    fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text.trim()).map_err(|e| GuideError::malformed(e.to_string()))
    }
}

/// Sends a single-turn request grounded in the knowledge base and the
/// applicant profile, retrying on 503.
#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
    sleeper: Arc<dyn Sleeper>,
    secrets: Arc<dyn SecretService>,
    knowledge: KnowledgeBase,
    model: String,
    policy: RetryPolicy,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        secrets: Arc<dyn SecretService>,
        knowledge: KnowledgeBase,
        model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            secrets,
            knowledge,
            model: model.into(),
            policy: RetryPolicy::default(),
        }
    }

    /// Client backed by [`GeminiTransport`] with endpoint, model, timeout and
    /// retry settings taken from `config`.
    pub fn gemini(
        config: &CompletionConfig,
        secrets: Arc<dyn SecretService>,
        knowledge: KnowledgeBase,
    ) -> Result<Self> {
        let transport = GeminiTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), secrets, knowledge, config.model.clone())
            .with_policy(RetryPolicy::from_config(config)))
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Like [`Self::try_generate`], but every failure becomes an
    /// error-shaped completion.
    pub async fn generate(&self, query: &str, profile: &ApplicantProfile) -> Completion {
        match self.try_generate(query, profile).await {
            Ok(completion) => completion,
            Err(err) => Completion::from_error(&err),
        }
    }

    /// Asks the model about `query`.
    ///
    /// The key is looked up first; without one no request is sent.
    pub async fn try_generate(&self, query: &str, profile: &ApplicantProfile) -> Result<Completion> {
        let api_key = self.secrets.api_key().await?;
        let request = CompletionRequest {
            model: self.model.clone(),
            api_key,
            system_instruction: render_system_instruction(&self.knowledge, profile)?,
            user_message: query.to_string(),
        };
        tracing::debug!(
            "[CompletionClient] request to {} (instruction {} bytes, query {} bytes)",
            self.model,
            request.system_instruction.len(),
            request.user_message.len()
        );

        let response = self.send_with_retry(&request).await?;
        let text = extract_text_response(&response.body)?;
        let completion = Completion::parse(&text).inspect_err(|e| {
            tracing::error!("[CompletionClient] structured answer rejected: {}", e);
        })?;
        tracing::info!(
            "[CompletionClient] answer received ({} suggestions)",
            completion.suggestions.len()
        );
        Ok(completion)
    }

    /// Attempts `0..max_attempts`. A 503 waits `base * 2^attempt` and tries
    /// again unless it was the last attempt. A network failure is retried
    /// only once the loop is already retrying a 503. Anything else ends the
    /// loop at once.
    async fn send_with_retry(&self, request: &CompletionRequest) -> Result<TransportResponse> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 0..max_attempts {
            match self.transport.send(request).await {
                Ok(response) if response.status == STATUS_OK => return Ok(response),
                Ok(response) if response.status == STATUS_SERVICE_UNAVAILABLE => {
                    tracing::warn!(
                        "[CompletionClient] 503 on attempt {}/{}",
                        attempt + 1,
                        max_attempts
                    );
                }
                Ok(response) => {
                    let err = map_http_error(response.status, &response.body);
                    tracing::error!("[CompletionClient] {}", err);
                    return Err(err);
                }
                Err(err) if err.is_transport() && attempt > 0 => {
                    tracing::warn!(
                        "[CompletionClient] {} on retry attempt {}/{}",
                        err,
                        attempt + 1,
                        max_attempts
                    );
                    if !self.policy.has_next(attempt) {
                        return Err(err);
                    }
                }
                Err(err) => {
                    tracing::error!("[CompletionClient] {}", err);
                    return Err(err);
                }
            }

            if self.policy.has_next(attempt) {
                self.sleeper.sleep(self.policy.delay_for(attempt)).await;
            }
        }

        tracing::error!(
            "[CompletionClient] giving up after {} attempts",
            max_attempts
        );
        Err(GuideError::ServiceBusy {
            attempts: max_attempts,
        })
    }
}
