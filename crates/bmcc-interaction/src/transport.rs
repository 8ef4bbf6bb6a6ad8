//! Seam between the completion client and the wire.

use async_trait::async_trait;
use bmcc_core::Result;
use std::fmt;

/// One single-turn completion request.
#[derive(Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub api_key: String,
    pub system_instruction: String,
    pub user_message: String,
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("system_instruction_len", &self.system_instruction.len())
            .field("user_message", &self.user_message)
            .finish()
    }
}

/// Raw HTTP outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a request once. No retries happen at this level.
///
/// Connection failures come back as `GuideError::Network`, an attempt that
/// runs past its ceiling as `GuideError::Timeout`. Every HTTP status,
/// including errors, is returned as `Ok`.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> Result<TransportResponse>;
}
