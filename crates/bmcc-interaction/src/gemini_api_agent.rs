//! Gemini REST transport.
//!
//! Calls `generateContent` directly. The request asks for a JSON response
//! body; the envelope's candidate text is then handed back to the
//! completion client for structured parsing.

use crate::transport::{CompletionRequest, CompletionTransport, TransportResponse};
use async_trait::async_trait;
use bmcc_core::config::CompletionConfig;
use bmcc_core::{GuideError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Transport that talks to the Gemini HTTP API.
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    client: Client,
    base_url: String,
}

impl GeminiTransport {
    /// Creates a transport whose every attempt is capped at `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GuideError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl CompletionTransport for GeminiTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<TransportResponse> {
        let body = GenerateContentRequest::from_request(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, &request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;
        tracing::debug!(
            "[GeminiTransport] HTTP {} ({} bytes)",
            status,
            text.len()
        );
        Ok(TransportResponse::new(status, text))
    }
}

fn map_transport_error(err: reqwest::Error) -> GuideError {
    if err.is_timeout() {
        GuideError::Timeout
    } else {
        GuideError::network(format!("Gemini API request failed: {}", err.without_url()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub(crate) fn from_request(request: &CompletionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.user_message.clone(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system_instruction.clone(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Pulls the generated text out of a 200 response envelope.
pub(crate) fn extract_text_response(body: &str) -> Result<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GuideError::malformed(format!("unreadable response envelope: {e}")))?;

    parsed
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| GuideError::malformed("no text in the response candidates"))
}

/// Turns a non-success response into `GuideError::Http`, keeping the
/// API's own status text and message when the body carries them.
pub(crate) fn map_http_error(status: u16, body: &str) -> GuideError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.trim().to_string());

    GuideError::Http { status, message }
}
