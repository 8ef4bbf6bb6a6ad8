#![allow(dead_code)]

use async_trait::async_trait;
use bmcc_core::secret::StaticSecretService;
use bmcc_core::{GuideError, KnowledgeBase, Result};
use bmcc_interaction::{
    CompletionClient, CompletionRequest, CompletionTransport, Sleeper, TransportResponse,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays scripted outcomes in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<TransportResponse>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

/// Records requested waits instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn secs(&self) -> Vec<u64> {
        self.waits.lock().unwrap().iter().map(|d| d.as_secs()).collect()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// A 200 response whose candidate text is `text`.
pub fn ok_text(text: &str) -> Result<TransportResponse> {
    let envelope = serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    });
    Ok(TransportResponse::new(200, envelope.to_string()))
}

/// A 200 response carrying a well-formed structured answer.
pub fn ok_answer(answer: &str, suggestions: &[&str]) -> Result<TransportResponse> {
    let inner = serde_json::json!({ "answer": answer, "suggestions": suggestions });
    ok_text(&inner.to_string())
}

pub fn status(code: u16) -> Result<TransportResponse> {
    Ok(TransportResponse::new(code, ""))
}

pub fn network_error() -> Result<TransportResponse> {
    Err(GuideError::network("connection refused"))
}

pub fn client_with(
    transport: Arc<ScriptedTransport>,
    sleeper: Arc<RecordingSleeper>,
) -> CompletionClient {
    CompletionClient::new(
        transport,
        Arc::new(StaticSecretService::with_api_key("test-key")),
        KnowledgeBase::new("DEADLINES:\n- Fall: Feb 1 (Priority)."),
        "gemini-2.5-flash",
    )
    .with_sleeper(sleeper)
}
