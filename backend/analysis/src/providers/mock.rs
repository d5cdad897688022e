use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use scamlens_core::{LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns scripted responses.
///
/// Scripted responses are consumed front-to-back, one per call, so a test
/// can drive the OCR call and the classification call with different
/// replies. Every received request is recorded for inspection.
pub struct MockProvider {
    name: String,
    scripted: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    requests: Mutex<Vec<LlmRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripted: Mutex::new(VecDeque::new()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fixed reply used when no scripted reply is queued.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fallback = Some(response.into());
        self
    }

    /// Queue a reply for the next unanswered call.
    pub fn with_scripted(self, response: impl Into<String>) -> Self {
        self.scripted.lock().unwrap().push_back(response.into());
        self
    }

    /// Number of `complete` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let content = self
            .scripted
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| "Mock response".to_string());

        Ok(LlmResponse {
            content,
            provider: self.name.clone(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
