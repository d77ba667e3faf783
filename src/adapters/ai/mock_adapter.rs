//! Mock completion adapter for testing without API calls.
//!
//! Returns a canned reply (or a canned error) and records what it was sent.

use crate::domain::{CompletionMessage, DomainError};
use crate::ports::CompletionPort;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

const DEFAULT_REPLY: &str = "[MOCK] This is a simulated answer. Configure FINCHAT_API_KEY \
     (or OPENROUTER_API_KEY) and unset FINCHAT_LLM_BACKEND=mock to get real advice.";

/// Mock completion adapter.
///
/// Simulates network latency with configurable delay.
pub struct MockCompletionAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    outcome: Result<String, DomainError>,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<CompletionMessage>>>,
    last_max_tokens: Mutex<Option<u32>>,
}

impl MockCompletionAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self::with_outcome(Ok(DEFAULT_REPLY.to_string()), 100)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self::with_outcome(Ok(DEFAULT_REPLY.to_string()), delay_ms)
    }

    /// Always answers `reply`, no delay.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_outcome(Ok(reply.into()), 0)
    }

    /// Always fails with `err`, no delay.
    pub fn failing(err: DomainError) -> Self {
        Self::with_outcome(Err(err), 0)
    }

    fn with_outcome(outcome: Result<String, DomainError>, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            outcome,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
            last_max_tokens: Mutex::new(None),
        }
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Option<Vec<CompletionMessage>> {
        self.last_messages
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    pub fn last_max_tokens(&self) -> Option<u32> {
        self.last_max_tokens.lock().ok().and_then(|guard| *guard)
    }
}

impl Default for MockCompletionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionPort for MockCompletionAdapter {
    async fn complete(
        &self,
        messages: &[CompletionMessage],
        max_tokens: u32,
    ) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_messages.lock() {
            *guard = Some(messages.to_vec());
        }
        if let Ok(mut guard) = self.last_max_tokens.lock() {
            *guard = Some(max_tokens);
        }

        info!(
            messages = messages.len(),
            max_tokens, "[MOCK] Simulating completion"
        );

        // Simulate network delay
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        self.outcome.clone()
    }
}
