//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CompletionMessage, DomainError, NluResult};

/// Completion provider (hosted LLM). One outbound call per invocation, no retries.
#[async_trait::async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send the message array and return the first choice's text verbatim.
    ///
    /// Errors distinguish missing configuration, timeouts, connection failures,
    /// non-success HTTP statuses and everything else.
    async fn complete(
        &self,
        messages: &[CompletionMessage],
        max_tokens: u32,
    ) -> Result<String, DomainError>;
}

/// Sentiment + entity pre-analysis of user text.
///
/// Infallible by contract: implementations absorb their own failures and
/// return [`NluResult::NEUTRAL`].
#[async_trait::async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> NluResult;
}
