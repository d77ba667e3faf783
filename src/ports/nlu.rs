//! NLU model ports. The pipeline loads one of each lazily and reuses it.

use crate::domain::{DomainError, Sentiment};
use std::sync::Arc;

/// A loaded sentiment classifier.
#[async_trait::async_trait]
pub trait SentimentModel: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Sentiment, DomainError>;
}

/// A loaded named-entity tagger. Returns entity surface strings in text order.
#[async_trait::async_trait]
pub trait EntityTagger: Send + Sync {
    async fn tag(&self, text: &str) -> Result<Vec<String>, DomainError>;
}

/// Acquires model handles. Called at most once per successful load.
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>, DomainError>;

    async fn load_tagger(&self) -> Result<Arc<dyn EntityTagger>, DomainError>;
}
