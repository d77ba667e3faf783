//! Lazily loaded sentiment + NER pipeline. Implements TextAnalyzer.
//!
//! Each model is loaded on first use and reused for the process lifetime.
//! `OnceCell::get_or_try_init` serializes concurrent first use; a failed load
//! leaves the cell empty so the next request tries again.

use crate::domain::{DomainError, NluResult};
use crate::ports::{EntityTagger, ModelProvider, SentimentModel, TextAnalyzer};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

pub struct NluPipeline {
    provider: Arc<dyn ModelProvider>,
    sentiment: OnceCell<Arc<dyn SentimentModel>>,
    tagger: OnceCell<Arc<dyn EntityTagger>>,
}

impl NluPipeline {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            sentiment: OnceCell::new(),
            tagger: OnceCell::new(),
        }
    }

    /// Load both models now instead of on the first request.
    pub async fn warm_up(&self) -> Result<(), DomainError> {
        self.sentiment_model().await?;
        self.entity_tagger().await?;
        info!(provider = self.provider.name(), "NLU models loaded");
        Ok(())
    }

    async fn sentiment_model(&self) -> Result<&Arc<dyn SentimentModel>, DomainError> {
        self.sentiment
            .get_or_try_init(|| async {
                info!(provider = self.provider.name(), "loading sentiment model");
                self.provider.load_sentiment().await
            })
            .await
    }

    async fn entity_tagger(&self) -> Result<&Arc<dyn EntityTagger>, DomainError> {
        self.tagger
            .get_or_try_init(|| async {
                info!(provider = self.provider.name(), "loading entity tagger");
                self.provider.load_tagger().await
            })
            .await
    }

    async fn try_analyze(&self, text: &str) -> Result<NluResult, DomainError> {
        let sentiment = self.sentiment_model().await?.classify(text).await?;
        let entities = self.entity_tagger().await?.tag(text).await?;
        Ok(NluResult::from_entities(sentiment, entities))
    }
}

#[async_trait::async_trait]
impl TextAnalyzer for NluPipeline {
    async fn analyze(&self, text: &str) -> NluResult {
        match self.try_analyze(text).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    provider = self.provider.name(),
                    error = %e,
                    "NLU analysis failed, returning neutral result"
                );
                NluResult::NEUTRAL
            }
        }
    }
}
