//! Hugging Face Inference API provider.
//!
//! Sentiment: text-classification model, highest-scoring label wins.
//! Entities: token-classification model with `aggregation_strategy=simple`,
//! returning the `word` of each entity group in response order.

use crate::domain::{DomainError, Sentiment};
use crate::ports::{EntityTagger, ModelProvider, SentimentModel};
use crate::shared::transport::{build_client, truncate_body};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HfModelProvider {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    sentiment_model: String,
    ner_model: String,
}

impl HfModelProvider {
    /// # Arguments
    /// * `api_url` - Inference API base (model id is appended)
    /// * `api_token` - Bearer token; loading fails without it
    /// * `sentiment_model` / `ner_model` - Model ids on the hub
    /// * `timeout` - Per-request ceiling
    pub fn new(
        api_url: String,
        api_token: Option<String>,
        sentiment_model: String,
        ner_model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            sentiment_model,
            ner_model,
        })
    }

    fn endpoint(&self, model: &str) -> Result<InferenceEndpoint, DomainError> {
        let token = self
            .api_token
            .clone()
            .ok_or_else(|| DomainError::Nlu("HF_API_TOKEN is not set".to_string()))?;
        Ok(InferenceEndpoint {
            client: self.client.clone(),
            url: format!("{}/{}", self.api_url, model),
            token,
        })
    }
}

#[async_trait::async_trait]
impl ModelProvider for HfModelProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>, DomainError> {
        Ok(Arc::new(HfSentiment {
            endpoint: self.endpoint(&self.sentiment_model)?,
        }))
    }

    async fn load_tagger(&self) -> Result<Arc<dyn EntityTagger>, DomainError> {
        Ok(Arc::new(HfEntityTagger {
            endpoint: self.endpoint(&self.ner_model)?,
        }))
    }
}

/// One hosted model: URL plus credentials.
struct InferenceEndpoint {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl InferenceEndpoint {
    async fn infer<T: for<'de> Deserialize<'de>>(
        &self,
        body: serde_json::Value,
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Nlu(format!("inference request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, url = %self.url, body = %text, "inference API returned error");
            return Err(DomainError::Nlu(format!(
                "inference API returned {}: {}",
                status,
                truncate_body(&text)
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Nlu(format!("failed to parse inference response: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Text classification comes back either flat or wrapped once per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn top_label(self) -> Option<String> {
        let scores = match self {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|s| s.label)
    }
}

#[derive(Debug, Deserialize)]
struct EntityGroup {
    word: String,
}

struct HfSentiment {
    endpoint: InferenceEndpoint,
}

#[async_trait::async_trait]
impl SentimentModel for HfSentiment {
    async fn classify(&self, text: &str) -> Result<Sentiment, DomainError> {
        let response: ClassificationResponse = self
            .endpoint
            .infer(json!({
                "inputs": text,
                "options": {"wait_for_model": true}
            }))
            .await?;
        let label = response
            .top_label()
            .ok_or_else(|| DomainError::Nlu("classifier returned no labels".to_string()))?;
        debug!(label = %label, "sentiment classified");
        Ok(Sentiment::from_label(&label))
    }
}

struct HfEntityTagger {
    endpoint: InferenceEndpoint,
}

#[async_trait::async_trait]
impl EntityTagger for HfEntityTagger {
    async fn tag(&self, text: &str) -> Result<Vec<String>, DomainError> {
        let groups: Vec<EntityGroup> = self
            .endpoint
            .infer(json!({
                "inputs": text,
                "parameters": {"aggregation_strategy": "simple"},
                "options": {"wait_for_model": true}
            }))
            .await?;
        debug!(entities = groups.len(), "entities tagged");
        Ok(groups
            .into_iter()
            .map(|g| g.word.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect())
    }
}
