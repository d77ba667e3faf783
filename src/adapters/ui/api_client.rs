//! Implements AdvisorApi over HTTP. Used by the dashboard.

use crate::domain::DomainError;
use crate::domain::api::{
    BudgetSummaryRequest, BudgetSummaryResponse, ErrorBody, GenerateRequest, GenerateResponse,
    NluRequest, NluResponse, SpendingInsightsRequest, SpendingInsightsResponse,
};
use crate::ports::AdvisorApi;
use crate::shared::transport::{build_client, classify, truncate_body};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpAdvisorClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdvisorClient {
    /// # Arguments
    /// * `base_url` - Advisor server root (e.g. "http://127.0.0.1:8000")
    /// * `timeout` - Per-request ceiling; should exceed the server's upstream timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, DomainError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "calling advisor API");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify("advisor API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, url = %url, "advisor API returned error");
            let body = serde_json::from_str::<ErrorBody>(&text)
                .map(|e| e.detail)
                .unwrap_or_else(|_| truncate_body(&text));
            return Err(DomainError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Resp>().await.map_err(|e| {
            DomainError::UpstreamUnexpected(format!("failed to parse advisor response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl AdvisorApi for HttpAdvisorClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, DomainError> {
        self.post("generate", request).await
    }

    async fn budget_summary(
        &self,
        request: &BudgetSummaryRequest,
    ) -> Result<BudgetSummaryResponse, DomainError> {
        self.post("budget-summary", request).await
    }

    async fn spending_insights(
        &self,
        request: &SpendingInsightsRequest,
    ) -> Result<SpendingInsightsResponse, DomainError> {
        self.post("spending-insights", request).await
    }

    async fn nlu(&self, request: &NluRequest) -> Result<NluResponse, DomainError> {
        self.post("nlu", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;
    use crate::adapters::http::{AppState, router};
    use crate::adapters::nlu::{LexiconModelProvider, NluPipeline};
    use crate::adapters::ui::session::budget_request;
    use crate::domain::{Persona, Sentiment};
    use crate::usecases::AdvisorService;
    use std::sync::Arc;

    async fn spawn_server(completion: MockCompletionAdapter) -> String {
        let advisor = AdvisorService::new(
            Arc::new(completion),
            Arc::new(NluPipeline::new(Arc::new(LexiconModelProvider::new()))),
        );
        let app = router(AppState::new(Arc::new(advisor)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_round_trip_against_server() {
        let url = spawn_server(MockCompletionAdapter::replying("Keep rent under 30%.")).await;
        let client = HttpAdvisorClient::new(url, Duration::from_secs(5)).unwrap();

        let budget = client
            .budget_summary(&budget_request(
                3000.0,
                500.0,
                &[("Rent", 1000.0)],
                Persona::Student,
            ))
            .await
            .unwrap();
        assert_eq!(budget.summary, "Keep rent under 30%.");

        let nlu = client
            .nlu(&NluRequest {
                text: "I got a bonus from Google".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(nlu.nlu.sentiment, Sentiment::Positive);
        assert_eq!(nlu.nlu.entities, vec!["Google"]);
    }

    #[tokio::test]
    async fn test_error_detail_is_extracted() {
        let url = spawn_server(MockCompletionAdapter::failing(DomainError::UpstreamTimeout(
            "30s".to_string(),
        )))
        .await;
        let client = HttpAdvisorClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client
            .generate(&GenerateRequest {
                question: "hi".to_string(),
                persona: None,
            })
            .await
            .unwrap_err();
        match err {
            DomainError::UpstreamHttp { status, body } => {
                assert_eq!(status, 504);
                assert!(body.contains("timed out"), "{body}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client =
            HttpAdvisorClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();

        let err = client
            .nlu(&NluRequest {
                text: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UpstreamConnection(_)));
    }
}
