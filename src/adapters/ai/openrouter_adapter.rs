//! OpenRouter (OpenAI-compatible) completion adapter.
//!
//! Works against any `/chat/completions` endpoint: OpenRouter, OpenAI, Azure
//! OpenAI or a local Ollama. Implements `CompletionPort`.

use crate::domain::{CompletionMessage, DomainError};
use crate::ports::CompletionPort;
use crate::shared::transport::{build_client, classify, truncate_body};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Sampling parameters are fixed for every caller.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;

/// OpenAI-compatible completion adapter.
pub struct OpenRouterAdapter {
    client: reqwest::Client,
    api_url: String,
    /// `None` means unconfigured: every call fails with `Configuration` before any I/O.
    api_key: Option<String>,
    model: String,
}

impl OpenRouterAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Completions endpoint (e.g. "https://openrouter.ai/api/v1/chat/completions")
    /// * `api_key` - Bearer credential; `None` or empty disables outbound calls
    /// * `model` - Model identifier (e.g. "gpt-4o-mini")
    /// * `timeout` - Ceiling for the whole request
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Chat completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    n: u32,
    stream: bool,
}

/// Chat completions response (only the parts we read).
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[async_trait::async_trait]
impl CompletionPort for OpenRouterAdapter {
    async fn complete(
        &self,
        messages: &[CompletionMessage],
        max_tokens: u32,
    ) -> Result<String, DomainError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("completion API key is not set (FINCHAT_API_KEY / OPENROUTER_API_KEY)");
            return Err(DomainError::Configuration(
                "completion API key is not set (FINCHAT_API_KEY / OPENROUTER_API_KEY)".to_string(),
            ));
        };

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens,
            top_p: TOP_P,
            n: 1,
            stream: false,
        };

        info!(
            model = %self.model,
            messages = messages.len(),
            max_tokens,
            "sending request to completion provider"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let err = classify("completion provider", e);
                error!(error = %err, "completion request failed");
                err
            })?;

        // Check status
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "completion provider returned error");
            return Err(DomainError::UpstreamHttp {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return classify("completion provider", e);
            }
            DomainError::UpstreamUnexpected(format!("failed to parse completion response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                DomainError::UpstreamUnexpected("no choices in completion response".to_string())
            })?;

        debug!(reply_len = content.len(), "received completion");
        info!("completion received");

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// Serve `router` on an ephemeral port and return its completions URL.
    async fn spawn_upstream(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    fn adapter(url: String, key: Option<&str>, timeout: Duration) -> OpenRouterAdapter {
        OpenRouterAdapter::new(
            url,
            key.map(str::to_string),
            "gpt-4o-mini".to_string(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_first_choice_verbatim() {
        let seen: Arc<Mutex<Option<(Value, String)>>> = Arc::new(Mutex::new(None));
        let seen_in_handler = Arc::clone(&seen);
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = Arc::clone(&seen_in_handler);
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *seen.lock().unwrap() = Some((body, auth));
                    Json(json!({
                        "choices": [
                            {"message": {"role": "assistant", "content": "  X\n"}},
                            {"message": {"role": "assistant", "content": "other"}}
                        ]
                    }))
                }
            }),
        );
        let url = spawn_upstream(router).await;
        let client = adapter(url, Some("sk-test"), Duration::from_secs(5));

        let reply = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap();
        assert_eq!(reply, "  X\n");

        let (body, auth) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer sk-test");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["n"], 1);
        assert_eq!(body["stream"], false);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hello"}]));
    }

    #[tokio::test]
    async fn test_timeout_is_distinguished() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"choices": []}))
            }),
        );
        let url = spawn_upstream(router).await;
        let client = adapter(url, Some("sk-test"), Duration::from_millis(200));

        let err = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UpstreamTimeout(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited").into_response() }),
        );
        let url = spawn_upstream(router).await;
        let client = adapter(url, Some("sk-test"), Duration::from_secs(5));

        let err = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UpstreamHttp {
                status: 429,
                body: "rate limited".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_choices_is_unexpected() {
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let url = spawn_upstream(router).await;
        let client = adapter(url, Some("sk-test"), Duration::from_secs(5));

        let err = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UpstreamUnexpected(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = adapter(
            format!("http://{}/v1/chat/completions", addr),
            Some("sk-test"),
            Duration::from_secs(5),
        );

        let err = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UpstreamConnection(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Unroutable URL: reaching the network would not produce Configuration.
        let client = adapter(
            "http://192.0.2.1/v1/chat/completions".to_string(),
            Some(""),
            Duration::from_secs(5),
        );
        let err = client
            .complete(&[CompletionMessage::user("hello")], 500)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
