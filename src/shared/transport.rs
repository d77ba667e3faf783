//! Maps reqwest transport failures onto domain error kinds.

use crate::domain::DomainError;
use std::time::Duration;

/// HTTP client with a whole-request timeout. Build failures are `Configuration` errors.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Configuration(format!("cannot build HTTP client: {}", e)))
}

/// Timeout -> `UpstreamTimeout`, connect failure -> `UpstreamConnection`,
/// anything else -> `UpstreamUnexpected`. `target` names the remote side in the message.
pub fn classify(target: &str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::UpstreamTimeout(format!("request to {} timed out: {}", target, err))
    } else if err.is_connect() {
        DomainError::UpstreamConnection(format!("cannot reach {}: {}", target, err))
    } else {
        DomainError::UpstreamUnexpected(format!("request to {} failed: {}", target, err))
    }
}

/// Truncate an upstream body for error messages and logs.
pub fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(600);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 503);
    }

    #[tokio::test]
    async fn test_built_client_enforces_timeout() {
        // Listener accepts into the backlog but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = build_client(Duration::from_millis(200)).unwrap();
        let err = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();
        assert!(matches!(
            classify("silent upstream", err),
            DomainError::UpstreamTimeout(_)
        ));
        drop(listener);
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();
        assert!(matches!(
            classify("test upstream", err),
            DomainError::UpstreamConnection(_)
        ));
    }
}
