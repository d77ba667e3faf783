//! Maps domain and extractor failures onto HTTP responses with a `{detail}` body.

use crate::domain::DomainError;
use crate::domain::api::ErrorBody;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            DomainError::UpstreamConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Configuration(_)
            | DomainError::UpstreamHttp { .. }
            | DomainError::UpstreamUnexpected(_)
            | DomainError::Nlu(_)
            | DomainError::Ui(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "request failed");
        } else {
            warn!(status = %self.status, detail = %self.detail, "request rejected");
        }
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (
                DomainError::UpstreamTimeout("t".into()),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                DomainError::UpstreamConnection("c".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::UpstreamHttp {
                    status: 401,
                    body: "no".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Configuration("key".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_detail_keeps_upstream_status_and_body() {
        let api = ApiError::from(DomainError::UpstreamHttp {
            status: 429,
            body: "rate limited".into(),
        });
        assert!(api.detail.contains("429"));
        assert!(api.detail.contains("rate limited"));
    }
}
