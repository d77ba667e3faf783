//! Route handlers. Stateless: extract, validate, call the advisor, wrap the result.
//!
//! Advisor calls run in a spawned task so a client disconnect (which drops the
//! handler future) does not abort the outbound completion call.

use crate::adapters::http::error::ApiError;
use crate::domain::api::{
    BudgetSummaryRequest, BudgetSummaryResponse, GenerateRequest, GenerateResponse, NluRequest,
    NluResponse, SpendingInsightsRequest, SpendingInsightsResponse,
};
use crate::domain::{BudgetInput, DomainError, SpendingInput};
use crate::usecases::AdvisorService;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<AdvisorService>,
}

impl AppState {
    pub fn new(advisor: Arc<AdvisorService>) -> Self {
        Self { advisor }
    }
}

/// Run `fut` detached from the request future and wait for it.
async fn detached<T, F>(fut: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DomainError>> + Send + 'static,
{
    tokio::spawn(fut)
        .await
        .map_err(|e| DomainError::UpstreamUnexpected(format!("advisor task failed: {}", e)))?
        .map_err(ApiError::from)
}

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = payload?;
    let persona = req.persona.unwrap_or_default();
    info!(persona = %persona, question_len = req.question.len(), "POST /generate");

    let advisor = Arc::clone(&state.advisor);
    let out = detached(async move { advisor.answer_question(&req.question, persona).await }).await?;

    Ok(Json(GenerateResponse {
        persona,
        nlu: out.nlu,
        prompt: out.prompt,
        answer: out.answer,
    }))
}

pub async fn budget_summary(
    State(state): State<AppState>,
    payload: Result<Json<BudgetSummaryRequest>, JsonRejection>,
) -> Result<Json<BudgetSummaryResponse>, ApiError> {
    let Json(req) = payload?;
    let input = BudgetInput::try_from(req)?;
    info!(persona = %input.persona, "POST /budget-summary");

    let persona = input.persona;
    let advisor = Arc::clone(&state.advisor);
    let out = detached(async move { advisor.budget_summary(&input).await }).await?;

    Ok(Json(BudgetSummaryResponse {
        persona,
        prompt: out.prompt,
        summary: out.text,
    }))
}

pub async fn spending_insights(
    State(state): State<AppState>,
    payload: Result<Json<SpendingInsightsRequest>, JsonRejection>,
) -> Result<Json<SpendingInsightsResponse>, ApiError> {
    let Json(req) = payload?;
    let input = SpendingInput::try_from(req)?;
    info!(persona = %input.persona, goals = input.goals.len(), "POST /spending-insights");

    let persona = input.persona;
    let advisor = Arc::clone(&state.advisor);
    let out = detached(async move { advisor.spending_insights(&input).await }).await?;

    Ok(Json(SpendingInsightsResponse {
        persona,
        prompt: out.prompt,
        insights: out.text,
    }))
}

pub async fn nlu(
    State(state): State<AppState>,
    payload: Result<Json<NluRequest>, JsonRejection>,
) -> Result<Json<NluResponse>, ApiError> {
    let Json(req) = payload?;
    info!(text_len = req.text.len(), "POST /nlu");

    let advisor = Arc::clone(&state.advisor);
    let nlu = detached(async move { advisor.analyze_text(&req.text).await }).await?;

    Ok(Json(NluResponse { nlu }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
