//! Advisor API port. The dashboard talks to the advisor server through this.

use crate::domain::api::{
    BudgetSummaryRequest, BudgetSummaryResponse, GenerateRequest, GenerateResponse, NluRequest,
    NluResponse, SpendingInsightsRequest, SpendingInsightsResponse,
};
use crate::domain::DomainError;

/// Client side of the four advisor endpoints.
///
/// Non-success responses surface as [`DomainError::UpstreamHttp`] with the
/// server's error detail as body.
#[async_trait::async_trait]
pub trait AdvisorApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, DomainError>;

    async fn budget_summary(
        &self,
        request: &BudgetSummaryRequest,
    ) -> Result<BudgetSummaryResponse, DomainError>;

    async fn spending_insights(
        &self,
        request: &SpendingInsightsRequest,
    ) -> Result<SpendingInsightsResponse, DomainError>;

    async fn nlu(&self, request: &NluRequest) -> Result<NluResponse, DomainError>;
}
