//! Request/response bodies of the advisor HTTP API.
//!
//! Shared by the server handlers and the dashboard client. Requests accept the
//! snake_case names plus the camelCase aliases older clients send.

use crate::domain::{BudgetInput, DomainError, ExpenseMap, Goal, NluResult, Persona, SpendingInput};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummaryRequest {
    pub income: f64,
    pub expenses: ExpenseMap,
    #[serde(alias = "savingsGoal")]
    pub savings_goal: f64,
    #[serde(default, alias = "currencySymbol", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub name: String,
    /// Accepts a number or a numeric string.
    #[serde(
        alias = "targetAmount",
        alias = "target_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsightsRequest {
    pub income: f64,
    pub expenses: ExpenseMap,
    pub goals: Vec<GoalPayload>,
    #[serde(default, alias = "currencySymbol", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub persona: Persona,
    pub nlu: NluResult,
    pub prompt: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummaryResponse {
    pub persona: Persona,
    pub prompt: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsightsResponse {
    pub persona: Persona,
    pub prompt: String,
    pub insights: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluResponse {
    pub nlu: NluResult,
}

/// Body of every non-success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl TryFrom<BudgetSummaryRequest> for BudgetInput {
    type Error = DomainError;

    fn try_from(req: BudgetSummaryRequest) -> Result<Self, Self::Error> {
        let input = BudgetInput {
            income: req.income,
            savings_goal: req.savings_goal,
            expenses: req.expenses,
            currency: currency_or_default(req.currency),
            persona: req.persona.unwrap_or_default(),
        };
        input.validate()?;
        Ok(input)
    }
}

impl TryFrom<SpendingInsightsRequest> for SpendingInput {
    type Error = DomainError;

    fn try_from(req: SpendingInsightsRequest) -> Result<Self, Self::Error> {
        let goals = req
            .goals
            .into_iter()
            .map(|g| Goal {
                name: g.name,
                target_amount: g.amount,
                deadline: g
                    .deadline
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
            })
            .collect();
        let input = SpendingInput {
            income: req.income,
            expenses: req.expenses,
            goals,
            currency: currency_or_default(req.currency),
            persona: req.persona.unwrap_or_default(),
        };
        input.validate()?;
        Ok(input)
    }
}

fn currency_or_default(currency: Option<String>) -> String {
    currency
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(n) => Ok(n),
        AmountRepr::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid amount '{}'", s))),
    }
}
