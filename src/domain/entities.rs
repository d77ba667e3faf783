//! Domain entities. Transient per-request data; nothing here is persisted.
//!
//! No HTTP or model types here; adapters map their wire formats into these.

use crate::domain::DomainError;
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Expense category -> amount. Keeps the caller's insertion order for display.
pub type ExpenseMap = IndexMap<String, f64>;

/// Maximum number of keywords derived from the entity list.
pub const MAX_KEYWORDS: usize = 5;

/// Who the advice is for. Only changes prompt tone.
///
/// Deserialized through `FromStr`, so the wire accepts any casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Persona {
    #[default]
    Student,
    Professional,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::Student, Persona::Professional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Student => "student",
            Persona::Professional => "professional",
        }
    }

    /// One line of framing appended to every prompt for this persona.
    pub fn tone_hint(&self) -> &'static str {
        match self {
            Persona::Student => {
                "Keep the tone friendly and practical for someone on a limited, irregular budget."
            }
            Persona::Professional => concat!(
                "Keep the tone concise and assume a steady salary; ",
                "mention investing and tax-advantaged options where relevant."
            ),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Persona::Student),
            "professional" => Ok(Persona::Professional),
            other => Err(DomainError::validation(format!(
                "unknown persona '{}' (expected student or professional)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Persona {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Monthly budget to summarize.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    pub income: f64,
    pub savings_goal: f64,
    pub expenses: ExpenseMap,
    pub currency: String,
    pub persona: Persona,
}

impl BudgetInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_amount("income", self.income)?;
        check_amount("savings_goal", self.savings_goal)?;
        check_expenses(&self.expenses)
    }
}

/// A savings goal with an optional free-form deadline ("6 months", "2025-12-31").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub deadline: Option<String>,
}

/// Spending pattern plus goals to assess.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingInput {
    pub income: f64,
    pub expenses: ExpenseMap,
    pub goals: Vec<Goal>,
    pub currency: String,
    pub persona: Persona,
}

impl SpendingInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_amount("income", self.income)?;
        check_expenses(&self.expenses)?;

        let mut seen = HashSet::new();
        for goal in &self.goals {
            let name = goal.name.trim();
            if name.is_empty() {
                return Err(DomainError::validation("goal name must not be empty"));
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::validation(format!(
                    "duplicate goal name '{}'",
                    name
                )));
            }
            check_amount(&format!("goal '{}' amount", name), goal.target_amount)?;
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!(
            "{} must be a finite number",
            field
        )));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

fn check_expenses(expenses: &ExpenseMap) -> Result<(), DomainError> {
    for (category, amount) in expenses {
        if category.trim().is_empty() {
            return Err(DomainError::validation("expense category must not be empty"));
        }
        check_amount(&format!("expense '{}'", category), *amount)?;
    }
    Ok(())
}

/// Rejects empty or whitespace-only free text (questions, NLU input).
pub fn require_text(field: &str, text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Maps a classifier label ("POSITIVE", "negative", "LABEL_1", ...) onto a sentiment.
    /// Anything that is not clearly positive or negative counts as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" => Sentiment::Positive,
            "negative" | "neg" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment and entities extracted from user text.
///
/// `keywords` is not computed independently: it is the entity list,
/// deduplicated in first-seen order and capped at [`MAX_KEYWORDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluResult {
    pub sentiment: Sentiment,
    pub entities: Vec<String>,
    pub keywords: Vec<String>,
}

impl NluResult {
    /// Returned whenever model load or inference fails.
    pub const NEUTRAL: NluResult = NluResult {
        sentiment: Sentiment::Neutral,
        entities: Vec::new(),
        keywords: Vec::new(),
    };

    pub fn from_entities(sentiment: Sentiment, entities: Vec<String>) -> Self {
        let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
        for entity in &entities {
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
            if !keywords.contains(entity) {
                keywords.push(entity.clone());
            }
        }
        Self {
            sentiment,
            entities,
            keywords,
        }
    }
}

/// Role of a message sent to the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionRole {
    System,
    User,
    Assistant,
}

/// One entry of the chat-style message array sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: CompletionRole,
    pub content: String,
}

impl CompletionMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One line of the dashboard chat transcript. Lives in session memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Speaker,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Speaker, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(income: f64) -> BudgetInput {
        let mut expenses = ExpenseMap::new();
        expenses.insert("Rent".to_string(), 1000.0);
        BudgetInput {
            income,
            savings_goal: 500.0,
            expenses,
            currency: "$".to_string(),
            persona: Persona::Student,
        }
    }

    #[test]
    fn test_persona_parse_and_default() {
        assert_eq!(Persona::default(), Persona::Student);
        assert_eq!("Professional".parse::<Persona>().unwrap(), Persona::Professional);
        assert!(matches!(
            "retiree".parse::<Persona>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_budget_validation() {
        assert!(budget(3000.0).validate().is_ok());
        assert!(matches!(
            budget(-1.0).validate(),
            Err(DomainError::Validation(_))
        ));
        assert!(budget(f64::NAN).validate().is_err());

        let mut bad = budget(3000.0);
        bad.expenses.insert("  ".to_string(), 10.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_spending_rejects_duplicate_goals() {
        let goal = Goal {
            name: "Laptop".to_string(),
            target_amount: 800.0,
            deadline: None,
        };
        let input = SpendingInput {
            income: 3000.0,
            expenses: ExpenseMap::new(),
            goals: vec![goal.clone(), goal],
            currency: "$".to_string(),
            persona: Persona::Student,
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate goal name"));
    }

    #[test]
    fn test_keywords_are_deduplicated_prefix_of_entities() {
        let entities: Vec<String> = [
            "Chase", "Visa", "Chase", "Roth IRA", "Fidelity", "Visa", "Amex", "Vanguard",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let result = NluResult::from_entities(Sentiment::Positive, entities.clone());

        assert_eq!(result.entities, entities);
        assert_eq!(
            result.keywords,
            vec!["Chase", "Visa", "Roth IRA", "Fidelity", "Amex"]
        );

        // keywords must appear in entities in the same relative order
        let mut it = result.entities.iter();
        for kw in &result.keywords {
            assert!(it.any(|e| e == kw));
        }
    }

    #[test]
    fn test_neutral_constant() {
        let n = NluResult::NEUTRAL;
        assert_eq!(n.sentiment, Sentiment::Neutral);
        assert!(n.entities.is_empty());
        assert!(n.keywords.is_empty());
        assert_eq!(
            serde_json::to_value(&n).unwrap(),
            serde_json::json!({"sentiment": "neutral", "entities": [], "keywords": []})
        );
    }

    #[test]
    fn test_sentiment_from_label() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("LABEL_1"), Sentiment::Neutral);
    }
}
