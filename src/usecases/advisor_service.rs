//! Advisor service. Orchestrates NLU, prompt construction and completion per request.
//!
//! Each call makes at most one NLU analysis and one completion call, in that
//! order. Nothing is retried or cached.

use crate::domain::prompts::{build_budget_prompt, build_qa_prompt, build_spending_prompt};
use crate::domain::{
    BudgetInput, CompletionMessage, DomainError, NluResult, Persona, SpendingInput, require_text,
};
use crate::ports::{CompletionPort, TextAnalyzer};
use std::sync::Arc;
use tracing::info;

/// Output budget for free-form answers.
pub const QA_MAX_TOKENS: u32 = 500;
/// Output budget for budget summaries and spending insights.
pub const REPORT_MAX_TOKENS: u32 = 1000;

/// Result of answering a free-text question.
#[derive(Debug, Clone, PartialEq)]
pub struct QaOutcome {
    pub nlu: NluResult,
    pub prompt: String,
    pub answer: String,
}

/// Prompt sent upstream plus the text that came back, unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub prompt: String,
    pub text: String,
}

pub struct AdvisorService {
    completion: Arc<dyn CompletionPort>,
    analyzer: Arc<dyn TextAnalyzer>,
}

impl AdvisorService {
    /// Create a new advisor service.
    ///
    /// # Arguments
    /// * `completion` - Completion provider (OpenRouter, Mock, etc.)
    /// * `analyzer` - NLU pre-analysis; never fails
    pub fn new(completion: Arc<dyn CompletionPort>, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self {
            completion,
            analyzer,
        }
    }

    /// NLU on the question, QA prompt, completion.
    pub async fn answer_question(
        &self,
        question: &str,
        persona: Persona,
    ) -> Result<QaOutcome, DomainError> {
        require_text("question", question)?;

        let nlu = self.analyzer.analyze(question).await;
        info!(
            persona = %persona,
            sentiment = %nlu.sentiment,
            entities = nlu.entities.len(),
            "answering question"
        );

        let prompt = build_qa_prompt(question, &nlu, persona);
        let answer = self.send(&prompt, QA_MAX_TOKENS).await?;

        Ok(QaOutcome {
            nlu,
            prompt,
            answer,
        })
    }

    /// Budget prompt, completion. `input` must already be validated.
    pub async fn budget_summary(&self, input: &BudgetInput) -> Result<Completed, DomainError> {
        info!(
            persona = %input.persona,
            categories = input.expenses.len(),
            "building budget summary"
        );
        let prompt = build_budget_prompt(input);
        let text = self.send(&prompt, REPORT_MAX_TOKENS).await?;
        Ok(Completed { prompt, text })
    }

    /// Spending prompt, completion. `input` must already be validated.
    pub async fn spending_insights(&self, input: &SpendingInput) -> Result<Completed, DomainError> {
        info!(
            persona = %input.persona,
            categories = input.expenses.len(),
            goals = input.goals.len(),
            "building spending insights"
        );
        let prompt = build_spending_prompt(input);
        let text = self.send(&prompt, REPORT_MAX_TOKENS).await?;
        Ok(Completed { prompt, text })
    }

    /// NLU only. No completion call.
    pub async fn analyze_text(&self, text: &str) -> Result<NluResult, DomainError> {
        require_text("text", text)?;
        Ok(self.analyzer.analyze(text).await)
    }

    async fn send(&self, prompt: &str, max_tokens: u32) -> Result<String, DomainError> {
        let messages = [CompletionMessage::user(prompt)];
        self.completion.complete(&messages, max_tokens).await
    }
}
