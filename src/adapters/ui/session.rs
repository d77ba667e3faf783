//! Dashboard session state. Current page, chat persona and the transcript.
//!
//! Lives only as long as the dashboard process; nothing is saved.

use crate::domain::api::{BudgetSummaryRequest, GoalPayload, SpendingInsightsRequest};
use crate::domain::{ChatMessage, ExpenseMap, NluResult, Persona, Speaker};
use std::fmt;

pub const BUDGET_CATEGORIES: &[&str] = &[
    "Rent",
    "Food",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Healthcare",
];
pub const SPENDING_CATEGORIES: &[&str] =
    &["Rent", "Food", "Transport", "Utilities", "Entertainment"];
pub const GOAL_NAMES: &[&str] = &["Emergency Fund", "Vacation", "Laptop"];

pub const DEFAULT_INCOME: f64 = 3000.0;
pub const DEFAULT_SAVINGS_GOAL: f64 = 500.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Chat,
    BudgetSummary,
    SpendingInsights,
    NluAnalysis,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Chat,
        Page::BudgetSummary,
        Page::SpendingInsights,
        Page::NluAnalysis,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Chat => "Chat Assistant",
            Page::BudgetSummary => "Budget Summary",
            Page::SpendingInsights => "Spending Insights",
            Page::NluAnalysis => "NLU Analysis",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Default)]
pub struct DashboardSession {
    page: Page,
    persona: Persona,
    transcript: Vec<ChatMessage>,
    /// Failed turn to show under the transcript on the next redraw.
    last_error: Option<String>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn select(&mut self, page: Page) {
        self.page = page;
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatMessage::new(Speaker::User, text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatMessage::new(Speaker::Bot, text));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Returns the pending error once.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Full transcript, one `[HH:MM] Speaker: text` block per message.
    pub fn render_transcript(&self) -> String {
        self.transcript
            .iter()
            .map(|m| {
                let who = match m.role {
                    Speaker::User => "You",
                    Speaker::Bot => "Advisor",
                };
                format!("[{}] {}: {}", m.sent_at.format("%H:%M"), who, m.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn budget_request(
    income: f64,
    savings_goal: f64,
    expenses: &[(&str, f64)],
    persona: Persona,
) -> BudgetSummaryRequest {
    BudgetSummaryRequest {
        income,
        expenses: to_expense_map(expenses),
        savings_goal,
        currency: None,
        persona: Some(persona),
    }
}

/// Goals with a zero amount were left blank in the form and are not sent.
pub fn spending_request(
    income: f64,
    expenses: &[(&str, f64)],
    goals: &[(&str, f64, Option<String>)],
    persona: Persona,
) -> SpendingInsightsRequest {
    SpendingInsightsRequest {
        income,
        expenses: to_expense_map(expenses),
        goals: goals
            .iter()
            .filter(|(_, amount, _)| *amount > 0.0)
            .map(|(name, amount, deadline)| GoalPayload {
                name: name.to_string(),
                amount: *amount,
                deadline: deadline.clone().filter(|d| !d.trim().is_empty()),
            })
            .collect(),
        currency: None,
        persona: Some(persona),
    }
}

fn to_expense_map(expenses: &[(&str, f64)]) -> ExpenseMap {
    expenses
        .iter()
        .map(|(category, amount)| (category.to_string(), *amount))
        .collect()
}

pub fn format_nlu(nlu: &NluResult) -> String {
    let list = |items: &[String]| {
        if items.is_empty() {
            "(none)".to_string()
        } else {
            items.join(", ")
        }
    };
    format!(
        "Sentiment: {}\nEntities:  {}\nKeywords:  {}",
        nlu.sentiment,
        list(&nlu.entities),
        list(&nlu.keywords)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;

    #[test]
    fn test_session_defaults_and_selection() {
        let mut session = DashboardSession::new();
        assert_eq!(session.page(), Page::Home);
        assert_eq!(session.persona(), Persona::Student);

        session.select(Page::SpendingInsights);
        session.set_persona(Persona::Professional);
        assert_eq!(session.page(), Page::SpendingInsights);
        assert_eq!(session.persona(), Persona::Professional);
    }

    #[test]
    fn test_transcript_accumulates_in_order() {
        let mut session = DashboardSession::new();
        session.push_user("How much should I save?");
        session.push_bot("Aim for 20% of income.");
        session.push_user("Thanks");

        let roles: Vec<Speaker> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Speaker::User, Speaker::Bot, Speaker::User]);

        let rendered = session.render_transcript();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("You: How much should I save?"));
        assert!(lines[1].ends_with("Advisor: Aim for 20% of income."));

        // switching pages keeps the history
        session.select(Page::NluAnalysis);
        session.select(Page::Chat);
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_error_survives_redraw_once() {
        let mut session = DashboardSession::new();
        session.push_user("Should I refinance?");
        session.set_error("Upstream returned HTTP 504: timed out");

        // redraw: transcript still has the unanswered question, error shown once
        let rendered = session.render_transcript();
        assert!(rendered.ends_with("You: Should I refinance?"));
        assert_eq!(
            session.take_error().as_deref(),
            Some("Upstream returned HTTP 504: timed out")
        );
        assert_eq!(session.take_error(), None);
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_spending_request_drops_blank_goals() {
        let req = spending_request(
            3000.0,
            &[("Rent", 1000.0), ("Food", 0.0)],
            &[
                ("Emergency Fund", 1000.0, Some("6 months".to_string())),
                ("Vacation", 0.0, Some("summer".to_string())),
                ("Laptop", 800.0, Some(" ".to_string())),
            ],
            Persona::Student,
        );
        let names: Vec<&str> = req.goals.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Emergency Fund", "Laptop"]);
        assert_eq!(req.goals[1].deadline, None);
        assert_eq!(req.expenses.len(), 2);
    }

    #[test]
    fn test_budget_request_keeps_category_order() {
        let entries: Vec<(&str, f64)> = BUDGET_CATEGORIES.iter().map(|c| (*c, 10.0)).collect();
        let req = budget_request(DEFAULT_INCOME, DEFAULT_SAVINGS_GOAL, &entries, Persona::Student);
        assert_eq!(
            req.expenses.keys().map(String::as_str).collect::<Vec<_>>(),
            BUDGET_CATEGORIES.to_vec()
        );
        assert_eq!(req.savings_goal, 500.0);
    }

    #[test]
    fn test_format_nlu() {
        assert_eq!(
            format_nlu(&NluResult::NEUTRAL),
            "Sentiment: neutral\nEntities:  (none)\nKeywords:  (none)"
        );
        let nlu = NluResult::from_entities(Sentiment::Positive, vec!["Amex".into(), "Amex".into()]);
        assert!(format_nlu(&nlu).contains("Entities:  Amex, Amex\nKeywords:  Amex"));
    }
}
