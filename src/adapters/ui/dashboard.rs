//! Implements InputPort. Inquire-based terminal dashboard.
//!
//! Page selector -> page flow -> back to the selector. Esc inside a page
//! returns to the selector; Ctrl+C quits.

use crate::adapters::ui::session::{
    BUDGET_CATEGORIES, DEFAULT_INCOME, DEFAULT_SAVINGS_GOAL, DashboardSession, GOAL_NAMES, Page,
    SPENDING_CATEGORIES, budget_request, format_nlu, spending_request,
};
use crate::adapters::ui::tui::{clear_screen, print_block, print_error, print_heading, spinner};
use crate::domain::api::{GenerateRequest, NluRequest};
use crate::domain::{DomainError, Persona};
use crate::ports::{AdvisorApi, InputPort};
use async_trait::async_trait;
use inquire::InquireError;
use inquire::validator::Validation;
use inquire::{CustomType, Select, Text};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Open(Page),
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Open(page) => write!(f, "{}", page),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// `Ok(None)` on Esc.
fn ask_amount(label: &str, default: f64) -> Result<Option<f64>, DomainError> {
    CustomType::<f64>::new(label)
        .with_default(default)
        .with_error_message("Please type a valid number")
        .with_validator(|v: &f64| {
            if v.is_finite() && *v >= 0.0 {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Amount must not be negative".into()))
            }
        })
        .prompt_skippable()
        .map_err(ui_err)
}

fn ask_persona(current: Persona) -> Result<Option<Persona>, DomainError> {
    let start = Persona::ALL.iter().position(|p| *p == current).unwrap_or(0);
    Select::new("Persona", Persona::ALL.to_vec())
        .with_starting_cursor(start)
        .prompt_skippable()
        .map_err(ui_err)
}

/// TUI adapter. Drives the advisor API through inquire prompts.
pub struct TuiDashboard {
    api: Arc<dyn AdvisorApi>,
    session: Mutex<DashboardSession>,
}

impl TuiDashboard {
    pub fn new(api: Arc<dyn AdvisorApi>) -> Self {
        Self {
            api,
            session: Mutex::new(DashboardSession::new()),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, DashboardSession>, DomainError> {
        self.session
            .lock()
            .map_err(|_| DomainError::Ui("dashboard session lock poisoned".to_string()))
    }

    async fn show(&self, page: Page) -> Result<(), DomainError> {
        match page {
            Page::Home => {
                self.home();
                Ok(())
            }
            Page::Chat => self.chat().await,
            Page::BudgetSummary => self.budget().await,
            Page::SpendingInsights => self.spending().await,
            Page::NluAnalysis => self.nlu().await,
        }
    }

    fn home(&self) {
        print_heading("Personal Finance Chatbot");
        print_block(
            "Your finance assistant.\n\
             Ask questions, track spending, and analyze budgets with AI-driven insights.\n\
             Pick a feature from the menu; Esc inside a page brings you back here.",
        );
    }

    async fn chat(&self) -> Result<(), DomainError> {
        print_heading(Page::Chat.title());
        let current = self.session()?.persona();
        let Some(persona) = ask_persona(current)? else {
            return Ok(());
        };
        self.session()?.set_persona(persona);

        loop {
            let transcript = self.session()?.render_transcript();
            let pending_error = self.session()?.take_error();
            if !transcript.is_empty() {
                clear_screen();
                print_heading(Page::Chat.title());
                print_block(&transcript);
            }
            if let Some(message) = pending_error {
                print_error(&message);
            }

            let Some(message) = Text::new("Type your message:")
                .with_help_message("Enter to send, Esc to go back")
                .prompt_skippable()
                .map_err(ui_err)?
            else {
                return Ok(());
            };
            if message.trim().is_empty() {
                continue;
            }

            self.session()?.push_user(message.clone());
            let request = GenerateRequest {
                question: message,
                persona: Some(persona),
            };
            let pb = spinner("Thinking...");
            let result = self.api.generate(&request).await;
            pb.finish_and_clear();

            match result {
                Ok(response) => {
                    debug!(sentiment = %response.nlu.sentiment, "answer received");
                    self.session()?.push_bot(response.answer);
                }
                Err(e) => self.session()?.set_error(e.to_string()),
            }
        }
    }

    async fn budget(&self) -> Result<(), DomainError> {
        print_heading(Page::BudgetSummary.title());
        let current = self.session()?.persona();
        let Some(persona) = ask_persona(current)? else {
            return Ok(());
        };
        let Some(income) = ask_amount("Monthly Income ($)", DEFAULT_INCOME)? else {
            return Ok(());
        };
        let Some(savings_goal) = ask_amount("Savings Goal ($)", DEFAULT_SAVINGS_GOAL)? else {
            return Ok(());
        };

        let mut expenses = Vec::with_capacity(BUDGET_CATEGORIES.len());
        for category in BUDGET_CATEGORIES {
            let Some(amount) = ask_amount(&format!("{} ($)", category), 0.0)? else {
                return Ok(());
            };
            expenses.push((*category, amount));
        }

        let request = budget_request(income, savings_goal, &expenses, persona);
        let pb = spinner("Analyzing...");
        let result = self.api.budget_summary(&request).await;
        pb.finish_and_clear();

        match result {
            Ok(response) => print_block(&response.summary),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    async fn spending(&self) -> Result<(), DomainError> {
        print_heading(Page::SpendingInsights.title());
        let current = self.session()?.persona();
        let Some(persona) = ask_persona(current)? else {
            return Ok(());
        };
        let Some(income) = ask_amount("Monthly Income ($)", DEFAULT_INCOME)? else {
            return Ok(());
        };

        print_heading("Financial Goals");
        let mut goals = Vec::with_capacity(GOAL_NAMES.len());
        for name in GOAL_NAMES {
            let Some(amount) = ask_amount(&format!("{} ($)", name), 0.0)? else {
                return Ok(());
            };
            let deadline = if amount > 0.0 {
                Text::new(&format!("Deadline for {} (optional)", name))
                    .prompt_skippable()
                    .map_err(ui_err)?
            } else {
                None
            };
            goals.push((*name, amount, deadline));
        }

        print_heading("Expenses");
        let mut expenses = Vec::with_capacity(SPENDING_CATEGORIES.len());
        for category in SPENDING_CATEGORIES {
            let Some(amount) = ask_amount(&format!("{} ($)", category), 0.0)? else {
                return Ok(());
            };
            expenses.push((*category, amount));
        }

        let request = spending_request(income, &expenses, &goals, persona);
        let pb = spinner("Analyzing...");
        let result = self.api.spending_insights(&request).await;
        pb.finish_and_clear();

        match result {
            Ok(response) => print_block(&response.insights),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    async fn nlu(&self) -> Result<(), DomainError> {
        print_heading(Page::NluAnalysis.title());
        let Some(text) = Text::new("Enter text for analysis:")
            .prompt_skippable()
            .map_err(ui_err)?
        else {
            return Ok(());
        };
        if text.trim().is_empty() {
            return Ok(());
        }

        let pb = spinner("Analyzing...");
        let result = self.api.nlu(&NluRequest { text }).await;
        pb.finish_and_clear();

        match result {
            Ok(response) => print_block(&format_nlu(&response.nlu)),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiDashboard {
    async fn run(&self) -> Result<(), DomainError> {
        let mut choices: Vec<MenuChoice> =
            Page::ALL.iter().copied().map(MenuChoice::Open).collect();
        choices.push(MenuChoice::Quit);

        loop {
            let current = self.session()?.page();
            let start = Page::ALL.iter().position(|p| *p == current).unwrap_or(0);
            let choice = match Select::new("Choose Feature", choices.clone())
                .with_starting_cursor(start)
                .prompt()
            {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(ui_err(e)),
            };

            let page = match choice {
                MenuChoice::Quit => break,
                MenuChoice::Open(page) => page,
            };
            self.session()?.select(page);
            info!(page = %page, "page selected");

            match self.show(page).await {
                Ok(()) => {}
                // Ctrl+C inside a page
                Err(DomainError::Ui(msg)) => {
                    debug!(reason = %msg, "leaving dashboard");
                    break;
                }
                Err(e) => print_error(&e.to_string()),
            }
        }
        Ok(())
    }
}
