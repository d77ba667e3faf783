//! Core domain layer. No external I/O dependencies.
//!
//! Entities, validation rules and prompt templates live here. Dependencies flow inward.

pub mod api;
pub mod entities;
pub mod errors;
pub mod prompts;

pub use entities::{
    BudgetInput, ChatMessage, CompletionMessage, CompletionRole, ExpenseMap, Goal, NluResult,
    Persona, Sentiment, Speaker, SpendingInput, MAX_KEYWORDS, require_text,
};
pub use errors::DomainError;
