//! Application use cases. Orchestrate domain logic via ports.

pub mod advisor_service;

pub use advisor_service::{
    AdvisorService, Completed, QA_MAX_TOKENS, QaOutcome, REPORT_MAX_TOKENS,
};
