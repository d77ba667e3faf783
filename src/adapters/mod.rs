//! Infrastructure adapters. Implement ports.
//!
//! Completion provider, NLU models, HTTP server, terminal dashboard. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod nlu;
pub mod ui;
