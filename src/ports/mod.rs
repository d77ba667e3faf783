//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod advisor_api;
pub mod inbound;
pub mod nlu;
pub mod outbound;

pub use advisor_api::AdvisorApi;
pub use inbound::InputPort;
pub use nlu::{EntityTagger, ModelProvider, SentimentModel};
pub use outbound::{CompletionPort, TextAnalyzer};
