//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive dashboard drives the advisor through this.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the dashboard until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
