//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the lesson session.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop (configure, generate, preview, download) until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
