//! User confirmation for destructive actions.

use async_trait::async_trait;

/// Asks the user a yes/no question.
#[async_trait]
pub trait ConfirmPrompt: Send {
    async fn confirm(&mut self, message: &str) -> bool;
}

/// Answers every question the same way. Useful for scripted input and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl ConfirmPrompt for FixedAnswer {
    async fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!("Auto-answering {:?} with {}", message, self.0);
        self.0
    }
}
