//! The `Responder` trait — the seam between the selection engine and any
//! external language-model completion service.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ConversationTurn;

/// An external completion capability consulted before the local fallback
/// stages. Implementations live in `deskmate-providers`.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Provider name for logging (e.g., "openai", "ollama", "custom").
    fn name(&self) -> &str;

    /// Whether the provider has everything it needs (API key, endpoint).
    /// An unconfigured responder is skipped without being called.
    fn is_configured(&self) -> bool;

    /// Produce a completion for `message` given the system prompt and prior
    /// turns. Any error here is absorbed by the selector, never surfaced.
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String>;
}
