//! Responder trait — the seam where a real backend would plug in.

use async_trait::async_trait;
use echochat_core::types::Message;

/// Produces the bot's answer to a user prompt.
///
/// Implementations yield exactly one bot [`Message`] per call. Callers may
/// drop the future to abandon a reply.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Answer `prompt`.
    async fn respond(&self, prompt: &str) -> Message;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
