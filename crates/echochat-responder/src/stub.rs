//! Placeholder responder: waits a fixed delay, then echoes the prompt back.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use echochat_core::types::Message;

use crate::traits::Responder;

/// Default simulated latency.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Simulates a backend with a fixed response time.
#[derive(Clone, Debug)]
pub struct StubResponder {
    delay: Duration,
}

impl Default for StubResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl StubResponder {
    pub fn new(delay: Duration) -> Self {
        StubResponder { delay }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// The canned reply text for `prompt`.
    pub fn reply_text(prompt: &str) -> String {
        format!("This is a simulated response to: \"{}\"", prompt)
    }
}

#[async_trait]
impl Responder for StubResponder {
    async fn respond(&self, prompt: &str) -> Message {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulating reply latency");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Message::bot(Self::reply_text(prompt))
    }

    fn display_name(&self) -> &str {
        "stub"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use echochat_core::types::Sender;
    use tokio::time::Instant;

    #[test]
    fn test_reply_text_quotes_prompt() {
        assert_eq!(
            StubResponder::reply_text("hello"),
            "This is a simulated response to: \"hello\""
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_for_delay() {
        let responder = StubResponder::default();
        let start = Instant::now();

        let reply = responder.respond("What's up?").await;

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.text, "This is a simulated response to: \"What's up?\"");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_not_ready_before_delay() {
        let responder = StubResponder::from_millis(500);
        let result = tokio::time::timeout(Duration::from_millis(499), responder.respond("x")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_zero_delay() {
        let responder = StubResponder::from_millis(0);
        let reply = responder.respond("  spaced  ").await;
        assert!(reply.text.contains("\"  spaced  \""));
        assert_eq!(responder.display_name(), "stub");
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let responder: Box<dyn Responder> = Box::new(StubResponder::from_millis(0));
        let reply = responder.respond("dyn").await;
        assert!(reply.text.ends_with("\"dyn\""));
    }
}
