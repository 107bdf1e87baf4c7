//! Explicit states for the send flow and the confirmation dialog.

use thiserror::Error;

use echochat_core::types::SessionId;

/// Where the send flow is for the active session. At most one reply is
/// outstanding per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    /// A reply for `session_id` has been requested and not yet delivered.
    AwaitingReply { session_id: SessionId },
}

impl SendState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SendState::Idle)
    }
}

/// Confirmation dialog state, independent of the send flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    /// Asking whether to abandon the current conversation for a new one.
    ConfirmNewChat,
}

/// Why an input was not sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("message is empty")]
    EmptyInput,

    #[error("still waiting for the previous reply")]
    ReplyPending,

    #[error("a confirmation is waiting for an answer")]
    DialogOpen,
}

/// Ticket for an outstanding reply, bound to the session it was issued for.
///
/// Consumed by `ChatController::complete_send`.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub(crate) session_id: SessionId,
    /// Per-controller sequence number; only the ticket that opened the wait
    /// can close it.
    pub(crate) ticket: u64,
    pub(crate) prompt: String,
}

impl PendingReply {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The user text the reply answers.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// What happened to a delivered reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Appended to the active log.
    Appended,
    /// Its session was no longer active; appended to the stored copy instead.
    Rerouted,
    /// Its session was neither active nor in history.
    Dropped,
}
