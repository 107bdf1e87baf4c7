//! Chat controller — the active session, its send flow, and history recording.
//!
//! Flow for one turn:
//! 1. `begin_send` appends the user message, records the session, and hands
//!    out a [`PendingReply`] ticket (state → `AwaitingReply`)
//! 2. the responder produces the bot message
//! 3. `complete_send` delivers it to the session the ticket names and records
//!    again (state → `Idle`)
//!
//! If the user switched sessions in between, the reply goes to the stored copy
//! of its own session rather than to whatever is active now.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use echochat_core::session::{HistoryStore, MessageLog, SessionRecorder, TitleSource};
use echochat_core::types::{Message, SessionId};
use echochat_responder::Responder;

use crate::state::{Delivery, Dialog, PendingReply, SendError, SendState};

// ─────────────────────────────────────────────
// ChatController
// ─────────────────────────────────────────────

/// Owns the active conversation and the history it is recorded into.
pub struct ChatController {
    /// Reply source.
    responder: Arc<dyn Responder>,
    /// Persisted sessions; only written through `recorder`.
    history: HistoryStore,
    recorder: SessionRecorder,
    /// Bot message every fresh session opens with.
    greeting: Option<String>,
    /// Id of the session shown in `log`.
    active_id: SessionId,
    log: MessageLog,
    /// Open reply ticket per session.
    outstanding: HashMap<SessionId, u64>,
    next_ticket: u64,
    dialog: Dialog,
}

impl ChatController {
    /// Create a controller with a fresh session.
    pub fn new(history: HistoryStore, responder: Arc<dyn Responder>, greeting: Option<String>) -> Self {
        let title_source = if greeting.is_some() {
            TitleSource::FirstUserMessage
        } else {
            TitleSource::FirstMessage
        };
        let floor = history.max_id().unwrap_or(SessionId(0));

        let mut controller = ChatController {
            responder,
            history,
            recorder: SessionRecorder::new(title_source),
            greeting,
            active_id: SessionId::next_after(floor),
            log: MessageLog::new(),
            outstanding: HashMap::new(),
            next_ticket: 0,
            dialog: Dialog::Closed,
        };
        controller.log.replace(controller.initial_messages());
        controller
    }

    pub fn active_id(&self) -> SessionId {
        self.active_id
    }

    /// The active message log.
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// Send state of the active session.
    pub fn send_state(&self) -> SendState {
        if self.outstanding.contains_key(&self.active_id) {
            SendState::AwaitingReply {
                session_id: self.active_id,
            }
        } else {
            SendState::Idle
        }
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn responder_name(&self) -> &str {
        self.responder.display_name()
    }

    // ── Sending ──

    /// Send `input` and wait for the reply. Returns the bot message.
    ///
    /// If the returned future is dropped before the reply arrives, the ticket
    /// is abandoned and the session can send again.
    pub async fn send(&mut self, input: &str) -> Result<Message, SendError> {
        let pending = self.begin_send(input)?;
        let responder = Arc::clone(&self.responder);
        let prompt = pending.prompt().to_string();

        let mut guard = SendGuard {
            chat: self,
            pending: Some(pending),
        };
        let reply = responder.respond(&prompt).await;
        if let Some(pending) = guard.pending.take() {
            guard.chat.complete_send(pending, reply.clone());
        }
        Ok(reply)
    }

    /// Append `input` as a user message and open a reply ticket.
    ///
    /// Whitespace-only input is rejected without touching the log or history.
    pub fn begin_send(&mut self, input: &str) -> Result<PendingReply, SendError> {
        if input.trim().is_empty() {
            return Err(SendError::EmptyInput);
        }
        if self.dialog != Dialog::Closed {
            return Err(SendError::DialogOpen);
        }
        if self.outstanding.contains_key(&self.active_id) {
            return Err(SendError::ReplyPending);
        }

        self.log.append(Message::user(input));
        self.record();

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding.insert(self.active_id, ticket);
        debug!(session = %self.active_id, ticket, "awaiting reply");

        Ok(PendingReply {
            session_id: self.active_id,
            ticket,
            prompt: input.to_string(),
        })
    }

    /// Give up on `pending` without a reply. The user message stays in the log.
    pub fn abandon_send(&mut self, pending: PendingReply) {
        if self.release(&pending) {
            debug!(session = %pending.session_id, ticket = pending.ticket, "reply abandoned");
        }
    }

    /// Deliver `reply` for the ticket `pending`.
    pub fn complete_send(&mut self, pending: PendingReply, reply: Message) -> Delivery {
        self.release(&pending);

        if pending.session_id == self.active_id {
            self.log.append(reply);
            self.record();
            return Delivery::Appended;
        }

        // The session was left while the reply was in flight.
        let stored = match self.history.get(pending.session_id) {
            Some(session) => session.messages.clone(),
            None => {
                warn!(session = %pending.session_id, "dropping reply for a session no longer in history");
                return Delivery::Dropped;
            }
        };
        let mut log = MessageLog::from_messages(stored);
        log.append(reply);
        self.recorder.record(pending.session_id, &log, &mut self.history);
        info!(session = %pending.session_id, "late reply stored with its original session");
        Delivery::Rerouted
    }

    // ── Session switching ──

    /// Start a fresh session immediately, without asking.
    ///
    /// The new id is strictly greater than the current one and every stored id.
    pub fn start_new_chat(&mut self) -> SessionId {
        let floor = self
            .history
            .max_id()
            .map_or(self.active_id, |max| max.max(self.active_id));
        self.active_id = SessionId::next_after(floor);
        self.log.replace(self.initial_messages());
        self.dialog = Dialog::Closed;
        info!(session = %self.active_id, "started new chat");
        self.active_id
    }

    /// Ask to start a new session.
    ///
    /// If the current log holds user messages a confirmation is opened and
    /// `Dialog::ConfirmNewChat` is returned; otherwise the new session starts
    /// right away and `Dialog::Closed` is returned.
    pub fn request_new_chat(&mut self) -> Dialog {
        if self.log.has_user_content() {
            self.dialog = Dialog::ConfirmNewChat;
        } else {
            self.start_new_chat();
        }
        self.dialog
    }

    /// Accept the open confirmation. Returns the new session id, if one was started.
    pub fn confirm_dialog(&mut self) -> Option<SessionId> {
        match self.dialog {
            Dialog::ConfirmNewChat => Some(self.start_new_chat()),
            Dialog::Closed => None,
        }
    }

    /// Dismiss the open confirmation.
    pub fn cancel_dialog(&mut self) {
        self.dialog = Dialog::Closed;
    }

    /// Make stored session `id` active, replacing the log with its messages.
    ///
    /// Returns `false` (and changes nothing) if `id` is not in history. A reply
    /// still pending for `id` keeps it in `AwaitingReply`.
    pub fn load_session(&mut self, id: SessionId) -> bool {
        let messages = match self.history.get(id) {
            Some(session) => session.messages.clone(),
            None => return false,
        };
        self.log.replace(messages);
        self.active_id = id;
        self.dialog = Dialog::Closed;
        info!(session = %id, messages = self.log.len(), "loaded session");
        true
    }

    /// Forget all stored sessions. The active log is kept.
    pub fn clear_history(&mut self) -> bool {
        self.history.clear()
    }

    fn initial_messages(&self) -> Vec<Message> {
        self.greeting
            .as_ref()
            .map(|g| vec![Message::bot(g.clone())])
            .unwrap_or_default()
    }

    fn record(&mut self) {
        self.recorder
            .record(self.active_id, &self.log, &mut self.history);
    }

    /// Close the wait opened by `pending`, if it is still the current one.
    fn release(&mut self, pending: &PendingReply) -> bool {
        if self.outstanding.get(&pending.session_id) == Some(&pending.ticket) {
            self.outstanding.remove(&pending.session_id);
            true
        } else {
            false
        }
    }
}

/// Abandons the ticket if `send` is dropped mid-flight.
struct SendGuard<'a> {
    chat: &'a mut ChatController,
    pending: Option<PendingReply>,
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.chat.abandon_send(pending);
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
