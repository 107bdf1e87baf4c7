//! Echochat chat flow.
//!
//! This crate contains:
//! - **state**: tagged send and dialog states, reply tickets, send errors
//! - **controller**: `ChatController`, which owns the active session, drives
//!   the responder, and records every change into the history store

pub mod controller;
pub mod state;

pub use controller::ChatController;
pub use state::{Delivery, Dialog, PendingReply, SendError, SendState};
