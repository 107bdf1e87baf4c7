//! Reply generation for Echochat.
//!
//! # Architecture
//!
//! - [`traits::Responder`] — async trait every reply source implements
//! - [`stub::StubResponder`] — fixed-delay placeholder that echoes the prompt

pub mod stub;
pub mod traits;

pub use stub::{StubResponder, DEFAULT_REPLY_DELAY};
pub use traits::Responder;
