//! # WhatsApp Message Schemas
//!
//! - `incoming`: Incoming webhook schemas (messages received from WhatsApp)
//! - `outgoing`: Outgoing message schemas (messages sent to WhatsApp)

pub mod incoming;
pub mod outgoing;

pub use incoming::*;
pub use outgoing::*;
