//! # WhatsApp Webhook Schemas
//!
//! The message WhatsApp sends under `entry[0].changes[0].value.messages[0]`.
//! Only the fields that are stored are read, anything else in the delivery
//! is ignored. Every field is optional, the handler decides what is missing.

use serde::Deserialize;

/// Message object
#[derive(Debug, Deserialize, Default)]
pub struct Message {
    /// Sender's WhatsApp ID (phone number)
    pub from: Option<String>,
    /// Epoch seconds, sent as a string
    pub timestamp: Option<String>,
    /// Text message content (if type is "text")
    pub text: Option<TextMessage>,
}

/// Text message content
#[derive(Debug, Deserialize, Default)]
pub struct TextMessage {
    pub body: Option<String>,
}
