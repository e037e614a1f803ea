//! # WhatsApp Outgoing Message Schemas
//!
//! Payloads sent to the WhatsApp Business API.

use serde::{Deserialize, Serialize};

/// Text message to send to WhatsApp
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OutgoingTextMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient's WhatsApp ID (phone number)
    pub to: String,
    /// Message type
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Text content
    pub text: OutgoingTextContent,
}

impl OutgoingTextMessage {
    /// Creates a new text message
    pub fn new(to: String, body: String) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            to,
            msg_type: "text".to_string(),
            text: OutgoingTextContent { body },
        }
    }
}

/// Text content for outgoing messages
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OutgoingTextContent {
    /// Message body text
    pub body: String,
}
