//! # WhatsApp Webhook Handler
//!
//! Turns a webhook delivery into an [InboundEvent] and stores the messages.

use super::schemas::Message;
use crate::{metric, models::message::NewMessage, repo};
use derive_more::Display;
use serde::Deserialize;

/// What a webhook delivery carried
#[derive(Debug, Display, PartialEq, Eq)]
pub enum InboundEvent {
    /// A message ready to be stored
    #[display("message")]
    Message(NewMessage),
    /// Expected deliveries without a message (status updates, pings, ...)
    #[display("no_message")]
    NoMessage,
    /// A message is present but can't be read
    #[display("malformed")]
    Malformed(String),
}

/// Reads the delivery body.
///
/// Only invalid json is an error: any json document becomes an
/// [InboundEvent].
pub fn parse_webhook_body(body: &[u8]) -> serde_json::Result<InboundEvent> {
    let raw = serde_json::from_slice::<serde_json::Value>(body)?;

    Ok(parse_inbound_event(&raw))
}

/// Extracts the first message of the first change of the first entry.
///
/// Only that message and `metadata.phone_number_id` are read, the rest of
/// the delivery doesn't change the outcome.
pub fn parse_inbound_event(payload: &serde_json::Value) -> InboundEvent {
    let Some(value) = payload.pointer("/entry/0/changes/0/value") else {
        return InboundEvent::NoMessage;
    };

    let Some(raw_message) = value.pointer("/messages/0") else {
        return InboundEvent::NoMessage;
    };

    let message = match Message::deserialize(raw_message) {
        Ok(message) => message,
        Err(e) => return InboundEvent::Malformed(format!("unexpected message shape: {e}")),
    };

    let Some(phone_number_id) = value
        .pointer("/metadata/phone_number_id")
        .and_then(|id| id.as_str())
    else {
        return InboundEvent::Malformed("message without metadata.phone_number_id".into());
    };

    let Some(from) = message.from else {
        return InboundEvent::Malformed("message without sender".into());
    };

    let Some(timestamp) = message.timestamp else {
        return InboundEvent::Malformed("message without timestamp".into());
    };

    InboundEvent::Message(NewMessage {
        phone_number_id: phone_number_id.to_string(),
        from,
        text: message.text.and_then(|text| text.body).unwrap_or_default(),
        timestamp,
    })
}

/// Stores the message carried by `event`, if any
pub async fn process_webhook(event: InboundEvent, repo: &repo::ImplAppRepo) -> anyhow::Result<()> {
    metric::incr_webhook_event_statds(&event.to_string());

    match event {
        InboundEvent::Message(message) => {
            repo.insert_message(&message).await?;
            logfire::info!(
                "stored message for phone number {phone_number_id}",
                phone_number_id = message.phone_number_id
            );
        }
        InboundEvent::NoMessage => {
            logfire::info!("webhook delivery without message");
        }
        InboundEvent::Malformed(reason) => {
            logfire::warn!("malformed webhook message: {reason}", reason = reason);
        }
    }

    Ok(())
}
