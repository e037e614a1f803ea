use serde::{Deserialize, Serialize};

/// A message received through the webhook, scoped to the business phone
/// number it was delivered to. Never updated once stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub phone_number_id: String,
    pub from: String,
    pub text: String,
    pub timestamp: String,
}

/// Message extracted from a webhook delivery, not stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub phone_number_id: String,
    pub from: String,
    pub text: String,
    pub timestamp: String,
}
