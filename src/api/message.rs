//! # Message API Module
//!
//! Listing of received messages and relay of outbound text messages through
//! the connection stored for a user.

use crate::{
    metric, models, repo, services, webhook::whatsapp::schemas::OutgoingTextMessage,
};

/// Messages received on `phone_number_id`, newest first
pub async fn list_messages(
    phone_number_id: &str,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<models::message::Message>> {
    repo.get_messages_by_phone_number_id(phone_number_id).await
}

/// Sends `body` to `to` with the credentials stored for `user_id`.
///
/// # Returns
/// * `Ok(None)` - the user has no connection, nothing was sent
/// * `Ok(Some(response))` - the WhatsApp API response
///
/// # Errors
/// Returns an error if the lookup or the WhatsApp API call fails.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn send_text_message(
    user_id: &str,
    to: &str,
    body: &str,
    meta_service: &services::ImplMetaService,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Option<serde_json::Value>> {
    let Some(connection) = repo.get_user_connection(user_id).await? else {
        return Ok(None);
    };

    let message = OutgoingTextMessage::new(to.to_string(), body.to_string());
    let response = meta_service
        .send_text_message(&connection.phone_number_id, &connection.access_token, &message)
        .await;

    metric::incr_send_statds(if response.is_ok() { "sent" } else { "failed" });
    Ok(Some(response?))
}
