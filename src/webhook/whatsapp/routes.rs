//! WhatsApp webhook endpoint handlers
//!
//! The verification endpoint (GET) answers the subscription handshake, the
//! receiver (POST) stores incoming messages.

use super::{handler, security};
use crate::{
    consts,
    front::{AppState, errors},
};
use ntex::{util::Bytes, web};
use serde::Deserialize;
use tracing::Instrument;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, "subscribe" when sent by Meta
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token configured in the Meta dashboard
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Webhook verification endpoint (GET)
///
/// # Returns
/// - 200 with the challenge string if `hub.mode` is present and
///   `hub.verify_token` matches the configured token
/// - 403 otherwise
#[web::get("")]
pub async fn verify(
    query: web::types::Query<VerifyQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let query = query.into_inner();

    let has_mode = query.mode.is_some_and(|mode| !mode.is_empty());
    let token_matches = query.verify_token.is_some_and(|token| {
        security::verify_token_matches(&token, &app_state.app_config.verify_token)
    });

    if !has_mode || !token_matches {
        return Err(errors::UserError::Unauthorized.into());
    }

    logfire::info!("webhook verification successful");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(query.challenge.unwrap_or_default()))
}

/// Webhook receiver endpoint (POST)
///
/// Deliveries without a message, or with one that can't be read, are
/// acknowledged like stored ones so WhatsApp doesn't retry them.
///
/// # Returns
/// - 200 with an empty body when the delivery was handled
/// - 403 when signatures are required and this one is invalid
/// - 500 when the body is not json or the message can't be stored
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    handle_delivery(&req, &body, &app_state)
        .instrument(logfire::span!("whatsapp_webhook"))
        .await
}

async fn handle_delivery(
    req: &web::HttpRequest,
    body: &Bytes,
    app_state: &AppState,
) -> Result<web::HttpResponse, web::Error> {
    if app_state.app_config.verify_webhook_signature {
        let signature = req
            .headers()
            .get(consts::WEBHOOK_SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !security::verify_signature(signature, body, &app_state.app_config.meta_app_secret) {
            return Err(errors::UserError::Unauthorized.into());
        }
    }

    let event = handler::parse_webhook_body(body).map_err(|e| {
        errors::ServerError::WebhookError(format!("webhook body is not json: {e}"))
    })?;

    handler::process_webhook(event, &app_state.repo)
        .await
        .map_err(|e| {
            errors::ServerError::WebhookError(format!("webhook message not stored: {e}"))
        })?;

    Ok(web::HttpResponse::Ok().finish())
}
