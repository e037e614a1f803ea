//! Frontend route configuration module.
//!
//! Routes are grouped by functionality into scopes.

use super::{auth, messages};
use ntex::web;

/// Configures the WhatsApp account connection routes.
///
/// # Routes
/// - `GET /auth/login` - Redirect to the Meta login dialog
/// - `GET /auth/callback` - Meta oauth callback
/// - `POST /auth/connect` - Connect with the server configured credentials
pub fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").service((auth::login, auth::callback, auth::connect)));
}

/// Configures the message relay routes.
///
/// # Routes
/// - `GET /messages/{phone_number_id}` - Received messages, newest first
/// - `GET /user-status/{user_id}` - Whether the user has a connection
/// - `POST /send` - Send a text message for a connected user
pub fn messages(cfg: &mut web::ServiceConfig) {
    cfg.service((
        messages::get_messages,
        messages::get_user_status,
        messages::send_message,
    ));
}
