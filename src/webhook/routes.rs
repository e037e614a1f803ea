use ntex::web;

/// Configures webhook routes for the WhatsApp Business API.
///
/// These routes are public endpoints that don't require authentication.
///
/// # Routes
/// - `GET /webhook` - WhatsApp webhook verification
/// - `POST /webhook` - WhatsApp webhook receiver
pub fn whatsapp(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/webhook").service((super::whatsapp::verify, super::whatsapp::receive)),
    );
}
