pub mod meta;

use crate::webhook::whatsapp::schemas::OutgoingTextMessage;
use async_trait::async_trait;

/// Outbound calls to Meta (OAuth and the WhatsApp Cloud API)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetaService {
    /// Url of the Meta login dialog, `user_id` travels as the oauth state
    fn get_auth_url(&self, user_id: &str) -> String;

    /// Exchanges an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> anyhow::Result<String>;

    /// Account id (WABA) reachable with `access_token`
    async fn get_account_id(&self, access_token: &str) -> anyhow::Result<String>;

    /// Sends `message` from `phone_number_id`, returns the provider response
    async fn send_text_message(
        &self,
        phone_number_id: &str,
        access_token: &str,
        message: &OutgoingTextMessage,
    ) -> anyhow::Result<serde_json::Value>;
}

pub type ImplMetaService = Box<dyn MetaService>;
