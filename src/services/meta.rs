use anyhow::Context;
use async_trait::async_trait;
use oauth2::{AuthorizationCode, RequestTokenError, TokenResponse};
use serde::Deserialize;

use crate::{config, front::oauth, webhook::whatsapp::schemas::OutgoingTextMessage};

#[derive(Clone)]
pub struct MetaGraphHandler {
    pub http_client: reqwest::Client,
    pub oauth_client: oauth::MetaOauthClient,
    pub graph_api_url: String,
}

/// Graph API `/me` minimum data
#[derive(Deserialize, Debug)]
struct GraphAccount {
    id: String,
}

impl MetaGraphHandler {
    pub fn new(app_config: &config::AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            // the code exchange must not follow redirects
            http_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .context("failed to build graph api http client")?,
            oauth_client: oauth::build_meta_oauth_client(app_config)?,
            graph_api_url: app_config.graph_api_url(),
        })
    }

    /// WhatsApp Business API endpoint for sending messages from `phone_number_id`
    fn send_msg_endpoint(&self, phone_number_id: &str) -> String {
        format!(
            "{base}/{id}/messages",
            base = self.graph_api_url,
            id = phone_number_id
        )
    }
}

/// Reads the error payload returned by the graph api, only for logs
async fn read_error_payload(response: reqwest::Response) -> String {
    let status = response.status();
    let payload = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or_default();

    format!("status {status}: {payload}")
}

#[async_trait]
impl crate::services::MetaService for MetaGraphHandler {
    fn get_auth_url(&self, user_id: &str) -> String {
        oauth::get_new_auth_url(&self.oauth_client, user_id).to_string()
    }

    async fn exchange_code(&self, code: &str) -> anyhow::Result<String> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| {
                let payload = match &e {
                    RequestTokenError::ServerResponse(rsp) => {
                        serde_json::to_string(rsp).unwrap_or_default()
                    }
                    RequestTokenError::Parse(_, body) => String::from_utf8_lossy(body).to_string(),
                    _ => e.to_string(),
                };
                logfire::error!(
                    "meta code exchange rejected: {payload}",
                    payload = payload
                );
                anyhow::anyhow!("at meta code exchange: {e}")
            })?;

        Ok(token.access_token().secret().to_string())
    }

    async fn get_account_id(&self, access_token: &str) -> anyhow::Result<String> {
        let response = self
            .http_client
            .get(format!("{}/me", self.graph_api_url))
            .query(&[("fields", "id")])
            .bearer_auth(access_token)
            .send()
            .await
            .context("failed to request graph api account")?;

        if !response.status().is_success() {
            let payload = read_error_payload(response).await;
            logfire::error!(
                "graph api account lookup rejected: {payload}",
                payload = payload.clone()
            );
            anyhow::bail!("graph api account lookup returned {payload}");
        }

        let account: GraphAccount = response
            .json()
            .await
            .context("failed to parse graph api account")?;

        Ok(account.id)
    }

    async fn send_text_message(
        &self,
        phone_number_id: &str,
        access_token: &str,
        message: &OutgoingTextMessage,
    ) -> anyhow::Result<serde_json::Value> {
        let response = self
            .http_client
            .post(self.send_msg_endpoint(phone_number_id))
            .header("accept", "application/json")
            .bearer_auth(access_token)
            .json(message)
            .send()
            .await
            .context("failed to send request to whatsapp api")?;

        if !response.status().is_success() {
            let payload = read_error_payload(response).await;
            logfire::error!(
                "whatsapp api rejected message: {payload}",
                payload = payload.clone()
            );
            anyhow::bail!("whatsapp api returned {payload}");
        }

        response
            .json::<serde_json::Value>()
            .await
            .context("failed to parse whatsapp api response")
    }
}
