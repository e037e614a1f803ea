//! Application configuration management with security considerations.
//!
//! All values are read from environment variables once at start-up (a `.env`
//! file is honoured when present). Sensitive fields are clearly marked and
//! must never be logged.

use envconfig::Envconfig;
use std::sync::OnceLock;

use crate::consts;

/// Application configuration with security-aware field management.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite://data/wa_bridge.db?mode=rwc"
    #[envconfig(default = "sqlite://data/wa_bridge.db?mode=rwc")]
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data.
    /// Stored access tokens are only encrypted at rest when this is set.
    pub db_pass_encrypt: Option<String>,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "PORT", default = "5000")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: Token echoed back during the webhook handshake
    pub verify_token: String,

    /// Meta app (OAuth client) id (SEMI-SENSITIVE)
    pub meta_app_id: String,

    /// 🔒 SENSITIVE: Meta app secret, used for the code exchange and
    /// webhook signatures
    pub meta_app_secret: String,

    /// OAuth callback url registered in the Meta app (NON-SENSITIVE)
    /// Example: "https://example.com/auth/callback"
    pub meta_redirect_uri: String,

    /// WhatsApp Business phone number ID stored on new connections
    /// (SEMI-SENSITIVE)
    pub phone_number_id: String,

    /// 🔒 SENSITIVE: Pre-issued WhatsApp token for `/auth/connect`
    pub whatsapp_access_token: Option<String>,

    /// WhatsApp Business Account id for `/auth/connect` (SEMI-SENSITIVE)
    pub waba_id: Option<String>,

    /// Require a valid `X-Hub-Signature-256` on webhook deliveries
    #[envconfig(default = "false")]
    pub verify_webhook_signature: bool,

    /// 🔒 SENSITIVE: Logfire write token, logs stay local when absent
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Graph API base url, versioned
    pub fn graph_api_url(&self) -> String {
        format!(
            "{host}/{version}",
            host = consts::META_GRAPH_HOST,
            version = consts::META_GRAPH_API_VERSION
        )
    }

    /// Credentials for the direct connect route, when both are configured
    pub fn direct_connect_credentials(&self) -> Option<(&str, &str)> {
        match (&self.whatsapp_access_token, &self.waba_id) {
            (Some(token), Some(waba_id)) if !token.is_empty() && !waba_id.is_empty() => {
                Some((token, waba_id))
            }
            _ => None,
        }
    }
}

/// Global application configuration, only read during start-up.
/// Handlers get their copy through [AppState](crate::front::AppState).
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Loads `.env` (if any) and the environment into [APP_CONFIG]
pub fn init_config() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let app_config = AppConfig::init_from_env()
        .map_err(|e| anyhow::anyhow!("failed to load app config from env: {e}"))?;

    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow::anyhow!("app config already initialized"))
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        env: "local".into(),
        db_host: "sqlite::memory:".into(),
        db_pass_encrypt: None,
        web_server_host: "127.0.0.1".into(),
        web_server_port: 5000,
        private_key_path: "server.key".into(),
        certificate_path: "server.crt".into(),
        verify_token: "verify-me".into(),
        meta_app_id: "app-id".into(),
        meta_app_secret: "app-secret".into(),
        meta_redirect_uri: "http://localhost:5000/auth/callback".into(),
        phone_number_id: "123".into(),
        whatsapp_access_token: None,
        waba_id: None,
        verify_webhook_signature: false,
        logfire_token: None,
    }
}
