use chrono::{DateTime, Utc};

/// Credentials obtained when a user connects their WhatsApp Business account.
/// One per `user_id`; replaced wholesale on reconnection.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConnection {
    pub user_id: String,
    pub access_token: String,
    pub phone_number_id: String,
    pub waba_id: String,
    pub connected_at: DateTime<Utc>,
}

impl UserConnection {
    pub fn new(user_id: &str, access_token: &str, phone_number_id: &str, waba_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            access_token: access_token.to_string(),
            phone_number_id: phone_number_id.to_string(),
            waba_id: waba_id.to_string(),
            connected_at: Utc::now(),
        }
    }

    /// A connection only counts when it holds a token
    pub fn is_connected(&self) -> bool {
        !self.access_token.is_empty()
    }
}
