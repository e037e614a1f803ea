pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn insert_message(&self, message: &models::message::NewMessage) -> anyhow::Result<i64>;

    /// Messages of `phone_number_id`, newest first
    async fn get_messages_by_phone_number_id(
        &self,
        phone_number_id: &str,
    ) -> anyhow::Result<Vec<models::message::Message>>;

    /// Inserts the connection or replaces the one stored for the same user
    async fn upsert_user_connection(
        &self,
        connection: &models::user_connection::UserConnection,
    ) -> anyhow::Result<()>;

    async fn get_user_connection(
        &self,
        user_id: &str,
    ) -> anyhow::Result<Option<models::user_connection::UserConnection>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
