use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl SqlxSqliteRepo {
    /// Creates the tables if they don't exist yet
    pub async fn create_schema(&self) -> anyhow::Result<()> {
        for query in [
            sqlite_queries::QUERY_CREATE_TABLE_MESSAGE,
            sqlite_queries::QUERY_CREATE_TABLE_USER_CONNECTION,
        ] {
            sqlx::query(query).execute(&self.db_pool).await?;
        }

        Ok(())
    }
}

impl FromRow<'_, SqliteRow> for models::message::Message {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            phone_number_id: row.try_get("phone_number_id")?,
            from: row.try_get("sender")?,
            text: row.try_get("body")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::user_connection::UserConnection {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            access_token: row.try_get("access_token")?,
            phone_number_id: row.try_get("phone_number_id")?,
            waba_id: row.try_get("waba_id")?,
            connected_at: row.try_get("connected_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn insert_message(&self, message: &models::message::NewMessage) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_MESSAGE)
            .bind(&message.phone_number_id)
            .bind(&message.from)
            .bind(&message.text)
            .bind(&message.timestamp)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_messages_by_phone_number_id(
        &self,
        phone_number_id: &str,
    ) -> anyhow::Result<Vec<models::message::Message>> {
        Ok(
            sqlx::query_as::<_, models::message::Message>(
                sqlite_queries::QUERY_GET_MESSAGES_BY_PHONE_NUMBER_ID,
            )
            .bind(phone_number_id)
            .fetch_all(&self.db_pool)
            .await?,
        )
    }

    async fn upsert_user_connection(
        &self,
        connection: &models::user_connection::UserConnection,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPSERT_USER_CONNECTION)
            .bind(&connection.user_id)
            .bind(&connection.access_token)
            .bind(&connection.phone_number_id)
            .bind(&connection.waba_id)
            .bind(connection.connected_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_user_connection(
        &self,
        user_id: &str,
    ) -> anyhow::Result<Option<models::user_connection::UserConnection>> {
        Ok(sqlx::query_as::<_, models::user_connection::UserConnection>(
            sqlite_queries::QUERY_GET_USER_CONNECTION,
        )
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?)
    }
}
