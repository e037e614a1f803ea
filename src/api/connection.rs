//! # Connection API Module
//!
//! Stores the credentials a user obtains when connecting their WhatsApp
//! Business account, either through the OAuth exchange or with credentials
//! configured on the server.

use crate::{metric, models::user_connection::UserConnection, repo, services};
use anyhow::Context;

/// Completes the OAuth exchange for `user_id`.
///
/// # Process
/// 1. Exchange `code` for an access token
/// 2. Fetch the account id reachable with that token
/// 3. Upsert the connection, replacing any previous one of the user
///
/// `phone_number_id` is not part of the exchange, it comes from configuration.
///
/// # Errors
/// Returns an error if either Meta call or the upsert fails. Nothing is
/// stored in that case.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn complete_authorization(
    user_id: &str,
    code: &str,
    phone_number_id: &str,
    meta_service: &services::ImplMetaService,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<UserConnection> {
    let access_token = meta_service
        .exchange_code(code)
        .await
        .context("authorization code couldn't be exchanged")?;

    let waba_id = meta_service
        .get_account_id(&access_token)
        .await
        .context("account id couldn't be fetched")?;

    let connection = UserConnection::new(user_id, &access_token, phone_number_id, &waba_id);
    repo.upsert_user_connection(&connection).await?;

    metric::incr_connection_statds("oauth");
    Ok(connection)
}

/// Connects `user_id` with credentials issued out of band
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn connect_with_credentials(
    user_id: &str,
    access_token: &str,
    waba_id: &str,
    phone_number_id: &str,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<UserConnection> {
    let connection = UserConnection::new(user_id, access_token, phone_number_id, waba_id);
    repo.upsert_user_connection(&connection).await?;

    metric::incr_connection_statds("direct");
    Ok(connection)
}

/// A user is connected when a connection with a token is stored
pub async fn is_user_connected(user_id: &str, repo: &repo::ImplAppRepo) -> anyhow::Result<bool> {
    Ok(repo
        .get_user_connection(user_id)
        .await?
        .is_some_and(|connection| connection.is_connected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repo::MockAppRepo, services::MockMetaService};
    use mockall::predicate::*;

    fn create_test_connection(user_id: &str, access_token: &str) -> UserConnection {
        UserConnection::new(user_id, access_token, "123", "waba-1")
    }

    #[ntex::test]
    async fn test_complete_authorization() {
        let mut mock_meta = MockMetaService::new();
        mock_meta
            .expect_exchange_code()
            .with(eq("code-1"))
            .times(1)
            .returning(|_| Ok("token-1".into()));
        mock_meta
            .expect_get_account_id()
            .with(eq("token-1"))
            .times(1)
            .returning(|_| Ok("waba-1".into()));
        let mock_meta: services::ImplMetaService = Box::new(mock_meta);

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_upsert_user_connection()
            .withf(|c| {
                c.user_id == "user-1"
                    && c.access_token == "token-1"
                    && c.waba_id == "waba-1"
                    && c.phone_number_id == "123"
            })
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result =
            complete_authorization("user-1", "code-1", "123", &mock_meta, &mock_repo).await;

        assert!(result.is_ok_and(|c| c.user_id == "user-1" && c.access_token == "token-1"));
    }

    #[ntex::test]
    async fn test_complete_authorization_exchange_fails() {
        let mut mock_meta = MockMetaService::new();
        mock_meta
            .expect_exchange_code()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("invalid verification code")));
        mock_meta.expect_get_account_id().never();
        let mock_meta: services::ImplMetaService = Box::new(mock_meta);

        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_upsert_user_connection().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = complete_authorization("user-1", "bad", "123", &mock_meta, &mock_repo).await;

        assert!(result.is_err());
    }

    #[ntex::test]
    async fn test_complete_authorization_account_lookup_fails() {
        let mut mock_meta = MockMetaService::new();
        mock_meta
            .expect_exchange_code()
            .returning(|_| Ok("token-1".into()));
        mock_meta
            .expect_get_account_id()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("token expired")));
        let mock_meta: services::ImplMetaService = Box::new(mock_meta);

        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_upsert_user_connection().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result =
            complete_authorization("user-1", "code-1", "123", &mock_meta, &mock_repo).await;

        assert!(result.is_err());
    }

    #[ntex::test]
    async fn test_connect_with_credentials() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_upsert_user_connection()
            .withf(|c| c.user_id == "user-2" && c.access_token == "static" && c.waba_id == "waba-9")
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result =
            connect_with_credentials("user-2", "static", "waba-9", "123", &mock_repo).await;

        assert!(result.is_ok());
    }

    #[ntex::test]
    async fn test_is_user_connected() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_connection()
            .with(eq("with-token"))
            .returning(|_| Ok(Some(create_test_connection("with-token", "token"))));
        mock_repo
            .expect_get_user_connection()
            .with(eq("empty-token"))
            .returning(|_| Ok(Some(create_test_connection("empty-token", ""))));
        mock_repo
            .expect_get_user_connection()
            .with(eq("unknown"))
            .returning(|_| Ok(None));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        assert!(is_user_connected("with-token", &mock_repo).await.unwrap());
        assert!(!is_user_connected("empty-token", &mock_repo).await.unwrap());
        assert!(!is_user_connected("unknown", &mock_repo).await.unwrap());
    }
}
