//! Helper functions could be used in api/, front/, ...

use crate::config;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

/// Connection options for `app_config.db_host`. The database is encrypted
/// with sqlcipher when `DB_PASS_ENCRYPT` is set.
pub fn sqlite_connect_options(
    app_config: &config::AppConfig,
) -> anyhow::Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(&app_config.db_host)?.create_if_missing(true);

    Ok(match &app_config.db_pass_encrypt {
        Some(key) => options
            .pragma("key", key.clone())
            .pragma("cipher_page_size", "1024")
            .pragma("kdf_iter", "64000")
            .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
            .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
            .journal_mode(SqliteJournalMode::Delete),
        None => options,
    })
}

pub async fn setup_sqlite_db_pool(app_config: &config::AppConfig) -> anyhow::Result<SqlitePool> {
    let options = sqlite_connect_options(app_config)?;

    if let Some(dir) = options
        .get_filename()
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(dir)?;
    }

    Ok(SqlitePool::connect_with(options).await?)
}
