//! Helper functions could be used in api/, rest/, ...

use crate::config;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    let app_config = &*config::APP_CONFIG;

    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&app_config.db_host)?
                .pragma("key", &app_config.db_pass_encrypt)
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .pragma("foreign_keys", "ON")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&app_config.db_host)?.pragma("foreign_keys", "ON"),
    )
    .await?)
}
