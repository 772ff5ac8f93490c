use super::{MediaStore, StoreError};
use crate::config::{is_identifier, StorageConfig};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Executor};
use tracing::{debug, instrument};

pub const UPDATE_PROVIDER_SQL: &str = "UPDATE mm_jmultimedia SET provider = ? WHERE id = ?";

/// MySQL-backed store. Every call opens its own connection and closes it
/// before returning; nothing is pooled or shared between requests.
#[derive(Clone)]
pub struct MySqlMediaStore {
    options: MySqlConnectOptions,
    charset: String,
    target: String,
}

// SECURITY: MySqlConnectOptions' own Debug prints the password.
impl std::fmt::Debug for MySqlMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlMediaStore")
            .field("target", &self.target)
            .field("charset", &self.charset)
            .finish_non_exhaustive()
    }
}

impl MySqlMediaStore {
    pub fn new(cfg: &StorageConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        let options = MySqlConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .database(&cfg.database)
            .username(&cfg.user)
            .password(&cfg.password)
            // Handshake in the configured charset; the explicit SET NAMES below
            // is the only session-level negotiation.
            .charset(&cfg.charset)
            .set_names(false)
            // Statement text is the only thing worth logging and it is constant.
            .disable_statement_logging();
        Ok(Self {
            options,
            charset: cfg.charset.clone(),
            target: format!("{}:{}/{}", cfg.host, cfg.port, cfg.database),
        })
    }

    fn set_names_sql(&self) -> Result<String, StoreError> {
        // Checked at construction; kept here so the splice is never unguarded.
        if !is_identifier(&self.charset) {
            return Err(StoreError::Charset(format!(
                "unsupported character set {:?}",
                self.charset
            )));
        }
        Ok(format!("SET NAMES {}", self.charset))
    }
}

#[async_trait]
impl MediaStore for MySqlMediaStore {
    #[instrument(skip(self, provider))]
    async fn update_provider(&self, id: i64, provider: &str) -> Result<u64, StoreError> {
        let set_names = self.set_names_sql()?;
        let mut conn: MySqlConnection = self
            .options
            .connect()
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let result = async {
            Executor::execute(&mut conn, sqlx::raw_sql(&set_names))
                .await
                .map_err(|e| StoreError::Charset(e.to_string()))?;

            // Prepared once here; the bound query below reuses the cached statement.
            conn.prepare(UPDATE_PROVIDER_SQL)
                .await
                .map_err(|e| StoreError::Prepare(e.to_string()))?;

            let done = sqlx::query(UPDATE_PROVIDER_SQL)
                .bind(provider.to_owned())
                .bind(id)
                .execute(&mut conn)
                .await
                .map_err(|e| StoreError::Execute(e.to_string()))?;

            Ok::<u64, StoreError>(done.rows_affected())
        }
        .await;

        // Drop would release the socket too; close() sends COM_QUIT first.
        if let Err(e) = conn.close().await {
            debug!(error = %e, "closing storage connection failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_from_env() -> StorageConfig {
        crate::util::env::init_env();
        StorageConfig::from_env().expect("DB_* env vars")
    }

    #[test]
    fn test_update_statement_binds_both_values() {
        assert_eq!(UPDATE_PROVIDER_SQL.matches('?').count(), 2);
        assert!(UPDATE_PROVIDER_SQL.starts_with("UPDATE mm_jmultimedia SET provider = ?"));
    }

    fn local_cfg(charset: &str) -> StorageConfig {
        StorageConfig {
            host: "localhost".into(),
            port: 3306,
            database: "site".into(),
            user: "media".into(),
            password: String::new(),
            charset: charset.into(),
        }
    }

    #[test]
    fn test_options_carry_configured_charset() {
        let store = MySqlMediaStore::new(&local_cfg("utf8mb3")).unwrap();
        assert_eq!(store.options.get_charset(), "utf8mb3");
        assert_eq!(store.set_names_sql().unwrap(), "SET NAMES utf8mb3");
    }

    #[test]
    fn test_new_rejects_non_utf8_charset() {
        assert!(MySqlMediaStore::new(&local_cfg("latin1")).is_err());
    }

    #[test]
    fn test_new_rejects_bad_charset() {
        let cfg = StorageConfig {
            host: "localhost".into(),
            port: 3306,
            database: "site".into(),
            user: "media".into(),
            password: String::new(),
            charset: "utf8 COLLATE x".into(),
        };
        assert!(MySqlMediaStore::new(&cfg).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connect_error() {
        let cfg = StorageConfig {
            host: "127.0.0.1".into(),
            // Port 1 is reserved and never serves MySQL.
            port: 1,
            database: "site".into(),
            user: "media".into(),
            password: String::new(),
            charset: "utf8mb4".into(),
        };
        let store = MySqlMediaStore::new(&cfg).unwrap();
        let err = store
            .update_provider(1, "https://www.youtube.com/watch?v=XXXX")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Connect(_)), "got {err:?}");
    }

    #[tokio::test]
    #[ignore] // Requires a MySQL database with mm_jmultimedia in DB_* env
    async fn test_live_update_is_repeatable() {
        let store = MySqlMediaStore::new(&cfg_from_env()).unwrap();
        let id: i64 = std::env::var("LIVE_MEDIA_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(14434);
        let url = "https://www.youtube.com/watch?v=XXXX";
        assert_eq!(store.update_provider(id, url).await.unwrap(), 1);
        // Unchanged rows still count as matched.
        assert_eq!(store.update_provider(id, url).await.unwrap(), 1);
        assert_eq!(store.update_provider(i64::MAX, url).await.unwrap(), 0);
    }
}
