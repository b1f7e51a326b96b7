//! PostgreSQL client implementation
//!
//! Owns the connection pool for the facility source. The pool is closed when
//! the client is dropped, so every exit path of a run releases its
//! connections.

use super::cursor::FacilityCursor;
use crate::config::DatabaseConfig;
use crate::domain::{DatabaseError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::NoTls;

/// PostgreSQL client for the facility source
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Printable target, credentials masked
    target: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// Building the pool does not open a connection; call
    /// [`test_connection`](Self::test_connection) to fail fast.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector or the pool cannot be built.
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let password: &str = config.password.expose_secret().as_ref();
        let ssl_mode = parse_ssl_mode(&config.ssl_mode);
        let timeout = Duration::from_secs(config.connection_timeout_seconds);

        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .user(&config.user)
            .password(password)
            .dbname(&config.database)
            .ssl_mode(ssl_mode)
            .connect_timeout(timeout)
            .application_name("facility-feed");

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = if matches!(ssl_mode, SslMode::Disable) {
            Manager::from_config(pg_config, NoTls, manager_config)
        } else {
            let connector = native_tls::TlsConnector::new()
                .map_err(|e| DatabaseError::Tls(e.to_string()))?;
            Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
        };

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;

        Ok(Self {
            pool,
            target: config.describe(),
        })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        tracing::info!(target_db = %self.target, "PostgreSQL connection test successful");
        Ok(())
    }

    /// Open a server-side cursor over the facility table
    ///
    /// The cursor holds one pooled connection until it is exhausted or
    /// dropped.
    pub async fn open_cursor(&self, page_size: usize) -> Result<FacilityCursor> {
        let client = self.get_connection().await?;
        FacilityCursor::open(client, page_size).await
    }

    /// Get a connection from the pool
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()).into())
    }

    /// Close the pool; outstanding connections are dropped when returned
    pub fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close();
            tracing::debug!(target_db = %self.target, "PostgreSQL pool closed");
        }
    }

    /// Masked connection target, safe for logs
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Drop for PostgreSQLClient {
    fn drop(&mut self) {
        self.close();
    }
}

fn parse_ssl_mode(mode: &str) -> SslMode {
    match mode {
        "disable" => SslMode::Disable,
        "require" => SslMode::Require,
        _ => SslMode::Prefer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(ssl_mode: &str) -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "feed".to_string(),
            password: secret_string("hunter2".to_string()),
            database: "facilities".to_string(),
            max_connections: 2,
            connection_timeout_seconds: 5,
            ssl_mode: ssl_mode.to_string(),
            page_size: 100,
        }
    }

    #[test]
    fn test_parse_ssl_mode() {
        assert!(matches!(parse_ssl_mode("disable"), SslMode::Disable));
        assert!(matches!(parse_ssl_mode("require"), SslMode::Require));
        assert!(matches!(parse_ssl_mode("prefer"), SslMode::Prefer));
    }

    #[tokio::test]
    async fn test_pool_builds_lazily() {
        let client = PostgreSQLClient::new(&config("disable")).unwrap();
        assert!(!client.target().contains("hunter2"));
        assert_eq!(client.target(), "postgresql://***@localhost:5432/facilities");
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let client = PostgreSQLClient::new(&config("disable")).unwrap();
        client.close();
        client.close();
        assert!(client.get_connection().await.is_err());
    }
}
