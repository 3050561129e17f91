use tokio_postgres::{Client as TokioPgClient, Error, NoTls};
use tracing::debug;

use crate::config::postgres::PostgresConfig;

/// One scoped connection. Built per check, dropped before the next sleep
/// begins; dropping the client ends the driver task and closes the socket.
pub struct Db {
    pub client: TokioPgClient,
}

impl Db {
    pub async fn connect(pg_cfg: &PostgresConfig) -> Result<Self, Error> {
        let conn_str = format!(
            "host={} port={} user={} password={} dbname={} connect_timeout={}",
            pg_cfg.host,
            pg_cfg.port,
            pg_cfg.user,
            pg_cfg.password,
            pg_cfg.database,
            pg_cfg.connect_timeout.as_secs()
        );
        let (client, connection) = tokio_postgres::connect(conn_str.as_ref(), NoTls).await?;

        tokio::spawn(async move {
            // Resolves when the client is dropped; a late error here is part
            // of teardown and must not escalate.
            if let Err(e) = connection.await {
                debug!("connection task ended with error: {}", e);
            }
        });

        let db = Db { client };
        db.set_statement_timeout(pg_cfg).await;

        Ok(db)
    }

    /// Best-effort session statement timeout, in milliseconds. A server that
    /// rejects the setting leaves the session without one; the check still runs.
    async fn set_statement_timeout(&self, pg_cfg: &PostgresConfig) {
        let timeout_ms = pg_cfg.connect_timeout.as_millis();
        match self
            .client
            .batch_execute(&format!("SET statement_timeout = {};", timeout_ms))
            .await
        {
            Ok(()) => debug!("statement_timeout set to {}ms", timeout_ms),
            Err(e) => debug!(
                "server rejected statement_timeout, session runs without one: {}",
                e
            ),
        }
    }
}
