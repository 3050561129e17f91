use async_trait::async_trait;

use crate::config::postgres::PostgresConfig;
use crate::db::Db;

/// A healthy PostgreSQL server answers `SELECT VERSION();` with a string
/// starting with this.
pub const EXPECTED_VERSION_PREFIX: &str = "PostgreSQL";

const VERSION_QUERY: &str = "SELECT VERSION();";

/// Result of one liveness check. Failures are values, not errors: the loop
/// turns each variant into exactly one log line and keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Connected and got a version string back.
    Version(String),
    /// Connected but the query returned no rows.
    EmptyResult,
    /// Could not open the connection (network, auth, timeout).
    ConnectionFailure(String),
    /// Connected, but the diagnostic query failed.
    QueryFailure(String),
    /// Anything else, e.g. a malformed result row.
    UnexpectedFailure(String),
}

impl ProbeOutcome {
    /// True for the typical success path: a version string with the expected
    /// product prefix.
    pub fn is_typical(&self) -> bool {
        matches!(self, ProbeOutcome::Version(v) if v.starts_with(EXPECTED_VERSION_PREFIX))
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Must never panic and never block past the configured timeouts.
    async fn check(&self) -> ProbeOutcome;
}

/// The real probe: one scoped connection, one `SELECT VERSION();`.
pub struct VersionProbe {
    pg_cfg: PostgresConfig,
}

impl VersionProbe {
    pub fn new(pg_cfg: PostgresConfig) -> Self {
        Self { pg_cfg }
    }
}

#[async_trait]
impl Probe for VersionProbe {
    async fn check(&self) -> ProbeOutcome {
        let db = match Db::connect(&self.pg_cfg).await {
            Ok(db) => db,
            Err(e) => return ProbeOutcome::ConnectionFailure(e.to_string()),
        };

        let row = match db.client.query_opt(VERSION_QUERY, &[]).await {
            Ok(row) => row,
            Err(e) if e.is_closed() => return ProbeOutcome::ConnectionFailure(e.to_string()),
            Err(e) => return ProbeOutcome::QueryFailure(e.to_string()),
        };

        match row {
            None => ProbeOutcome::EmptyResult,
            Some(row) => match row.try_get::<_, String>(0) {
                Ok(version) => ProbeOutcome::Version(version),
                Err(e) => ProbeOutcome::UnexpectedFailure(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn prefix_decides_typical() {
        let typical = ProbeOutcome::Version(
            "PostgreSQL 15.4 on x86_64-pc-linux-gnu, compiled by gcc".to_string(),
        );
        let atypical = ProbeOutcome::Version("CockroachDB CCL v23.1.9".to_string());

        assert!(typical.is_typical());
        assert!(!atypical.is_typical());
        assert!(!ProbeOutcome::EmptyResult.is_typical());
    }

    #[tokio::test]
    async fn refused_connection_is_a_value_not_a_panic() {
        // Port 1 is unassigned on any sane host; connect fails fast.
        let probe = VersionProbe::new(PostgresConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            database: "appdb".to_string(),
            user: "monitor".to_string(),
            password: "secret".to_string(),
            connect_timeout: Duration::from_secs(1),
        });

        assert!(matches!(
            probe.check().await,
            ProbeOutcome::ConnectionFailure(_)
        ));
    }
}
