pub mod postgres;

use std::path::PathBuf;
use std::time::Duration;

use postgres::PostgresConfig;
use serde::Deserialize;

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_ping_interval() -> u64 {
    300
}

fn default_connect_timeout() -> u64 {
    10
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DB_USER and DB_PASS environment variables must be set")]
    MissingCredentials,
    #[error("InvalidConfig: {0}")]
    Invalid(#[from] envy::Error),
}

#[derive(Deserialize, Debug, Clone)]
struct ConfigFlat {
    #[serde(default = "default_host")]
    pub db_host: String,
    #[serde(default = "default_port")]
    pub db_port: u16,
    pub db_name: String,
    #[serde(default)]
    pub db_user: String,
    #[serde(default)]
    pub db_pass: String,
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub ping_interval: Duration,
    pub log_file: Option<PathBuf>,
}

pub fn load() -> Result<Config, ConfigError> {
    validate(envy::from_env::<ConfigFlat>()?)
}

/// Same parse as `load`, but from an explicit key/value iterator instead of the
/// process environment.
pub fn from_iter<I>(vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    validate(envy::from_iter::<_, ConfigFlat>(vars)?)
}

fn validate(config_flat: ConfigFlat) -> Result<Config, ConfigError> {
    if config_flat.db_user.is_empty() || config_flat.db_pass.is_empty() {
        return Err(ConfigError::MissingCredentials);
    }

    Ok(Config {
        postgres: PostgresConfig {
            host: config_flat.db_host,
            port: config_flat.db_port,
            database: config_flat.db_name,
            user: config_flat.db_user,
            password: config_flat.db_pass,
            connect_timeout: Duration::from_secs(config_flat.connect_timeout_seconds),
        },
        ping_interval: Duration::from_secs(config_flat.ping_interval_seconds),
        log_file: config_flat
            .log_file
            .filter(|path| !path.as_os_str().is_empty()),
    })
}
