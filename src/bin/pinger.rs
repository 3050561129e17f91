use std::process;

use lib::config::{self, ConfigError};
use lib::monitor::probe::VersionProbe;
use lib::shutdown::{self, StopFlag};
use lib::{logging, monitor};
use tracing::info;

#[tokio::main]
async fn main() {
    // Credential errors get a distinct exit code and must not touch the
    // database; everything here runs before any connection attempt.
    let config = match config::load() {
        Ok(config) => config,
        Err(e @ ConfigError::MissingCredentials) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("ERROR: failed to initialize logging: {:#}", e);
        process::exit(1);
    }

    let stop = StopFlag::new();
    shutdown::listen_for_signals(stop.clone());

    info!(
        "pinger started. Configuration: host={} port={} db={} interval={}s",
        config.postgres.host,
        config.postgres.port,
        config.postgres.database,
        config.ping_interval.as_secs()
    );

    let probe = VersionProbe::new(config.postgres.clone());
    monitor::run(&probe, config.ping_interval, &stop).await;
}
