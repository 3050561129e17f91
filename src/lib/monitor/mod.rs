pub mod probe;

use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::shutdown::StopFlag;
use probe::{Probe, ProbeOutcome};

/// The inter-iteration wait is chopped into chunks of this size so a stop
/// request takes effect within one chunk instead of the full interval.
pub const SLEEP_INCREMENT: Duration = Duration::from_secs(1);

/// Runs checks every `interval` until the stop flag is set, then logs one
/// final line and returns. Check duration counts against the interval.
pub async fn run(probe: &dyn Probe, interval: Duration, stop: &StopFlag) {
    while !stop.is_set() {
        let started = Instant::now();

        let outcome = probe.check().await;
        log_outcome(&outcome);

        let remaining = interval.saturating_sub(started.elapsed());
        sleep_interruptible(remaining, stop).await;
    }
    info!("pinger stopped.");
}

/// Exactly one log line per iteration; the severity encodes the outcome.
fn log_outcome(outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Version(version) if outcome.is_typical() => {
            info!("successful connection. VERSION: {}", version)
        }
        ProbeOutcome::Version(version) => {
            info!("atypical VERSION response (no error): {}", version)
        }
        ProbeOutcome::EmptyResult => warn!("connected but VERSION() returned empty result."),
        ProbeOutcome::ConnectionFailure(e) => error!("connection failed: {}", e),
        ProbeOutcome::QueryFailure(e) => error!("database error: {}", e),
        ProbeOutcome::UnexpectedFailure(e) => error!("unexpected error: {}", e),
    }
}

async fn sleep_interruptible(total: Duration, stop: &StopFlag) {
    let mut remaining = total;
    while !remaining.is_zero() && !stop.is_set() {
        let step = remaining.min(SLEEP_INCREMENT);
        tokio::time::sleep(step).await;
        remaining = remaining.saturating_sub(step);
    }
}
