use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

/// Cooperative stop request, shared between the signal listener and the
/// monitor loop. SeqCst is the visibility guarantee between the two tasks.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Spawns the task that waits for SIGTERM/SIGINT, logs which one arrived and
/// sets the flag. Registration failure is logged, never panicked; the loop
/// then simply cannot be stopped by signal.
pub fn listen_for_signals(stop: StopFlag) -> JoinHandle<()> {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to install SIGTERM handler: {}", e);
                    return;
                }
            };
            let mut sigint = match signal(SignalKind::interrupt()) {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to install SIGINT handler: {}", e);
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received: stopping after current iteration.")
                }
                _ = sigint.recv() => {
                    info!("SIGINT received: stopping after current iteration.")
                }
            }
            stop.set();
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to install Ctrl+C handler: {}", e);
                return;
            }
            info!("Ctrl+C received: stopping after current iteration.");
            stop.set();
        }
    })
}
