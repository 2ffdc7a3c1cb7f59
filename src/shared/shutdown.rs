//! Graceful shutdown signal
//!
//! One `ShutdownSignal` is cloned into every task that must stop on
//! SIGTERM / Ctrl+C. Triggering is idempotent and late waiters return
//! immediately.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ShutdownSignal {
    sender: watch::Sender<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn trigger(&self) {
        let first = self.sender.send_if_modified(|triggered| {
            let changed = !*triggered;
            *triggered = true;
            changed
        });
        if first {
            info!("Shutdown signal triggered");
        }
    }

    /// Resolves once `trigger` has been called, including before this call.
    pub async fn wait(&self) {
        let mut rx = self.sender.subscribe();
        // the sender lives in self, so the channel cannot close under us
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Triggers on SIGTERM or SIGINT.
    pub fn listen_for_os_signals(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            wait_for_os_signal().await;
            signal.trigger();
        });
    }

    /// Runs `cleanup` once shutdown is triggered, bounded by `timeout`.
    /// Returns `false` if the timeout elapsed first.
    pub async fn drain<F>(&self, timeout: Duration, cleanup: F) -> bool
    where
        F: std::future::Future<Output = ()>,
    {
        self.wait().await;
        info!(timeout_secs = timeout.as_secs(), "Starting graceful shutdown");
        match tokio::time::timeout(timeout, cleanup).await {
            Ok(()) => true,
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out");
                false
            }
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM"),
                _ = sigint.recv() => info!("Received SIGINT"),
            }
        }
        _ => {
            warn!("Unix signal handlers unavailable, falling back to Ctrl+C");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_os_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };
        signal.trigger();
        waiter.await.unwrap();
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn late_waiters_do_not_block() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn drain_reports_timeout() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        assert!(signal.drain(Duration::from_secs(1), async {}).await);
        assert!(
            !signal
                .drain(Duration::from_millis(10), tokio::time::sleep(Duration::from_secs(5)))
                .await
        );
    }
}
