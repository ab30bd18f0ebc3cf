//! Recurring scheduler for the delivery processor.
//!
//! One loop per scheduler, one batch at a time: batches never overlap within
//! a process. Tests construct a disabled scheduler (or none at all) and call
//! `process_pending_batch` directly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::processor::DeliveryProcessor;

/// Scheduler knobs, injected rather than read from any global.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Off means no loop is spawned at all.
    pub enabled: bool,
    pub tick_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval: Duration::from_secs(30),
        }
    }
}

/// Handle to the recurring delivery loop.
/// - `request_shutdown()` stops taking new batches and cancels the in-flight
///   delivery attempt (accounted as a failure, not dropped).
/// - `shutdown_and_join()` additionally waits for the loop to exit.
pub struct Scheduler {
    shutdown_tx: watch::Sender<bool>,
    join: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn spawn(config: SchedulerConfig, processor: Arc<DeliveryProcessor>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let join = if config.enabled {
            let mut rx = shutdown_rx;
            Some(tokio::spawn(async move {
                tick_loop(config.tick_interval, processor, &mut rx).await;
            }))
        } else {
            None
        };

        Self { shutdown_tx, join }
    }

    /// Is a tick loop actually running?
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already have exited
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(mut self) {
        self.request_shutdown();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

async fn tick_loop(
    interval: Duration,
    processor: Arc<DeliveryProcessor>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let mut batch_shutdown = shutdown_rx.clone();
                match processor.process_pending_batch_with(&mut batch_shutdown).await {
                    Ok(summary) => {
                        if summary.attempted > 0 {
                            tracing::debug!(
                                attempted = summary.attempted,
                                delivered = summary.delivered,
                                failed = summary.failed,
                                "scheduled batch complete"
                            );
                        }
                    }
                    // Store outage: abort this batch, retry on the next tick.
                    Err(err) => {
                        tracing::warn!(error = %err, "batch aborted, retrying next tick");
                    }
                }
            }
        }
    }
}
