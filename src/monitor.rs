// Periodic bandwidth monitor: recurring driver plus the public accessor.

use crate::config::MonitoringConfig;
use crate::sampler;
use crate::snapshot::SpeedStore;
use std::sync::{Arc, Mutex};
use tokio::time::interval;

/// Live monitor settings, re-read at the start of every cycle so changes
/// take effect without restarting the driver.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: Arc<Mutex<MonitoringConfig>>,
}

impl Settings {
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
        }
    }

    pub fn update(&self, config: MonitoringConfig) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = config;
        }
    }

    fn current(&self) -> MonitoringConfig {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Handle to a running monitor. Dropping it (or calling `stop`) cancels
/// future cycles; an in-flight cycle is detached and allowed to finish its
/// final publish harmlessly.
pub struct MonitorHandle {
    store: Arc<SpeedStore>,
    settings: Settings,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MonitorHandle {
    /// Current (upload, download) in KB/s. Non-blocking copy of the last
    /// published pair; (0.0, 0.0) until the first cycle completes.
    pub fn network_speeds_kbps(&self) -> (f64, f64) {
        let snapshot = self.store.read();
        (snapshot.upload_kbps, snapshot.download_kbps)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stop(mut self) {
        self.signal_shutdown();
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// Starts the recurring driver. Each tick runs one sampling cycle to
/// completion and publishes the result; a tick that fires while a cycle is
/// still running is skipped, never queued. Sampler failures are logged and
/// leave the last published snapshot in place.
pub fn spawn(settings: Settings) -> MonitorHandle {
    let store = Arc::new(SpeedStore::new());
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let cadence = settings.current().cadence();

    let task_store = store.clone();
    let task_settings = settings.clone();
    tokio::spawn(async move {
        let mut tick = interval(cadence);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let config = task_settings.current();
                    let filter = config.prefix_filter();
                    match sampler::sample(&filter, config.sampling_interval()).await {
                        Ok(snapshot) => {
                            tracing::debug!(
                                upload_kbps = snapshot.upload_kbps,
                                download_kbps = snapshot.download_kbps,
                                "bandwidth sampled"
                            );
                            task_store.publish(snapshot);
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "sample_bandwidth",
                                "sampling cycle failed; keeping last snapshot"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("bandwidth monitor shutting down");
                    break;
                }
            }
        }
    });

    MonitorHandle {
        store,
        settings,
        shutdown_tx: Some(shutdown_tx),
    }
}
