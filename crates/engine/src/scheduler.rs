//! Periodic refresh driving the fetch cycle.

use crate::engine::{FetchReport, QuoteEngine};
use crate::error::ConfigError;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Drives repeated fetch cycles against the engine.
///
/// At most one periodic job is active at any time: starting while a job is
/// running atomically supersedes it, and stopping an already-stopped
/// scheduler is a no-op. Cycle reports are pushed to the channel handed out
/// at construction.
pub struct Scheduler {
    engine: Arc<QuoteEngine>,
    reports: mpsc::UnboundedSender<FetchReport>,
    job: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(engine: Arc<QuoteEngine>) -> (Self, mpsc::UnboundedReceiver<FetchReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                engine,
                reports: tx,
                job: Mutex::new(None),
            },
            rx,
        )
    }

    /// Start (or restart) the periodic job. The first cycle fires after the
    /// configured short delay, then every `interval`.
    pub fn start(&self, interval: Duration) -> Result<(), ConfigError> {
        let min = self.engine.config().min_refresh_interval;
        if interval < min {
            return Err(ConfigError::InvalidInterval {
                min_secs: min.as_secs(),
            });
        }

        let mut job = self.lock_job();
        if let Some(old) = job.take() {
            old.abort();
            debug!("superseded previous auto-refresh job");
        }

        let engine = Arc::clone(&self.engine);
        let reports = self.reports.clone();
        let first_delay = self.engine.config().first_refresh_delay;
        *job = Some(tokio::spawn(async move {
            tokio::time::sleep(first_delay).await;
            loop {
                debug!("auto-refresh cycle");
                let report = engine.fetch_once().await;
                if reports.send(report).is_err() {
                    // Consumer dropped the receiver; the job has no audience.
                    break;
                }
                tokio::time::sleep(interval).await;
            }
        }));
        drop(job);

        self.engine.mark_auto(true, Some(interval));
        info!(interval_secs = interval.as_secs(), "auto-refresh started");
        Ok(())
    }

    /// Stop the periodic job. A no-op when already stopped.
    pub fn stop(&self) {
        let handle = self.lock_job().take();
        match handle {
            Some(handle) => {
                handle.abort();
                self.engine.mark_auto(false, None);
                info!("auto-refresh stopped");
            }
            None => debug!("auto-refresh already stopped"),
        }
    }

    /// Whether a periodic job is currently active.
    pub fn is_running(&self) -> bool {
        self.lock_job()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    fn lock_job(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.job.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
