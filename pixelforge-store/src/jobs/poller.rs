//! Job poller
//!
//! Refreshes active jobs from the backend on a fixed interval. The loop is
//! owned by the store: `start_polling` is idempotent, `stop_polling` ends the
//! loop immediately, and the loop ends by itself once no job is active.

use std::sync::{Arc, Weak};
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{Inner, JobStore};
use crate::error::{Result, StoreError};

/// Poll loop settings
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Time between two refreshes of the active jobs
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(StoreError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

/// Handle of the running poll loop
pub(super) struct PollSession {
    id: u64,
    /// Dropping or firing this ends the loop
    stop: oneshot::Sender<()>,
}

impl JobStore {
    /// Starts the poll loop unless it is already running
    ///
    /// The loop runs on the current tokio runtime. Outside of one nothing is
    /// started; a later call from within a runtime starts it.
    pub fn start_polling(&self) {
        let mut poller = self.inner.poller.lock();
        if poller.is_some() {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime, job polling not started");
            return;
        };

        let id = self.inner.next_session.fetch_add(1, Ordering::Relaxed);
        let (stop, stop_rx) = oneshot::channel();
        let period = self.inner.config.interval;

        runtime.spawn(run_session(Arc::downgrade(&self.inner), id, period, stop_rx));
        *poller = Some(PollSession { id, stop });

        info!(session = id, "Started job polling (interval: {:?})", period);
    }

    /// Stops the poll loop
    ///
    /// A refresh already in flight still applies its results, but no further
    /// ticks run until polling is started again.
    pub fn stop_polling(&self) {
        if let Some(session) = self.inner.poller.lock().take() {
            let _ = session.stop.send(());
            info!(session = session.id, "Stopped job polling");
        }
    }

    /// Whether a poll loop is currently scheduled
    pub fn is_polling(&self) -> bool {
        self.inner.poller.lock().is_some()
    }

    /// Runs one tick; returns `false` when the loop should end
    async fn tick(&self, session: u64) -> bool {
        let mut active = self.active_ids();

        if active.is_empty() {
            if self.end_idle_session(session) {
                return false;
            }
            // A job was added between the snapshot and the check
            active = self.active_ids();
        }

        debug!(session, "Refreshing {} active job(s)", active.len());

        let handles: Vec<_> = active
            .into_iter()
            .map(|id| {
                let store = self.clone();
                tokio::spawn(async move { store.refresh_job(&id).await })
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Job refresh task panicked: {}", e);
            }
        }

        true
    }

    /// Clears the session if the store is still idle
    ///
    /// The active check runs under the poller lock so that a concurrent
    /// `add_job` either sees this session gone and starts a new one, or is
    /// seen here and keeps this one alive.
    fn end_idle_session(&self, session: u64) -> bool {
        let mut poller = self.inner.poller.lock();
        if self.has_active() {
            return false;
        }

        if poller.as_ref().is_some_and(|s| s.id == session) {
            *poller = None;
            info!(session, "No active jobs, polling stopped");
        }
        true
    }

    /// Replaces the job with the backend's current snapshot
    ///
    /// Failures (e.g. the job was deleted server-side) are ignored; the job
    /// is retried on the next tick.
    async fn refresh_job(&self, id: &str) {
        match self.inner.backend.get_job(id).await {
            Ok(fetched) => self.update_job(fetched.job),
            Err(e) => debug!(job_id = id, status = ?e.status(), "Failed to refresh job: {}", e),
        }
    }
}

/// Drives one poll session until stopped, idle, or the store is dropped
async fn run_session(
    inner: Weak<Inner>,
    session: u64,
    period: Duration,
    mut stop: oneshot::Receiver<()>,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = ticker.tick() => {}
        }

        let Some(inner) = inner.upgrade() else {
            break;
        };
        let store = JobStore { inner };

        if !store.tick(session).await {
            break;
        }
    }

    debug!(session, "Poll session ended");
}
