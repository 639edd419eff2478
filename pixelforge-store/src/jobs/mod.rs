//! Job store
//!
//! Owns the client-side job list. The list is ordered newest first and is
//! only ever changed through the store's methods; readers take snapshots or
//! subscribe to the `watch` channels.
//!
//! Adding a job (re)starts the poll loop, which refreshes every active job
//! from the backend until none remain.

mod poller;

pub use poller::PollConfig;

use parking_lot::Mutex;
use pixelforge_client::{Backend, JobFilter};
use pixelforge_core::domain::job::Job;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::sync::watch;
use tracing::{debug, error, info};

use poller::PollSession;

/// Shared, cloneable handle to one job store instance
#[derive(Clone)]
pub struct JobStore {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn Backend>,
    config: PollConfig,
    jobs: watch::Sender<Vec<Job>>,
    active_count: watch::Sender<usize>,
    /// Current polling session; at most one exists at any time
    poller: Mutex<Option<PollSession>>,
    next_session: AtomicU64,
}

impl JobStore {
    /// Creates an empty store that talks to `backend`
    pub fn new(backend: Arc<dyn Backend>, config: PollConfig) -> Self {
        let (jobs, _) = watch::channel(Vec::new());
        let (active_count, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner {
                backend,
                config,
                jobs,
                active_count,
                poller: Mutex::new(None),
                next_session: AtomicU64::new(1),
            }),
        }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.inner.backend
    }

    // =============================================================================
    // Reads
    // =============================================================================

    /// Current job list, newest first
    pub fn snapshot(&self) -> Vec<Job> {
        self.inner.jobs.borrow().clone()
    }

    /// Job with the given id, if held
    pub fn get(&self, id: &str) -> Option<Job> {
        self.inner.jobs.borrow().iter().find(|j| j.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.jobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.jobs.borrow().is_empty()
    }

    /// Number of pending or processing jobs
    pub fn active_jobs_count(&self) -> usize {
        *self.inner.active_count.borrow()
    }

    /// Receiver notified after every mutation of the job list
    pub fn subscribe(&self) -> watch::Receiver<Vec<Job>> {
        self.inner.jobs.subscribe()
    }

    /// Receiver notified whenever the active job count changes
    pub fn subscribe_active_count(&self) -> watch::Receiver<usize> {
        self.inner.active_count.subscribe()
    }

    // =============================================================================
    // Mutations
    // =============================================================================

    /// Adds a freshly created job at the front and makes sure polling runs
    ///
    /// An entry that already carries the same id is dropped first, so ids
    /// stay unique in the list. Never fails: called outside a tokio runtime
    /// the job is still added, and polling starts with the next
    /// [`start_polling`](Self::start_polling) made from within one.
    pub fn add_job(&self, job: Job) {
        debug!(job_id = %job.id, status = %job.status, "adding job");
        self.mutate(|jobs| {
            jobs.retain(|j| j.id != job.id);
            jobs.insert(0, job);
            true
        });
        self.start_polling();
    }

    /// Replaces the entry with the same id in place; no-op if absent
    pub fn update_job(&self, job: Job) {
        self.mutate(|jobs| match jobs.iter_mut().find(|j| j.id == job.id) {
            Some(slot) => {
                *slot = job;
                true
            }
            None => false,
        });
    }

    /// Removes the entry with the given id, if present
    pub fn remove_job(&self, id: &str) {
        self.mutate(|jobs| {
            let before = jobs.len();
            jobs.retain(|j| j.id != id);
            jobs.len() != before
        });
    }

    /// Replaces the whole list with the backend's
    ///
    /// Failures are logged and leave the current list untouched.
    pub async fn load_jobs(&self) {
        match self.inner.backend.get_jobs(None).await {
            Ok(jobs) => {
                info!("Loaded {} job(s)", jobs.len());
                self.mutate(|current| {
                    *current = jobs;
                    true
                });
            }
            Err(e) => error!("Failed to load jobs: {}", e),
        }
    }

    /// Merges the backend's active jobs into the list
    ///
    /// Fetched jobs come first and replace held entries with the same id;
    /// every other held entry is kept in its relative order. Failures are
    /// logged and leave the current list untouched.
    pub async fn load_active_jobs(&self) {
        let fetched = match self.inner.backend.get_jobs(Some(JobFilter::Active)).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("Failed to load active jobs: {}", e);
                return;
            }
        };

        debug!("Merging {} active job(s)", fetched.len());
        self.mutate(|current| {
            *current = merge_active(fetched, std::mem::take(current));
            true
        });
    }

    /// Applies `f` to the list and republishes the active count
    ///
    /// `f` returns whether it changed anything; unchanged lists do not wake
    /// subscribers. The count is computed while the list is still locked so
    /// the two channels never disagree.
    fn mutate(&self, f: impl FnOnce(&mut Vec<Job>) -> bool) {
        self.inner.jobs.send_if_modified(|jobs| {
            if !f(jobs) {
                return false;
            }
            let count = count_active(jobs);
            self.inner.active_count.send_if_modified(|current| {
                let changed = *current != count;
                *current = count;
                changed
            });
            true
        });
    }

    fn active_ids(&self) -> Vec<String> {
        self.inner
            .jobs
            .borrow()
            .iter()
            .filter(|j| j.is_active())
            .map(|j| j.id.clone())
            .collect()
    }

    fn has_active(&self) -> bool {
        self.inner.jobs.borrow().iter().any(Job::is_active)
    }
}

fn count_active(jobs: &[Job]) -> usize {
    jobs.iter().filter(|j| j.is_active()).count()
}

/// `[...fetched, ...held entries not in fetched]`
fn merge_active(fetched: Vec<Job>, current: Vec<Job>) -> Vec<Job> {
    let ids: HashSet<&str> = fetched.iter().map(|j| j.id.as_str()).collect();
    let others: Vec<Job> = current
        .into_iter()
        .filter(|j| !ids.contains(j.id.as_str()))
        .collect();

    let mut merged = fetched;
    merged.extend(others);
    merged
}
