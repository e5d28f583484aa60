//! Job submission and polling.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::{info, warn};

use super::store::{AsyncJobStore, JobQuery, JobStoreError};
use super::types::{AsyncJob, JobId, JobTransition, SubmitJob};

/// The tracker could not allocate a job.
///
/// Callers that must keep the legacy wire behavior answer with `jobid = 0`;
/// internally the failure stays an explicit variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unable to schedule async job: tracker at capacity")]
pub struct SchedulingFailed;

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct JobTrackerConfig {
    /// Cap on concurrently tracked non-terminal jobs.
    pub max_active_jobs: usize,
    /// Name for logging.
    pub name: String,
}

impl Default for JobTrackerConfig {
    fn default() -> Self {
        Self {
            max_active_jobs: 4096,
            name: "job-tracker".to_string(),
        }
    }
}

impl JobTrackerConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_active_jobs(mut self, max: usize) -> Self {
        self.max_active_jobs = max;
        self
    }
}

/// Allocates, persists, and reports status for asynchronous work.
///
/// Ids are strictly increasing and never zero. Status transitions come only
/// from the owning manager through [`JobTracker::transition`]; the tracker
/// never initiates or reverses one. Reads are side-effect-free.
#[derive(Debug)]
pub struct JobTracker<S> {
    store: S,
    seq: AtomicU64,
    config: JobTrackerConfig,
}

impl<S: AsyncJobStore> JobTracker<S> {
    pub fn new(store: S, config: JobTrackerConfig) -> Self {
        Self {
            store,
            seq: AtomicU64::new(1),
            config,
        }
    }

    /// Persist a new Submitted job and hand back its id.
    pub fn submit(&self, submit: SubmitJob) -> Result<JobId, SchedulingFailed> {
        let active = self.store.active_count().map_err(|e| {
            warn!(tracker = %self.config.name, error = %e, "job store unavailable at submit");
            SchedulingFailed
        })?;
        if active >= self.config.max_active_jobs {
            warn!(
                tracker = %self.config.name,
                active,
                max = self.config.max_active_jobs,
                cmd = %submit.cmd_name,
                "job capacity exhausted"
            );
            return Err(SchedulingFailed);
        }

        let id = JobId(self.seq.fetch_add(1, Ordering::SeqCst));
        let cmd_name = submit.cmd_name.clone();
        self.store
            .insert(AsyncJob::submitted(id, submit))
            .map_err(|e| {
                warn!(tracker = %self.config.name, job_id = %id, error = %e, "job insert failed");
                SchedulingFailed
            })?;

        info!(tracker = %self.config.name, job_id = %id, cmd = %cmd_name, "async job submitted");
        Ok(id)
    }

    /// Record a manager-driven transition.
    pub fn transition(&self, id: JobId, transition: JobTransition) -> Result<AsyncJob, JobStoreError> {
        self.store.apply(id, transition)
    }

    /// Current persisted state of one job; no side effects.
    pub fn get(&self, id: JobId) -> Result<Option<AsyncJob>, JobStoreError> {
        self.store.get(id)
    }

    /// Current persisted state of all matching jobs; no side effects.
    pub fn list(&self, query: &JobQuery) -> Result<Vec<AsyncJob>, JobStoreError> {
        self.store.list(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::store::InMemoryAsyncJobStore;
    use crate::jobs::types::JobStatus;
    use cirrus_core::{AccountId, UserId};

    fn submit(cmd: &str) -> SubmitJob {
        SubmitJob::new(cmd, AccountId::new(5), UserId::new(50))
    }

    #[test]
    fn ids_are_strictly_increasing_and_nonzero() {
        let tracker = JobTracker::new(InMemoryAsyncJobStore::arc(), JobTrackerConfig::default());

        let mut last = 0u64;
        for _ in 0..10 {
            let id = tracker.submit(submit("rebootVirtualMachine")).unwrap();
            assert!(id.value() > last);
            last = id.value();
        }
    }

    #[test]
    fn capacity_exhaustion_is_an_explicit_failure() {
        let tracker = JobTracker::new(
            InMemoryAsyncJobStore::arc(),
            JobTrackerConfig::default().with_max_active_jobs(2),
        );

        tracker.submit(submit("a")).unwrap();
        tracker.submit(submit("b")).unwrap();
        assert_eq!(tracker.submit(submit("c")), Err(SchedulingFailed));
    }

    #[test]
    fn terminal_jobs_free_capacity() {
        let tracker = JobTracker::new(
            InMemoryAsyncJobStore::arc(),
            JobTrackerConfig::default().with_max_active_jobs(1),
        );

        let id = tracker.submit(submit("a")).unwrap();
        assert_eq!(tracker.submit(submit("b")), Err(SchedulingFailed));

        tracker.transition(id, JobTransition::Start).unwrap();
        tracker
            .transition(id, JobTransition::Succeed { result_payload: None })
            .unwrap();
        tracker.submit(submit("b")).unwrap();
    }

    #[test]
    fn polling_is_idempotent_before_terminal_state() {
        let tracker = JobTracker::new(InMemoryAsyncJobStore::arc(), JobTrackerConfig::default());
        let id = tracker.submit(submit("createSnapshot")).unwrap();

        let first = tracker.get(id).unwrap().unwrap();
        let second = tracker.get(id).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.status, JobStatus::Submitted);

        tracker.transition(id, JobTransition::Start).unwrap();
        let third = tracker.get(id).unwrap().unwrap();
        let fourth = tracker.get(id).unwrap().unwrap();
        assert_eq!(third, fourth);
        assert_eq!(third.status, JobStatus::InProgress);
    }
}
