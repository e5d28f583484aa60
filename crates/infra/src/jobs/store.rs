//! Job persistence.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;

use cirrus_core::AccountId;

use super::types::{AsyncJob, JobId, JobStatus, JobTransition};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),

    #[error("job {id} is terminal ({status:?}) and cannot change")]
    TerminalImmutable { id: JobId, status: JobStatus },

    #[error("illegal transition for job {id}: {from:?} -> {to:?}")]
    IllegalTransition {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("job already exists: {0}")]
    AlreadyExists(JobId),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<JobStoreError> for cirrus_core::CommandError {
    fn from(value: JobStoreError) -> Self {
        cirrus_core::CommandError::Internal(value.to_string())
    }
}

/// Query criteria for job listings. Account scoping is resolved by the
/// caller (domain walks live in the command layer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub account_ids: Option<Vec<AccountId>>,
    pub since: Option<DateTime<Utc>>,
}

impl JobQuery {
    fn matches(&self, job: &AsyncJob) -> bool {
        if let Some(ids) = &self.account_ids {
            if !ids.contains(&job.account_id) {
                return false;
            }
        }
        if let Some(since) = self.since {
            if job.created_at < since {
                return false;
            }
        }
        true
    }
}

/// Async job store abstraction.
///
/// `apply` is the only mutation surface after insert, and it validates the
/// state machine: terminal records are immutable, and only legal successor
/// states are accepted.
pub trait AsyncJobStore: Send + Sync {
    fn insert(&self, job: AsyncJob) -> Result<(), JobStoreError>;

    fn get(&self, id: JobId) -> Result<Option<AsyncJob>, JobStoreError>;

    /// Apply a manager-driven transition, returning the updated record.
    fn apply(&self, id: JobId, transition: JobTransition) -> Result<AsyncJob, JobStoreError>;

    /// List matching jobs ordered by id.
    fn list(&self, query: &JobQuery) -> Result<Vec<AsyncJob>, JobStoreError>;

    /// Number of non-terminal jobs currently tracked.
    fn active_count(&self) -> Result<usize, JobStoreError>;
}

impl<S: AsyncJobStore + ?Sized> AsyncJobStore for Arc<S> {
    fn insert(&self, job: AsyncJob) -> Result<(), JobStoreError> {
        (**self).insert(job)
    }

    fn get(&self, id: JobId) -> Result<Option<AsyncJob>, JobStoreError> {
        (**self).get(id)
    }

    fn apply(&self, id: JobId, transition: JobTransition) -> Result<AsyncJob, JobStoreError> {
        (**self).apply(id, transition)
    }

    fn list(&self, query: &JobQuery) -> Result<Vec<AsyncJob>, JobStoreError> {
        (**self).list(query)
    }

    fn active_count(&self) -> Result<usize, JobStoreError> {
        (**self).active_count()
    }
}

fn apply_transition(job: &mut AsyncJob, transition: JobTransition) -> Result<(), JobStoreError> {
    if job.status.is_terminal() {
        return Err(JobStoreError::TerminalImmutable {
            id: job.id,
            status: job.status,
        });
    }

    match transition {
        JobTransition::Start => {
            check_move(job, JobStatus::InProgress)?;
            job.status = JobStatus::InProgress;
        }
        JobTransition::Progress { process_status } => {
            if job.status != JobStatus::InProgress {
                return Err(JobStoreError::IllegalTransition {
                    id: job.id,
                    from: job.status,
                    to: JobStatus::InProgress,
                });
            }
            job.process_status = process_status;
        }
        JobTransition::Succeed { result_payload } => {
            check_move(job, JobStatus::Succeeded)?;
            job.status = JobStatus::Succeeded;
            job.result_code = 0;
            job.result_payload = result_payload;
        }
        JobTransition::Fail {
            result_code,
            result_payload,
        } => {
            check_move(job, JobStatus::Failed)?;
            job.status = JobStatus::Failed;
            job.result_code = result_code;
            job.result_payload = result_payload;
        }
    }

    job.last_updated = Utc::now();
    Ok(())
}

fn check_move(job: &AsyncJob, to: JobStatus) -> Result<(), JobStoreError> {
    if job.status.can_transition_to(to) {
        Ok(())
    } else {
        Err(JobStoreError::IllegalTransition {
            id: job.id,
            from: job.status,
            to,
        })
    }
}

/// In-memory job store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAsyncJobStore {
    jobs: RwLock<HashMap<JobId, AsyncJob>>,
}

impl InMemoryAsyncJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl AsyncJobStore for InMemoryAsyncJobStore {
    fn insert(&self, job: AsyncJob) -> Result<(), JobStoreError> {
        let mut jobs = self
            .jobs
            .write()
            .map_err(|e| JobStoreError::Storage(e.to_string()))?;
        if jobs.contains_key(&job.id) {
            return Err(JobStoreError::AlreadyExists(job.id));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    fn get(&self, id: JobId) -> Result<Option<AsyncJob>, JobStoreError> {
        let jobs = self
            .jobs
            .read()
            .map_err(|e| JobStoreError::Storage(e.to_string()))?;
        Ok(jobs.get(&id).cloned())
    }

    fn apply(&self, id: JobId, transition: JobTransition) -> Result<AsyncJob, JobStoreError> {
        let mut jobs = self
            .jobs
            .write()
            .map_err(|e| JobStoreError::Storage(e.to_string()))?;
        let job = jobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;
        apply_transition(job, transition)?;
        Ok(job.clone())
    }

    fn list(&self, query: &JobQuery) -> Result<Vec<AsyncJob>, JobStoreError> {
        let jobs = self
            .jobs
            .read()
            .map_err(|e| JobStoreError::Storage(e.to_string()))?;
        let mut result: Vec<AsyncJob> = jobs.values().filter(|j| query.matches(j)).cloned().collect();
        result.sort_by_key(|j| j.id);
        Ok(result)
    }

    fn active_count(&self) -> Result<usize, JobStoreError> {
        let jobs = self
            .jobs
            .read()
            .map_err(|e| JobStoreError::Storage(e.to_string()))?;
        Ok(jobs.values().filter(|j| !j.status.is_terminal()).count())
    }
}
