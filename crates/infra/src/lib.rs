//! `cirrus-infra` — shared control-plane state: the async job ledger and the
//! in-memory directory read model.

pub mod directory;
pub mod jobs;

pub use directory::InMemoryDirectory;
pub use jobs::{
    AsyncJob, AsyncJobStore, InMemoryAsyncJobStore, JobId, JobQuery, JobStatus, JobStoreError,
    JobTracker, JobTrackerConfig, JobTransition, SchedulingFailed, SubmitJob,
};
