//! Asynchronous job tracking.
//!
//! The tracker owns job identity and status bookkeeping; the *content* of a
//! job's result belongs to the manager executing it. Managers drive every
//! status transition; this layer only validates and persists them.

pub mod store;
pub mod tracker;
pub mod types;

pub use store::{AsyncJobStore, InMemoryAsyncJobStore, JobQuery, JobStoreError};
pub use tracker::{JobTracker, JobTrackerConfig, SchedulingFailed};
pub use types::{AsyncJob, JobId, JobStatus, JobTransition, SubmitJob};
