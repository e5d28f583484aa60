//! Job records and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cirrus_core::{AccountId, EntityRef, UserId};

/// Unique job identifier.
///
/// Allocated strictly increasing from 1; `0` is the legacy wire sentinel for
/// "could not schedule" and is never allocated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// The wire sentinel answered when scheduling failed.
    pub const NONE: JobId = JobId(0);

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Persisted, not yet picked up by the owning manager.
    Submitted,
    /// The owning manager is executing.
    InProgress,
    /// Terminal.
    Succeeded,
    /// Terminal.
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Legal successor states: Submitted → InProgress → {Succeeded, Failed}.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match self {
            JobStatus::Submitted => matches!(next, JobStatus::InProgress),
            JobStatus::InProgress => matches!(next, JobStatus::Succeeded | JobStatus::Failed),
            JobStatus::Succeeded | JobStatus::Failed => false,
        }
    }
}

/// A status/result update applied by the owning manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTransition {
    /// Submitted → InProgress.
    Start,
    /// Progress heartbeat; only legal while InProgress.
    Progress { process_status: i32 },
    /// InProgress → Succeeded; result payload is an opaque serialized string.
    Succeed { result_payload: Option<String> },
    /// InProgress → Failed.
    Fail {
        result_code: i32,
        result_payload: Option<String>,
    },
}

/// A persisted asynchronous unit of work.
///
/// `instance` is a back-reference to the entity the job operates on, never
/// an ownership edge. Once `status` is terminal the record is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncJob {
    pub id: JobId,
    pub cmd_name: String,
    pub account_id: AccountId,
    pub user_id: UserId,
    pub instance: Option<EntityRef>,
    pub status: JobStatus,
    pub process_status: i32,
    pub result_code: i32,
    pub result_payload: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl AsyncJob {
    pub fn submitted(id: JobId, submit: SubmitJob) -> Self {
        let now = Utc::now();
        Self {
            id,
            cmd_name: submit.cmd_name,
            account_id: submit.account_id,
            user_id: submit.user_id,
            instance: submit.instance,
            status: JobStatus::Submitted,
            process_status: 0,
            result_code: 0,
            result_payload: None,
            created_at: now,
            last_updated: now,
        }
    }
}

/// Submission request for a new job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitJob {
    pub cmd_name: String,
    pub account_id: AccountId,
    pub user_id: UserId,
    pub instance: Option<EntityRef>,
}

impl SubmitJob {
    pub fn new(cmd_name: impl Into<String>, account_id: AccountId, user_id: UserId) -> Self {
        Self {
            cmd_name: cmd_name.into(),
            account_id,
            user_id,
            instance: None,
        }
    }

    pub fn with_instance(mut self, instance: EntityRef) -> Self {
        self.instance = Some(instance);
        self
    }
}
