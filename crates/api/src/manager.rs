//! Manager collaborator contracts.
//!
//! Managers implement the actual resource operations and are external to
//! this layer. Each command calls exactly one manager operation, passing
//! itself as the argument; async operations are additionally handed the
//! submitted job id and own every status transition on it from there.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cirrus_core::CommandError;
use cirrus_infra::JobId;

use crate::commands::{AddConfigCmd, CreateSnapshotCmd, DeleteHostCmd, RebootVmCmd};

/// Fixed manager failure taxonomy, translated 1:1 to wire error codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// The request referenced something that does not exist or makes no
    /// sense; surfaced verbatim to the caller.
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    ResourceAllocation(String),

    #[error("{0}")]
    InsufficientCapacity(String),

    #[error("{0}")]
    ConcurrentOperation(String),

    #[error("{0}")]
    NetworkRuleConflict(String),

    /// Unexpected runtime fault inside the manager.
    #[error("{0}")]
    Internal(String),
}

impl From<ManagerError> for CommandError {
    fn from(value: ManagerError) -> Self {
        match value {
            ManagerError::InvalidParameter(msg) => CommandError::Param(msg),
            ManagerError::ResourceAllocation(msg) => CommandError::ResourceAllocation(msg),
            ManagerError::InsufficientCapacity(msg) => CommandError::InsufficientCapacity(msg),
            ManagerError::ConcurrentOperation(msg) => CommandError::ConcurrentOperation(msg),
            ManagerError::NetworkRuleConflict(msg) => CommandError::NetworkRuleConflict(msg),
            ManagerError::Internal(msg) => CommandError::Internal(msg),
        }
    }
}

/// One configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub category: String,
    pub component: String,
    pub instance: String,
    pub name: String,
    pub value: Option<String>,
}

/// A volume snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub volume_id: i64,
    pub name: String,
    pub state: String,
    pub created: DateTime<Utc>,
}

/// A guest virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: i64,
    pub name: String,
    pub state: String,
}

pub trait ConfigManager: Send + Sync {
    fn add_config(&self, cmd: &AddConfigCmd) -> Result<Option<ConfigItem>, ManagerError>;
}

pub trait HostManager: Send + Sync {
    fn delete_host(&self, cmd: &DeleteHostCmd) -> Result<bool, ManagerError>;
}

pub trait SnapshotManager: Send + Sync {
    /// Synchronous create phase; the copy itself runs out of band under
    /// `job_id` (when one was allocated), and the manager drives that job's
    /// transitions.
    fn create_snapshot(
        &self,
        cmd: &CreateSnapshotCmd,
        job_id: Option<JobId>,
    ) -> Result<Option<Snapshot>, ManagerError>;
}

pub trait VmManager: Send + Sync {
    fn reboot(
        &self,
        cmd: &RebootVmCmd,
        job_id: Option<JobId>,
    ) -> Result<Option<VirtualMachine>, ManagerError>;
}

/// The manager interfaces a dispatcher is wired with.
#[derive(Clone)]
pub struct Managers {
    pub config: Arc<dyn ConfigManager>,
    pub hosts: Arc<dyn HostManager>,
    pub snapshots: Arc<dyn SnapshotManager>,
    pub vms: Arc<dyn VmManager>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_core::ApiErrorCode;

    #[test]
    fn manager_failures_translate_one_to_one() {
        let cases = [
            (
                ManagerError::InvalidParameter("x".into()),
                ApiErrorCode::ParamError,
            ),
            (
                ManagerError::ResourceAllocation("x".into()),
                ApiErrorCode::ResourceAllocationError,
            ),
            (
                ManagerError::InsufficientCapacity("x".into()),
                ApiErrorCode::InsufficientCapacityError,
            ),
            (
                ManagerError::ConcurrentOperation("x".into()),
                ApiErrorCode::ConcurrentOperationError,
            ),
            (
                ManagerError::NetworkRuleConflict("x".into()),
                ApiErrorCode::NetworkRuleConflictError,
            ),
            (
                ManagerError::Internal("x".into()),
                ApiErrorCode::InternalError,
            ),
        ];

        for (manager_err, wire_code) in cases {
            let command_err: CommandError = manager_err.into();
            assert_eq!(command_err.code(), wire_code);
        }
    }
}
