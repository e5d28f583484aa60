//! API error model.
//!
//! Every dispatch failure resolves to one `CommandError` variant; each
//! variant maps 1:1 to a stable numeric wire code. Layer-specific errors
//! (binding, authorization, manager failures) convert into this taxonomy at
//! the dispatch boundary and are never silently swallowed.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the command layer.
pub type CommandResult<T> = Result<T, CommandError>;

/// Top-level command failure taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Malformed or missing input. Surfaced verbatim to the caller.
    #[error("{0}")]
    Param(String),

    /// The caller may not act on the resolved owner's resources.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A manager returned an unexpected null/false or an unchecked fault.
    /// Surfaced with a generic message; full detail is logged server-side.
    #[error("internal error: {0}")]
    Internal(String),

    /// A manager could not allocate the requested resource.
    #[error("resource allocation failure: {0}")]
    ResourceAllocation(String),

    /// A manager found no capacity for the requested resource.
    #[error("insufficient capacity: {0}")]
    InsufficientCapacity(String),

    /// Another operation on the same target is already in flight.
    #[error("concurrent operation: {0}")]
    ConcurrentOperation(String),

    /// A requested network rule conflicts with an existing one.
    #[error("network rule conflict: {0}")]
    NetworkRuleConflict(String),
}

impl CommandError {
    pub fn param(msg: impl Into<String>) -> Self {
        Self::Param(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn code(&self) -> ApiErrorCode {
        match self {
            CommandError::Param(_) => ApiErrorCode::ParamError,
            CommandError::PermissionDenied(_) => ApiErrorCode::AccountError,
            CommandError::Internal(_) => ApiErrorCode::InternalError,
            CommandError::ResourceAllocation(_) => ApiErrorCode::ResourceAllocationError,
            CommandError::InsufficientCapacity(_) => ApiErrorCode::InsufficientCapacityError,
            CommandError::ConcurrentOperation(_) => ApiErrorCode::ConcurrentOperationError,
            CommandError::NetworkRuleConflict(_) => ApiErrorCode::NetworkRuleConflictError,
        }
    }

    /// Wire-ready `{errorCode, message}` shape.
    pub fn to_wire(&self) -> WireError {
        WireError {
            error_code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Stable numeric wire codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    ParamError,
    AccountError,
    InternalError,
    ResourceAllocationError,
    InsufficientCapacityError,
    ConcurrentOperationError,
    NetworkRuleConflictError,
}

impl ApiErrorCode {
    pub fn as_u16(self) -> u16 {
        match self {
            ApiErrorCode::ParamError => 431,
            ApiErrorCode::AccountError => 531,
            ApiErrorCode::InternalError => 530,
            ApiErrorCode::InsufficientCapacityError => 533,
            ApiErrorCode::ResourceAllocationError => 534,
            ApiErrorCode::ConcurrentOperationError => 535,
            ApiErrorCode::NetworkRuleConflictError => 536,
        }
    }
}

impl Serialize for ApiErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.as_u16())
    }
}

/// Serialized error envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireError {
    #[serde(rename = "errorCode")]
    pub error_code: ApiErrorCode,
    pub message: String,
}
