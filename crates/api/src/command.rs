//! The command contract.
//!
//! One trait, flat: capabilities (entity subject, audit event, async job)
//! are opt-in hooks with inert defaults, not an inheritance hierarchy.

use cirrus_auth::{AccountDirectory, AuthorizationResolver, Caller, DomainDirectory};
use cirrus_core::{Account, CommandResult, EntityRef};
use cirrus_events::EventStore;
use cirrus_infra::{AsyncJobStore, JobId, JobTracker};
use std::sync::Arc;

use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParameterDescriptor};
use crate::response::ApiOutput;

/// Job tracker as wired by the dispatcher.
pub type SharedJobTracker = JobTracker<Arc<dyn AsyncJobStore>>;

/// Declares that a command runs as an asynchronous job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsyncSpec {
    /// Entity the job operates on, recorded as the job's back-reference.
    /// Create-style commands have none until the manager makes one.
    pub instance: Option<EntityRef>,
}

/// Per-request execution context handed to a command.
///
/// Read-only views are wired in by the dispatcher at construction; commands
/// never reach for globals.
pub struct CallContext<'a> {
    pub caller: &'a Caller,
    /// Resolved owner of the command's subject (SYSTEM when unresolvable).
    pub owner: &'a Account,
    /// Job allocated for async-capable commands; `None` for sync commands
    /// and when scheduling failed.
    pub job_id: Option<JobId>,
    pub jobs: &'a SharedJobTracker,
    pub events: &'a dyn EventStore,
    pub accounts: &'a dyn AccountDirectory,
    pub domains: &'a dyn DomainDirectory,
    pub resolver: &'a AuthorizationResolver,
}

/// One named API operation.
///
/// Lifecycle per request: `descriptors()` + [`crate::params::bind`] produce
/// a [`BoundParams`], `from_params` builds the instance, the dispatcher
/// resolves/checks the owner, and `execute` runs the single manager call.
pub trait ApiCommand: Sized {
    /// Wire operation name, e.g. `createSnapshot`.
    const NAME: &'static str;
    /// Reply tag, e.g. `createsnapshotresponse`.
    const RESPONSE_NAME: &'static str;

    fn descriptors() -> &'static [ParameterDescriptor];

    fn from_params(params: &BoundParams) -> Result<Self, BindError>;

    /// Entity this command acts on; drives ownership resolution.
    fn subject(&self) -> Option<EntityRef> {
        None
    }

    /// Audit taxonomy string; `Some` for state-changing commands.
    fn event_type(&self) -> Option<&'static str> {
        None
    }

    /// Human-readable audit line. `None` degrades to a generic description;
    /// must not fail on absent optional fields.
    fn event_description(&self) -> Option<String> {
        None
    }

    /// `Some` marks the command async-capable: the dispatcher submits a job
    /// before execution and attaches its id to the reply.
    fn async_spec(&self) -> Option<AsyncSpec> {
        None
    }

    fn execute(&self, managers: &Managers, ctx: &CallContext<'_>) -> CommandResult<ApiOutput>;
}
