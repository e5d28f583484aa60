//! Command execution pipeline.
//!
//! One orchestration path for every command:
//!
//! ```text
//! RawParams
//!   ↓
//! 1. Bind against the command's descriptor table
//!   ↓
//! 2. Resolve the owning account and check visibility
//!   ↓
//! 3. Submit an async job (async-capable commands only)
//!   ↓
//! 4. Execute the single manager call
//!   ↓
//! 5. Record the audit event (state-changing commands, success or failure)
//!   ↓
//! 6. Assemble the reply (job id attached for async commands)
//! ```
//!
//! Binding and authorization failures abort before any manager call and
//! before any event. Manager failures still produce the event: the owner
//! was already resolved, so the trail stays attributable.

use std::sync::Arc;

use tracing::{debug, error, info};

use cirrus_auth::{AccountDirectory, AuthorizationResolver, Caller, DomainDirectory};
use cirrus_core::{CommandError, CommandResult};
use cirrus_events::{EventRecorder, EventStore};
use cirrus_infra::{JobId, SubmitJob};

use crate::command::{ApiCommand, CallContext, SharedJobTracker};
use crate::manager::Managers;
use crate::params::{bind, RawParams};
use crate::response::ApiOutput;

/// Orchestrates bind → authorize → (submit | execute) → record → respond.
///
/// Everything it touches is injected at construction; there is no global
/// lookup anywhere downstream of a dispatch.
pub struct CommandDispatcher {
    resolver: AuthorizationResolver,
    tracker: SharedJobTracker,
    recorder: EventRecorder<Arc<dyn EventStore>>,
    events: Arc<dyn EventStore>,
    accounts: Arc<dyn AccountDirectory>,
    domains: Arc<dyn DomainDirectory>,
    managers: Managers,
}

impl CommandDispatcher {
    pub fn new(
        resolver: AuthorizationResolver,
        tracker: SharedJobTracker,
        events: Arc<dyn EventStore>,
        accounts: Arc<dyn AccountDirectory>,
        domains: Arc<dyn DomainDirectory>,
        managers: Managers,
    ) -> Self {
        Self {
            resolver,
            tracker,
            recorder: EventRecorder::new(events.clone()),
            events,
            accounts,
            domains,
            managers,
        }
    }

    /// Run one command instance from raw parameters to a wire-ready reply.
    pub fn dispatch<C: ApiCommand>(
        &self,
        caller: &Caller,
        raw: &RawParams,
    ) -> CommandResult<ApiOutput> {
        // 1) Bind. Failures abort with no side effects.
        let bound = bind(C::descriptors(), raw)?;
        let cmd = C::from_params(&bound)?;
        debug!(cmd = C::NAME, caller = %caller.account.id, "dispatching");

        // 2) Resolve the owner, then enforce visibility. No manager call is
        //    reachable without a resolved owner.
        let owner = self.resolver.resolve_owner(caller, cmd.subject());
        self.resolver.check_access(caller, &owner)?;

        // 3) Async-capable commands get their job up front; the manager is
        //    handed the id and owns the job from here.
        let submitted = cmd.async_spec().map(|spec| {
            let mut submit = SubmitJob::new(C::NAME, owner.id, caller.user_id);
            if let Some(instance) = spec.instance {
                submit = submit.with_instance(instance);
            }
            self.tracker.submit(submit)
        });
        let job_id = submitted.and_then(|outcome| outcome.ok());

        // 4) The single manager call.
        let ctx = CallContext {
            caller,
            owner: &owner,
            job_id,
            jobs: &self.tracker,
            events: &self.events,
            accounts: &*self.accounts,
            domains: &*self.domains,
            resolver: &self.resolver,
        };
        let result = cmd.execute(&self.managers, &ctx);

        // 5) Audit, success or failure alike. A store hiccup must not mask
        //    the command outcome.
        if let Some(event_type) = cmd.event_type() {
            if let Err(e) = self
                .recorder
                .record(owner.id, event_type, || cmd.event_description())
            {
                error!(cmd = C::NAME, error = %e, "failed to append audit event");
            }
        }

        // 6) Reply. Scheduling failure keeps the legacy jobid=0 wire form.
        match result {
            Ok(output) => {
                let output = match submitted {
                    Some(outcome) => output.with_job_id(outcome.unwrap_or(JobId::NONE).value()),
                    None => output,
                };
                Ok(output)
            }
            Err(err) => {
                match &err {
                    CommandError::Internal(detail) => {
                        error!(cmd = C::NAME, detail = %detail, "command failed internally");
                    }
                    other => {
                        info!(cmd = C::NAME, code = other.code().as_u16(), error = %other, "command failed");
                    }
                }
                Err(err)
            }
        }
    }
}
