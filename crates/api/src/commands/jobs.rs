//! Async job polling.

use chrono::{DateTime, Utc};
use serde_json::Value;

use cirrus_core::{AccountId, AccountKind, CommandError, CommandResult, DomainId};
use cirrus_infra::{AsyncJob, JobQuery, JobStatus};

use crate::command::{ApiCommand, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParamKind, ParameterDescriptor};
use crate::response::{ApiOutput, ListResponse, ResponseObject};

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::optional("accountid", ParamKind::Long),
    ParameterDescriptor::optional("domainid", ParamKind::Long),
    ParameterDescriptor::optional("startdate", ParamKind::TzDate),
];

/// Poll async jobs. Read-only and idempotent: repeated polls before a
/// terminal transition return identical projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAsyncJobsCmd {
    pub account_id: Option<i64>,
    pub domain_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
}

impl ApiCommand for ListAsyncJobsCmd {
    const NAME: &'static str = "listAsyncJobs";
    const RESPONSE_NAME: &'static str = "listasyncjobsresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            account_id: params.get_long("accountid")?,
            domain_id: params.get_long("domainid")?,
            start_date: params.get_date("startdate")?,
        })
    }

    fn execute(&self, _managers: &Managers, ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        // Tenancy scoping: users see their own jobs; domain admins see their
        // subtree (narrowed further by an in-scope domainid filter); global
        // admins see whatever they asked for.
        let account_ids = match ctx.caller.account.kind {
            AccountKind::User => Some(vec![ctx.caller.account.id]),
            _ => self.account_id.map(|id| vec![AccountId::new(id)]),
        };

        let domain_scope = match (self.domain_id.map(DomainId::new), ctx.caller.account.kind) {
            (Some(requested), AccountKind::DomainAdmin) => {
                if !ctx
                    .resolver
                    .is_same_or_descendant(requested, ctx.caller.account.domain_id)
                {
                    return Err(CommandError::permission_denied(format!(
                        "domain {requested} is outside the caller's scope"
                    )));
                }
                Some(requested)
            }
            (None, AccountKind::DomainAdmin) => Some(ctx.caller.account.domain_id),
            (requested, _) => requested,
        };

        let query = JobQuery {
            account_ids,
            since: self.start_date,
        };
        let jobs = ctx.jobs.list(&query)?;

        let visible = jobs.into_iter().filter(|job| match domain_scope {
            None => true,
            Some(scope) => ctx
                .accounts
                .find_account(job.account_id)
                .is_some_and(|acct| ctx.resolver.is_same_or_descendant(acct.domain_id, scope)),
        });

        let elements = visible.map(|job| job_to_dto(&job)).collect();
        Ok(ApiOutput::List(ListResponse::new(Self::RESPONSE_NAME, elements)))
    }
}

fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Submitted => "submitted",
        JobStatus::InProgress => "in_progress",
        JobStatus::Succeeded => "succeeded",
        JobStatus::Failed => "failed",
    }
}

fn job_to_dto(job: &AsyncJob) -> ResponseObject {
    ResponseObject::new("asyncjobs")
        .set("jobid", job.id.value())
        .set("cmd", job.cmd_name.clone())
        .set("accountid", job.account_id.value())
        .set("userid", job.user_id.value())
        .set("jobstatus", status_label(job.status))
        .set("jobprocstatus", job.process_status)
        .set("jobresultcode", job.result_code)
        .set_nullable("jobresult", job.result_payload.clone())
        .set_nullable("instancetype", job.instance.map(|i| i.kind.as_str()))
        .set_nullable("instanceid", job.instance.map(|i| i.id))
        .set("created", Value::from(job.created_at.to_rfc3339()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_core::{EntityKind, EntityRef, UserId};
    use cirrus_infra::{JobId, SubmitJob};

    #[test]
    fn dto_carries_the_job_projection() {
        let mut job = AsyncJob::submitted(
            JobId(42),
            SubmitJob::new("rebootVirtualMachine", AccountId::new(3), UserId::new(30))
                .with_instance(EntityRef::new(EntityKind::VirtualMachine, 9)),
        );
        job.status = JobStatus::InProgress;
        job.process_status = 40;

        let dto = job_to_dto(&job);
        assert_eq!(dto.fields["jobid"], 42);
        assert_eq!(dto.fields["cmd"], "rebootVirtualMachine");
        assert_eq!(dto.fields["jobstatus"], "in_progress");
        assert_eq!(dto.fields["instancetype"], "VirtualMachine");
        assert_eq!(dto.fields["instanceid"], 9);
        assert!(dto.fields["jobresult"].is_null());
    }

    #[test]
    fn binds_all_filters() {
        use crate::params::{bind, RawParams};

        let raw = RawParams::new()
            .with("domainid", "2")
            .with("startdate", "2024-05-01T00:00:00Z");
        let bound = bind(ListAsyncJobsCmd::descriptors(), &raw).unwrap();
        let cmd = ListAsyncJobsCmd::from_params(&bound).unwrap();

        assert_eq!(cmd.account_id, None);
        assert_eq!(cmd.domain_id, Some(2));
        assert!(cmd.start_date.is_some());
    }
}
