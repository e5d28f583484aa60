//! Audit trail queries.

use chrono::{DateTime, Utc};

use cirrus_core::{AccountId, CommandResult};
use cirrus_events::EventFilter;

use crate::command::{ApiCommand, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ListParams, ParamKind, ParameterDescriptor};
use crate::response::{ApiOutput, ListResponse, ResponseObject};

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::optional("accountid", ParamKind::Long),
    ParameterDescriptor::optional("type", ParamKind::String),
    ParameterDescriptor::optional("startdate", ParamKind::TzDate),
    ListParams::PAGE,
    ListParams::PAGE_SIZE,
];

/// List audit events. Non-privileged callers are pinned to their own
/// account's trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEventsCmd {
    pub account_id: Option<i64>,
    pub event_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub list: ListParams,
}

impl ApiCommand for ListEventsCmd {
    const NAME: &'static str = "listEvents";
    const RESPONSE_NAME: &'static str = "listeventsresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            account_id: params.get_long("accountid")?,
            event_type: params.get_str("type")?.map(str::to_string),
            start_date: params.get_date("startdate")?,
            list: ListParams::from_params(params)?,
        })
    }

    fn execute(&self, _managers: &Managers, ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        let account_ids = if ctx.caller.is_privileged() {
            self.account_id.map(|id| vec![AccountId::new(id)])
        } else {
            Some(vec![ctx.caller.account.id])
        };

        let filter = EventFilter {
            account_ids,
            event_type: self.event_type.clone(),
            since: self.start_date,
            page: self.list.page,
            page_size: self.list.page_size,
        };
        let events = ctx.events.list(&filter)?;

        let elements = events
            .iter()
            .map(|event| {
                // Display lookups are best-effort: a miss leaves the name
                // empty rather than failing the listing.
                let account = ctx.accounts.find_account(event.account_id);
                let account_name = account
                    .as_ref()
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                let domain_id = account.as_ref().map(|a| a.domain_id.value());

                ResponseObject::new("event")
                    .set("id", event.event_id.to_string())
                    .set("type", event.event_type.clone())
                    .set("description", event.description.clone())
                    .set("accountid", event.account_id.value())
                    .set("account", account_name)
                    .set_nullable("domainid", domain_id)
                    .set("created", event.created_at.to_rfc3339())
            })
            .collect();

        Ok(ApiOutput::List(ListResponse::new(Self::RESPONSE_NAME, elements)))
    }
}
