//! Host commands.

use cirrus_core::{CommandResult, EntityKind, EntityRef};

use crate::command::{ApiCommand, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParamKind, ParameterDescriptor};
use crate::response::{required_success, ApiOutput, ApiResponse};

const DESCRIPTORS: &[ParameterDescriptor] =
    &[ParameterDescriptor::required("id", ParamKind::Long)];

/// Remove a host from the resource pool. Synchronous; admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteHostCmd {
    pub id: i64,
}

impl ApiCommand for DeleteHostCmd {
    const NAME: &'static str = "deleteHost";
    const RESPONSE_NAME: &'static str = "deletehostresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            id: params.require_long("id")?,
        })
    }

    fn subject(&self) -> Option<EntityRef> {
        Some(EntityRef::new(EntityKind::Host, self.id))
    }

    fn event_type(&self) -> Option<&'static str> {
        Some("HOST.DELETE")
    }

    fn event_description(&self) -> Option<String> {
        Some(format!("deleting host {}", self.id))
    }

    fn execute(&self, managers: &Managers, _ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        let deleted = managers.hosts.delete_host(self)?;
        required_success(deleted, "failed to delete host")?;

        Ok(ApiOutput::Object(
            ApiResponse::new(Self::RESPONSE_NAME).set("success", true),
        ))
    }
}
