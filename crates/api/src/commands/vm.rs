//! Virtual machine commands.

use cirrus_core::{CommandResult, EntityKind, EntityRef};

use crate::command::{ApiCommand, AsyncSpec, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParamKind, ParameterDescriptor};
use crate::response::{required, ApiOutput, ApiResponse};

const DESCRIPTORS: &[ParameterDescriptor] =
    &[ParameterDescriptor::required("id", ParamKind::Long)];

/// Reboot a guest. Async-capable; the reboot itself runs under the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebootVmCmd {
    pub id: i64,
}

impl RebootVmCmd {
    fn vm_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::VirtualMachine, self.id)
    }
}

impl ApiCommand for RebootVmCmd {
    const NAME: &'static str = "rebootVirtualMachine";
    const RESPONSE_NAME: &'static str = "rebootvirtualmachineresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            id: params.require_long("id")?,
        })
    }

    fn subject(&self) -> Option<EntityRef> {
        Some(self.vm_ref())
    }

    fn event_type(&self) -> Option<&'static str> {
        Some("VM.REBOOT")
    }

    fn event_description(&self) -> Option<String> {
        Some(format!("rebooting virtual machine {}", self.id))
    }

    fn async_spec(&self) -> Option<AsyncSpec> {
        Some(AsyncSpec {
            instance: Some(self.vm_ref()),
        })
    }

    fn execute(&self, managers: &Managers, ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        let vm = required(
            managers.vms.reboot(self, ctx.job_id)?,
            "failed to reboot virtual machine",
        )?;

        Ok(ApiOutput::Object(
            ApiResponse::new(Self::RESPONSE_NAME)
                .with_object_name("virtualmachine")
                .set("id", vm.id)
                .set("name", vm.name)
                .set("state", vm.state),
        ))
    }
}
