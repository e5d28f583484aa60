//! Snapshot commands.

use cirrus_core::{CommandResult, EntityKind, EntityRef};

use crate::command::{ApiCommand, AsyncSpec, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParamKind, ParameterDescriptor};
use crate::response::{required, ApiOutput, ApiResponse};

const DESCRIPTORS: &[ParameterDescriptor] =
    &[ParameterDescriptor::required("volumeid", ParamKind::Long)];

/// Snapshot a volume. Async-capable create: the entry is made synchronously,
/// the copy runs under the submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateSnapshotCmd {
    pub volume_id: i64,
}

impl ApiCommand for CreateSnapshotCmd {
    const NAME: &'static str = "createSnapshot";
    const RESPONSE_NAME: &'static str = "createsnapshotresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            volume_id: params.require_long("volumeid")?,
        })
    }

    fn subject(&self) -> Option<EntityRef> {
        Some(EntityRef::new(EntityKind::Volume, self.volume_id))
    }

    fn event_type(&self) -> Option<&'static str> {
        Some("SNAPSHOT.CREATE")
    }

    fn event_description(&self) -> Option<String> {
        Some(format!("creating snapshot for volume {}", self.volume_id))
    }

    fn async_spec(&self) -> Option<AsyncSpec> {
        // The snapshot does not exist yet; the manager links the job to it
        // once created.
        Some(AsyncSpec::default())
    }

    fn execute(&self, managers: &Managers, ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        let snapshot = required(
            managers.snapshots.create_snapshot(self, ctx.job_id)?,
            "failed to create snapshot",
        )?;

        Ok(ApiOutput::Object(
            ApiResponse::new(Self::RESPONSE_NAME)
                .with_object_name("snapshot")
                .set("id", snapshot.id)
                .set("volumeid", snapshot.volume_id)
                .set("name", snapshot.name)
                .set("state", snapshot.state)
                .set("created", snapshot.created.to_rfc3339()),
        ))
    }
}
