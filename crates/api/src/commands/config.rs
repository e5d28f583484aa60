//! Configuration commands.

use cirrus_core::CommandResult;

use crate::command::{ApiCommand, CallContext};
use crate::manager::Managers;
use crate::params::{BindError, BoundParams, ParamKind, ParameterDescriptor};
use crate::response::{required, ApiOutput, ApiResponse};

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::required("category", ParamKind::String),
    ParameterDescriptor::required("component", ParamKind::String),
    ParameterDescriptor::required("instance", ParamKind::String),
    ParameterDescriptor::required("name", ParamKind::String),
    ParameterDescriptor::optional("value", ParamKind::String),
];

/// Add one configuration entry. Synchronous; admin surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddConfigCmd {
    pub category: String,
    pub component: String,
    pub instance: String,
    pub name: String,
    pub value: Option<String>,
}

impl ApiCommand for AddConfigCmd {
    const NAME: &'static str = "addConfig";
    const RESPONSE_NAME: &'static str = "addconfigresponse";

    fn descriptors() -> &'static [ParameterDescriptor] {
        DESCRIPTORS
    }

    fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        Ok(Self {
            category: params.require_str("category")?.to_string(),
            component: params.require_str("component")?.to_string(),
            instance: params.require_str("instance")?.to_string(),
            name: params.require_str("name")?.to_string(),
            value: params.get_str("value")?.map(str::to_string),
        })
    }

    fn execute(&self, managers: &Managers, _ctx: &CallContext<'_>) -> CommandResult<ApiOutput> {
        let item = required(
            managers.config.add_config(self)?,
            "failed to add configuration entry",
        )?;

        Ok(ApiOutput::Object(
            ApiResponse::new(Self::RESPONSE_NAME)
                .with_object_name("configuration")
                .set("category", item.category)
                .set("component", item.component)
                .set("instance", item.instance)
                .set("name", item.name)
                .set_nullable("value", item.value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{bind, RawParams};

    #[test]
    fn binds_without_optional_value() {
        let raw = RawParams::new()
            .with("category", "Advanced")
            .with("component", "management-server")
            .with("instance", "DEFAULT")
            .with("name", "some.key");

        let bound = bind(AddConfigCmd::descriptors(), &raw).unwrap();
        let cmd = AddConfigCmd::from_params(&bound).unwrap();

        assert_eq!(cmd.name, "some.key");
        assert_eq!(cmd.value, None);
    }

    #[test]
    fn missing_category_aborts_binding() {
        let raw = RawParams::new().with("name", "some.key");
        let err = bind(AddConfigCmd::descriptors(), &raw).unwrap_err();
        assert_eq!(err, BindError::MissingParameter("category".to_string()));
    }
}
