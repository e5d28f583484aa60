//! Wire-ready response DTOs and the uniform positive-result rule.

use serde::Serialize;
use serde_json::{Map, Value};

use cirrus_core::{CommandError, CommandResult};

/// One element of a list response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseObject {
    #[serde(rename = "objectName", skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    pub fields: Map<String, Value>,
}

impl ResponseObject {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: Some(object_name.into()),
            fields: Map::new(),
        }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Set a field that may legitimately be absent; `None` serializes as an
    /// explicit null rather than dropping the field.
    pub fn set_nullable(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        let value = value.map(Into::into).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
        self
    }
}

/// A single-object command reply: `{responseName, objectName?, fields}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "responseName")]
    pub response_name: String,
    #[serde(rename = "objectName", skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    pub fields: Map<String, Value>,
}

impl ApiResponse {
    pub fn new(response_name: impl Into<String>) -> Self {
        Self {
            response_name: response_name.into(),
            object_name: None,
            fields: Map::new(),
        }
    }

    pub fn with_object_name(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = Some(object_name.into());
        self
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn set_nullable(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        let value = value.map(Into::into).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
        self
    }
}

/// A list command reply: `{responseName, responses: [...]}`.
///
/// Carries the elements in the order the query produced them. No pagination
/// happens here; the window belongs to the search criteria handed to the
/// query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    #[serde(rename = "responseName")]
    pub response_name: String,
    pub responses: Vec<ResponseObject>,
}

impl ListResponse {
    pub fn new(response_name: impl Into<String>, responses: Vec<ResponseObject>) -> Self {
        Self {
            response_name: response_name.into(),
            responses,
        }
    }
}

/// What a command hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiOutput {
    Object(ApiResponse),
    List(ListResponse),
}

impl ApiOutput {
    /// Attach the submitted job id to an object reply (no-op for lists).
    pub fn with_job_id(mut self, job_id: u64) -> Self {
        if let ApiOutput::Object(response) = &mut self {
            response
                .fields
                .insert("jobid".to_string(), Value::from(job_id));
        }
        self
    }
}

/// Uniform positive-result rule: a manager returning no value where the
/// command's contract requires one is an internal error, never an empty
/// success.
pub fn required<T>(value: Option<T>, msg: &str) -> CommandResult<T> {
    value.ok_or_else(|| CommandError::internal(msg))
}

/// Boolean flavor of [`required`]: `false` means the manager failed without
/// an error of its own.
pub fn required_success(ok: bool, msg: &str) -> CommandResult<()> {
    if ok {
        Ok(())
    } else {
        Err(CommandError::internal(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_manager_result_is_an_internal_error() {
        let missing: Option<i64> = None;
        let err = required(missing, "failed to create snapshot").unwrap_err();
        assert_eq!(err, CommandError::internal("failed to create snapshot"));

        assert!(required(Some(5), "unused").is_ok());
    }

    #[test]
    fn false_manager_result_is_an_internal_error() {
        assert!(required_success(true, "unused").is_ok());
        let err = required_success(false, "failed to delete host").unwrap_err();
        assert_eq!(err, CommandError::internal("failed to delete host"));
    }

    #[test]
    fn single_object_wire_shape() {
        let response = ApiResponse::new("addconfigresponse")
            .with_object_name("configuration")
            .set("name", "some.key")
            .set_nullable("value", None::<String>);

        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["responseName"], "addconfigresponse");
        assert_eq!(wire["objectName"], "configuration");
        assert_eq!(wire["fields"]["name"], "some.key");
        assert!(wire["fields"]["value"].is_null());
    }

    #[test]
    fn list_wire_shape_preserves_order() {
        let list = ListResponse::new(
            "listeventsresponse",
            vec![
                ResponseObject::new("event").set("id", 1),
                ResponseObject::new("event").set("id", 2),
            ],
        );

        let wire = serde_json::to_value(&list).unwrap();
        assert_eq!(wire["responseName"], "listeventsresponse");
        assert_eq!(wire["responses"][0]["fields"]["id"], 1);
        assert_eq!(wire["responses"][1]["fields"]["id"], 2);
    }

    #[test]
    fn job_id_attaches_to_object_replies_only() {
        let object = ApiOutput::Object(ApiResponse::new("createsnapshotresponse")).with_job_id(7);
        match object {
            ApiOutput::Object(r) => assert_eq!(r.fields["jobid"], 7),
            ApiOutput::List(_) => unreachable!(),
        }
    }
}
