//! The generic binder: one pass over a command's descriptor table.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use cirrus_core::CommandError;

use super::descriptor::{ElementKind, ParamKind, ParameterDescriptor};
use super::value::ParamValue;

pub const LIST_DELIMITER: char = ',';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("missing required parameter {0}")]
    MissingParameter(String),

    #[error("invalid value for parameter {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

impl BindError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<BindError> for CommandError {
    fn from(value: BindError) -> Self {
        CommandError::Param(value.to_string())
    }
}

/// The inbound request: a flat, repeatable string-keyed parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    values: BTreeMap<String, Vec<String>>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// First value for a single-valued parameter.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Result of binding: parameter name to coerced value. Optional parameters
/// that were absent simply have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: BTreeMap<String, ParamValue>,
}

impl BoundParams {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Result<Option<&str>, BindError> {
        self.typed(name, ParamValue::as_str)
    }

    pub fn get_long(&self, name: &str) -> Result<Option<i64>, BindError> {
        self.typed(name, ParamValue::as_long)
    }

    pub fn get_integer(&self, name: &str) -> Result<Option<i32>, BindError> {
        self.typed(name, ParamValue::as_integer)
    }

    pub fn get_boolean(&self, name: &str) -> Result<Option<bool>, BindError> {
        self.typed(name, ParamValue::as_boolean)
    }

    pub fn get_date(&self, name: &str) -> Result<Option<DateTime<Utc>>, BindError> {
        self.typed(name, ParamValue::as_date)
    }

    pub fn get_list(&self, name: &str) -> Result<Option<&[ParamValue]>, BindError> {
        self.typed(name, ParamValue::as_list)
    }

    pub fn get_map(&self, name: &str) -> Result<Option<&[BTreeMap<String, String>]>, BindError> {
        self.typed(name, ParamValue::as_map)
    }

    pub fn require_str(&self, name: &str) -> Result<&str, BindError> {
        self.get_str(name)?
            .ok_or_else(|| BindError::MissingParameter(name.to_string()))
    }

    pub fn require_long(&self, name: &str) -> Result<i64, BindError> {
        self.get_long(name)?
            .ok_or_else(|| BindError::MissingParameter(name.to_string()))
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        accessor: impl Fn(&'a ParamValue) -> Option<T>,
    ) -> Result<Option<T>, BindError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => accessor(value)
                .map(Some)
                .ok_or_else(|| BindError::invalid(name, "unexpected parameter kind")),
        }
    }
}

/// Bind a raw request against a command's descriptor table.
///
/// Each descriptor resolves independently; the first missing required
/// parameter (in table order) aborts. Binding performs no I/O and is
/// deterministic: the same raw map always yields the same `BoundParams`.
pub fn bind(
    descriptors: &[ParameterDescriptor],
    raw: &RawParams,
) -> Result<BoundParams, BindError> {
    let mut bound = BoundParams::default();

    for desc in descriptors {
        let value = match desc.kind {
            ParamKind::Map => {
                let groups = collect_map_groups(desc.name, raw)?;
                if groups.is_empty() {
                    None
                } else {
                    Some(ParamValue::Map(groups))
                }
            }
            ParamKind::List(elem) => raw
                .first(desc.name)
                .map(|v| coerce_list(desc.name, elem, v))
                .transpose()?,
            _ => raw
                .first(desc.name)
                .map(|v| coerce_scalar(desc.name, desc.kind, v))
                .transpose()?,
        };

        match value {
            Some(value) => {
                bound.values.insert(desc.name.to_string(), value);
            }
            None if desc.required => {
                return Err(BindError::MissingParameter(desc.name.to_string()));
            }
            None => {}
        }
    }

    Ok(bound)
}

fn coerce_scalar(name: &str, kind: ParamKind, raw: &str) -> Result<ParamValue, BindError> {
    let elem = match kind {
        ParamKind::String => ElementKind::String,
        ParamKind::Long => ElementKind::Long,
        ParamKind::Integer => ElementKind::Integer,
        ParamKind::Boolean => ElementKind::Boolean,
        ParamKind::Date => ElementKind::Date,
        ParamKind::TzDate => ElementKind::TzDate,
        ParamKind::List(_) | ParamKind::Map => {
            return Err(BindError::invalid(name, "unexpected parameter kind"));
        }
    };
    coerce_element(name, elem, raw)
}

fn coerce_element(name: &str, kind: ElementKind, raw: &str) -> Result<ParamValue, BindError> {
    match kind {
        ElementKind::String => Ok(ParamValue::String(raw.to_string())),
        ElementKind::Long => raw
            .parse::<i64>()
            .map(ParamValue::Long)
            .map_err(|e| BindError::invalid(name, e.to_string())),
        ElementKind::Integer => raw
            .parse::<i32>()
            .map(ParamValue::Integer)
            .map_err(|e| BindError::invalid(name, e.to_string())),
        ElementKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(ParamValue::Boolean(true)),
            "false" => Ok(ParamValue::Boolean(false)),
            other => Err(BindError::invalid(name, format!("not a boolean: {other}"))),
        },
        ElementKind::Date => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| BindError::invalid(name, e.to_string()))?;
            Ok(ParamValue::Date(date.and_time(NaiveTime::MIN).and_utc()))
        }
        ElementKind::TzDate => DateTime::parse_from_rfc3339(raw)
            .map(|dt| ParamValue::Date(dt.with_timezone(&Utc)))
            .map_err(|e| BindError::invalid(name, e.to_string())),
    }
}

fn coerce_list(name: &str, elem: ElementKind, raw: &str) -> Result<ParamValue, BindError> {
    // Empty raw value means an empty sequence, not a failure.
    if raw.is_empty() {
        return Ok(ParamValue::List(Vec::new()));
    }
    let items = raw
        .split(LIST_DELIMITER)
        .map(|piece| coerce_element(name, elem, piece))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParamValue::List(items))
}

/// Collect `name[i].subkey=value` entries, grouped by index, index-ordered.
fn collect_map_groups(
    name: &str,
    raw: &RawParams,
) -> Result<Vec<BTreeMap<String, String>>, BindError> {
    let mut groups: BTreeMap<usize, BTreeMap<String, String>> = BTreeMap::new();

    for key in raw.keys() {
        let Some(rest) = key.strip_prefix(name) else {
            continue;
        };
        let Some(rest) = rest.strip_prefix('[') else {
            continue;
        };
        let Some((index, subkey)) = rest.split_once("].") else {
            return Err(BindError::invalid(name, format!("malformed map key {key}")));
        };
        if subkey.is_empty() {
            return Err(BindError::invalid(name, format!("malformed map key {key}")));
        }
        let index: usize = index
            .parse()
            .map_err(|_| BindError::invalid(name, format!("bad map index in {key}")))?;

        if let Some(value) = raw.first(key) {
            groups
                .entry(index)
                .or_default()
                .insert(subkey.to_string(), value.to_string());
        }
    }

    Ok(groups.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SNAPSHOT_DESCRIPTORS: &[ParameterDescriptor] = &[
        ParameterDescriptor::required("volumeid", ParamKind::Long),
        ParameterDescriptor::optional("name", ParamKind::String),
    ];

    #[test]
    fn binds_required_and_optional_scalars() {
        let raw = RawParams::new().with("volumeid", "10").with("name", "daily");
        let bound = bind(SNAPSHOT_DESCRIPTORS, &raw).unwrap();

        assert_eq!(bound.require_long("volumeid").unwrap(), 10);
        assert_eq!(bound.get_str("name").unwrap(), Some("daily"));
    }

    #[test]
    fn first_missing_required_parameter_is_named() {
        const DESCRIPTORS: &[ParameterDescriptor] = &[
            ParameterDescriptor::required("category", ParamKind::String),
            ParameterDescriptor::required("component", ParamKind::String),
        ];

        let raw = RawParams::new();
        let err = bind(DESCRIPTORS, &raw).unwrap_err();
        assert_eq!(err, BindError::MissingParameter("category".to_string()));
    }

    #[test]
    fn invalid_long_names_the_offending_field() {
        let raw = RawParams::new().with("volumeid", "ten");
        let err = bind(SNAPSHOT_DESCRIPTORS, &raw).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { ref name, .. } if name == "volumeid"));
    }

    #[test]
    fn integer_overflow_is_a_named_failure() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("cpunumber", ParamKind::Integer)];

        let bound = bind(DESCRIPTORS, &RawParams::new().with("cpunumber", "8")).unwrap();
        assert_eq!(bound.get_integer("cpunumber").unwrap(), Some(8));

        let err = bind(DESCRIPTORS, &RawParams::new().with("cpunumber", "4294967296")).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { ref name, .. } if name == "cpunumber"));
    }

    #[test]
    fn boolean_is_strict() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("forced", ParamKind::Boolean)];

        let bound = bind(DESCRIPTORS, &RawParams::new().with("forced", "TRUE")).unwrap();
        assert_eq!(bound.get_boolean("forced").unwrap(), Some(true));

        assert!(bind(DESCRIPTORS, &RawParams::new().with("forced", "yes")).is_err());
    }

    #[test]
    fn date_and_tzdate_coerce_to_utc() {
        const DESCRIPTORS: &[ParameterDescriptor] = &[
            ParameterDescriptor::optional("startdate", ParamKind::Date),
            ParameterDescriptor::optional("since", ParamKind::TzDate),
        ];

        let raw = RawParams::new()
            .with("startdate", "2024-03-01")
            .with("since", "2024-03-01T10:30:00+02:00");
        let bound = bind(DESCRIPTORS, &raw).unwrap();

        let start = bound.get_date("startdate").unwrap().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let since = bound.get_date("since").unwrap().unwrap();
        assert_eq!(since.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn empty_list_binds_to_empty_sequence() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("ids", ParamKind::List(ElementKind::Long))];

        let bound = bind(DESCRIPTORS, &RawParams::new().with("ids", "")).unwrap();
        assert_eq!(bound.get_list("ids").unwrap().unwrap().len(), 0);
    }

    #[test]
    fn list_elements_coerce_to_element_kind() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("ids", ParamKind::List(ElementKind::Long))];

        let bound = bind(DESCRIPTORS, &RawParams::new().with("ids", "3,1,2")).unwrap();
        let ids: Vec<i64> = bound
            .get_list("ids")
            .unwrap()
            .unwrap()
            .iter()
            .filter_map(ParamValue::as_long)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);

        assert!(bind(DESCRIPTORS, &RawParams::new().with("ids", "3,x")).is_err());
    }

    #[test]
    fn map_groups_by_index_in_order() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("details", ParamKind::Map)];

        let raw = RawParams::new()
            .with("details[1].key", "b")
            .with("details[0].key", "a")
            .with("details[0].value", "first");
        let bound = bind(DESCRIPTORS, &raw).unwrap();

        let groups = bound.get_map("details").unwrap().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].get("key").map(String::as_str), Some("a"));
        assert_eq!(groups[0].get("value").map(String::as_str), Some("first"));
        assert_eq!(groups[1].get("key").map(String::as_str), Some("b"));
    }

    #[test]
    fn absent_map_with_required_descriptor_is_missing() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::required("details", ParamKind::Map)];

        let err = bind(DESCRIPTORS, &RawParams::new()).unwrap_err();
        assert_eq!(err, BindError::MissingParameter("details".to_string()));
    }

    #[test]
    fn malformed_map_key_is_rejected() {
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::optional("details", ParamKind::Map)];

        let raw = RawParams::new().with("details[zero].key", "a");
        assert!(bind(DESCRIPTORS, &raw).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Binding is deterministic: the same raw map always produces the
        /// same bound values.
        #[test]
        fn binding_is_idempotent(values in prop::collection::vec(any::<i64>(), 0..8)) {
            const DESCRIPTORS: &[ParameterDescriptor] =
                &[ParameterDescriptor::optional("ids", ParamKind::List(ElementKind::Long))];

            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let raw = RawParams::new().with("ids", joined);

            let once = bind(DESCRIPTORS, &raw).unwrap();
            let twice = bind(DESCRIPTORS, &raw).unwrap();
            prop_assert_eq!(&once, &twice);

            let bound: Vec<i64> = once
                .get_list("ids")
                .unwrap()
                .unwrap_or_default()
                .iter()
                .filter_map(ParamValue::as_long)
                .collect();
            prop_assert_eq!(bound, values);
        }

        /// Unrelated parameters never satisfy a required descriptor.
        #[test]
        fn required_detection_ignores_other_keys(keys in prop::collection::vec("[a-z]{1,10}", 0..6)) {
            const DESCRIPTORS: &[ParameterDescriptor] =
                &[ParameterDescriptor::required("volumeid", ParamKind::Long)];

            let mut raw = RawParams::new();
            for key in keys {
                if key != "volumeid" {
                    raw.append(key, "1");
                }
            }

            let err = bind(DESCRIPTORS, &raw).unwrap_err();
            prop_assert_eq!(err, BindError::MissingParameter("volumeid".to_string()));
        }
    }
}
