//! Typed parameter values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Long(i64),
    Integer(i32),
    Boolean(bool),
    Date(DateTime<Utc>),
    List(Vec<ParamValue>),
    /// Index-ordered sequence of sub-key/value groups.
    Map(Vec<BTreeMap<String, String>>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            ParamValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            ParamValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[BTreeMap<String, String>]> {
        match self {
            ParamValue::Map(v) => Some(v),
            _ => None,
        }
    }
}
