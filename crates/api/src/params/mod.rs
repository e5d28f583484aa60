//! Parameter binding: flat string-keyed requests into typed values.

pub mod binder;
pub mod descriptor;
pub mod value;

pub use binder::{bind, BindError, BoundParams, RawParams};
pub use descriptor::{ElementKind, ParamKind, ParameterDescriptor};
pub use value::ParamValue;

/// Pagination criteria for list-capable commands.
///
/// Attached by composition: list commands embed this struct and splice
/// [`ListParams::PAGE`] / [`ListParams::PAGE_SIZE`] into their descriptor
/// tables. The window is applied by the search criteria handed to whoever
/// executes the query, never by the response layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListParams {
    pub const PAGE: ParameterDescriptor = ParameterDescriptor::optional("page", ParamKind::Long);
    pub const PAGE_SIZE: ParameterDescriptor =
        ParameterDescriptor::optional("pagesize", ParamKind::Long);

    pub fn from_params(params: &BoundParams) -> Result<Self, BindError> {
        let page = params.get_long("page")?.map(|v| v.max(0) as usize);
        let page_size = params.get_long("pagesize")?.map(|v| v.max(0) as usize);
        Ok(Self { page, page_size })
    }
}
