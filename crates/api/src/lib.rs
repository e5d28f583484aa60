//! `cirrus-api` — the API-command layer.
//!
//! Everything a command needs between the wire and its manager: parameter
//! binding against static descriptor tables, owner/visibility resolution,
//! async job submission, audit recording, and response assembly. Resource
//! logic itself lives behind the manager traits and is external.

pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod manager;
pub mod params;
pub mod response;

pub use command::{ApiCommand, AsyncSpec, CallContext};
pub use dispatcher::CommandDispatcher;
pub use manager::{
    ConfigItem, ConfigManager, HostManager, ManagerError, Managers, Snapshot, SnapshotManager,
    VirtualMachine, VmManager,
};
pub use params::{
    bind, BindError, BoundParams, ElementKind, ListParams, ParamKind, ParamValue,
    ParameterDescriptor, RawParams,
};
pub use response::{required, required_success, ApiOutput, ApiResponse, ListResponse, ResponseObject};
