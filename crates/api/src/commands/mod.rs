//! Concrete API commands.
//!
//! Thin per-command glue over the framework: a descriptor table, a typed
//! struct, capability hooks, and the single manager call.

pub mod config;
pub mod events;
pub mod host;
pub mod jobs;
pub mod snapshot;
pub mod vm;

pub use config::AddConfigCmd;
pub use events::ListEventsCmd;
pub use host::DeleteHostCmd;
pub use jobs::ListAsyncJobsCmd;
pub use snapshot::CreateSnapshotCmd;
pub use vm::RebootVmCmd;
