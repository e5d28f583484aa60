//! `cirrus-events` — append-only audit trail.

pub mod event;
pub mod recorder;
pub mod store;

pub use event::Event;
pub use recorder::EventRecorder;
pub use store::{EventFilter, EventStore, EventStoreError, InMemoryEventStore};
