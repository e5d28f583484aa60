//! Audit event recording.

use tracing::debug;

use cirrus_core::AccountId;

use crate::event::Event;
use crate::store::{EventStore, EventStoreError};

/// Appends one audit record per state-changing command.
///
/// The account passed in is the *already-resolved* owner (possibly SYSTEM),
/// so recording works identically for commands that later fail. The
/// description is computed lazily and degrades to a generic line when the
/// command cannot produce one; description production never fails a request.
#[derive(Debug)]
pub struct EventRecorder<S> {
    store: S,
}

impl<S: EventStore> EventRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn record(
        &self,
        account_id: AccountId,
        event_type: &str,
        describe: impl FnOnce() -> Option<String>,
    ) -> Result<(), EventStoreError> {
        let description =
            describe().unwrap_or_else(|| format!("{event_type} invoked"));
        debug!(%account_id, event_type, "recording audit event");
        self.store
            .append(Event::new(event_type, description, account_id))
    }
}
