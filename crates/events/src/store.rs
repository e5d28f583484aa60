//! Audit event storage.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;

use cirrus_core::AccountId;

use crate::event::Event;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventStoreError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<EventStoreError> for cirrus_core::CommandError {
    fn from(value: EventStoreError) -> Self {
        cirrus_core::CommandError::Internal(value.to_string())
    }
}

/// Query criteria for event listings.
///
/// Pagination lives here, not in the response layer: whoever builds the
/// criteria decides the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub account_ids: Option<Vec<AccountId>>,
    pub event_type: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        if let Some(ids) = &self.account_ids {
            if !ids.contains(&event.account_id) {
                return false;
            }
        }
        if let Some(t) = &self.event_type {
            if &event.event_type != t {
                return false;
            }
        }
        if let Some(since) = self.since {
            if event.created_at < since {
                return false;
            }
        }
        true
    }

    fn window(&self, mut events: Vec<Event>) -> Vec<Event> {
        if let (Some(page), Some(size)) = (self.page, self.page_size) {
            let start = page.saturating_sub(1).saturating_mul(size);
            events = events.into_iter().skip(start).take(size).collect();
        }
        events
    }
}

/// Append-only event store. No update or delete surface exists.
pub trait EventStore: Send + Sync {
    fn append(&self, event: Event) -> Result<(), EventStoreError>;

    /// List matching events in append order.
    fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, EventStoreError>;
}

impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    fn append(&self, event: Event) -> Result<(), EventStoreError> {
        (**self).append(event)
    }

    fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, EventStoreError> {
        (**self).list(filter)
    }
}

/// In-memory event store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: Event) -> Result<(), EventStoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|e| EventStoreError::Storage(e.to_string()))?;
        events.push(event);
        Ok(())
    }

    fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, EventStoreError> {
        let events = self
            .events
            .read()
            .map_err(|e| EventStoreError::Storage(e.to_string()))?;
        let matching: Vec<Event> = events.iter().filter(|e| filter.matches(e)).cloned().collect();
        Ok(filter.window(matching))
    }
}
