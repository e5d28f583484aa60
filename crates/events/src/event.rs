//! The audit event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cirrus_core::AccountId;

/// One append-only audit record.
///
/// Events are facts: never mutated or deleted by this layer. Every
/// state-changing command appends exactly one, success or failure, so the
/// trail stays attributable (SYSTEM-owned when ownership could not be
/// resolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: Uuid,
    /// Taxonomy string, e.g. `SNAPSHOT.CREATE`.
    pub event_type: String,
    pub description: String,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        event_type: impl Into<String>,
        description: impl Into<String>,
        account_id: AccountId,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event_type: event_type.into(),
            description: description.into(),
            account_id,
            created_at: Utc::now(),
        }
    }
}
