//! Accounts: tenant-scoped principals.

use serde::{Deserialize, Serialize};

use crate::id::{AccountId, DomainId};

/// Reserved identifier of the SYSTEM account.
pub const SYSTEM_ACCOUNT_ID: AccountId = AccountId::new(1);

/// Account classification driving authorization rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Regular tenant user; may act only on entities its own account owns.
    User,
    /// Administrator of a domain subtree.
    DomainAdmin,
    /// Global administrator.
    Admin,
    /// Internal sentinel principal; never a real tenant.
    System,
}

impl AccountKind {
    /// Admin and System bypass ownership checks entirely.
    pub fn is_privileged(self) -> bool {
        matches!(self, AccountKind::Admin | AccountKind::System)
    }
}

/// A tenant-scoped principal.
///
/// The SYSTEM account is a sentinel: it is substituted whenever entity
/// ownership cannot be resolved, so that audit records always carry *some*
/// account. It must never be treated as a real tenant for quota or billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
    pub domain_id: DomainId,
    /// Display name; empty when unknown.
    pub name: String,
}

impl Account {
    pub fn new(id: AccountId, kind: AccountKind, domain_id: DomainId) -> Self {
        Self {
            id,
            kind,
            domain_id,
            name: String::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The SYSTEM sentinel account, rooted at the top-level domain.
    pub fn system() -> Self {
        Self {
            id: SYSTEM_ACCOUNT_ID,
            kind: AccountKind::System,
            domain_id: crate::domain::ROOT_DOMAIN_ID,
            name: "system".to_string(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.kind == AccountKind::System
    }
}
