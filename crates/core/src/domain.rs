//! Domains: the tenancy hierarchy tree.

use serde::{Deserialize, Serialize};

use crate::id::DomainId;

/// Reserved identifier of the root domain.
pub const ROOT_DOMAIN_ID: DomainId = DomainId::new(1);

/// A node in the domain tree.
///
/// Invariant: the root domain (and only the root) has `parent_id = None` and
/// `level = 0`; every child's `level` is its parent's plus one. Nested-admin
/// authorization walks `parent_id` links from a candidate domain toward the
/// root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub parent_id: Option<DomainId>,
    pub level: u32,
}

impl Domain {
    pub fn new(id: DomainId, parent_id: Option<DomainId>, level: u32) -> Self {
        Self {
            id,
            parent_id,
            level,
        }
    }

    pub fn root() -> Self {
        Self {
            id: ROOT_DOMAIN_ID,
            parent_id: None,
            level: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
