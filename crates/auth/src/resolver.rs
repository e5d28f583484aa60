//! Owner resolution and account/domain visibility rules.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use cirrus_core::{Account, AccountKind, DomainId, EntityRef};

use crate::caller::Caller;
use crate::directory::{AccountDirectory, DomainDirectory, EntityDirectory};

/// Upper bound on ancestor hops when walking the domain tree. A walk that
/// exceeds it means a corrupt tree (cycle or broken levels) and denies.
const MAX_DOMAIN_DEPTH: u32 = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("account {caller} cannot access resources owned by account {owner}")]
    NotOwner {
        caller: cirrus_core::AccountId,
        owner: cirrus_core::AccountId,
    },

    #[error("account {caller} cannot access resources in domain {domain}")]
    DomainNotVisible {
        caller: cirrus_core::AccountId,
        domain: DomainId,
    },
}

impl From<AuthzError> for cirrus_core::CommandError {
    fn from(value: AuthzError) -> Self {
        cirrus_core::CommandError::PermissionDenied(value.to_string())
    }
}

/// Resolves the owning account for a command's target entity and enforces
/// account/domain visibility.
///
/// Runs strictly before any state-changing manager call; no manager call is
/// reachable without a resolved owner.
pub struct AuthorizationResolver {
    accounts: Arc<dyn AccountDirectory>,
    domains: Arc<dyn DomainDirectory>,
    entities: Arc<dyn EntityDirectory>,
}

impl AuthorizationResolver {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        domains: Arc<dyn DomainDirectory>,
        entities: Arc<dyn EntityDirectory>,
    ) -> Self {
        Self {
            accounts,
            domains,
            entities,
        }
    }

    /// Resolve the account that owns a command's subject.
    ///
    /// Commands without an entity subject act on the caller's own account.
    /// For entity-scoped commands, a lookup miss at either step (entity or
    /// its account) resolves to the SYSTEM account so the audit trail stays
    /// attributable even when the command later fails on the missing entity.
    pub fn resolve_owner(&self, caller: &Caller, subject: Option<EntityRef>) -> Account {
        let Some(entity) = subject else {
            return caller.account.clone();
        };

        let Some(owner_id) = self.entities.find_owner(entity) else {
            warn!(%entity, "entity not found, attributing to SYSTEM");
            return Account::system();
        };

        match self.accounts.find_account(owner_id) {
            Some(account) => account,
            None => {
                warn!(%entity, %owner_id, "owner account not found, attributing to SYSTEM");
                Account::system()
            }
        }
    }

    /// Enforce that `caller` may act on resources owned by `owner`.
    pub fn check_access(&self, caller: &Caller, owner: &Account) -> Result<(), AuthzError> {
        match caller.account.kind {
            AccountKind::Admin | AccountKind::System => Ok(()),
            AccountKind::User => {
                if caller.account.id == owner.id {
                    Ok(())
                } else {
                    Err(AuthzError::NotOwner {
                        caller: caller.account.id,
                        owner: owner.id,
                    })
                }
            }
            AccountKind::DomainAdmin => {
                if self.is_same_or_descendant(owner.domain_id, caller.account.domain_id) {
                    Ok(())
                } else {
                    Err(AuthzError::DomainNotVisible {
                        caller: caller.account.id,
                        domain: owner.domain_id,
                    })
                }
            }
        }
    }

    /// True if `candidate` equals `ancestor` or lies in its subtree.
    ///
    /// Walks parent links from `candidate` toward the root.
    pub fn is_same_or_descendant(&self, candidate: DomainId, ancestor: DomainId) -> bool {
        let mut current = Some(candidate);
        let mut hops = 0;

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if hops >= MAX_DOMAIN_DEPTH {
                warn!(%candidate, %ancestor, "domain walk exceeded max depth, denying");
                return false;
            }
            hops += 1;
            current = self.domains.find_domain(id).and_then(|d| d.parent_id);
        }

        false
    }
}
