//! Lookup seams into the control plane's read model.
//!
//! The resolver only ever needs three narrow queries; keeping them as
//! separate traits lets tests and deployments mix backing stores freely.

use cirrus_core::{Account, AccountId, Domain, DomainId, EntityRef};

/// Account lookup by id.
pub trait AccountDirectory: Send + Sync {
    fn find_account(&self, id: AccountId) -> Option<Account>;
}

/// Domain lookup by id.
pub trait DomainDirectory: Send + Sync {
    fn find_domain(&self, id: DomainId) -> Option<Domain>;
}

/// Owning-account lookup for a managed entity.
pub trait EntityDirectory: Send + Sync {
    fn find_owner(&self, entity: EntityRef) -> Option<AccountId>;
}
