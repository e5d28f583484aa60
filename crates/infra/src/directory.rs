//! In-memory directory read model.
//!
//! Backs the `cirrus-auth` lookup traits for tests and single-node
//! deployments; a database-backed read model would implement the same
//! traits.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use cirrus_auth::{AccountDirectory, DomainDirectory, EntityDirectory};
use cirrus_core::{Account, AccountId, Domain, DomainId, EntityRef};

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: RwLock<HashMap<AccountId, Account>>,
    domains: RwLock<HashMap<DomainId, Domain>>,
    owners: RwLock<HashMap<EntityRef, AccountId>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty directory seeded with the root domain and SYSTEM account.
    pub fn seeded() -> Self {
        let dir = Self::new();
        dir.put_domain(Domain::root());
        dir.put_account(Account::system());
        dir
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::seeded())
    }

    pub fn put_account(&self, account: Account) {
        self.accounts
            .write()
            .expect("directory lock poisoned")
            .insert(account.id, account);
    }

    pub fn put_domain(&self, domain: Domain) {
        self.domains
            .write()
            .expect("directory lock poisoned")
            .insert(domain.id, domain);
    }

    pub fn put_owner(&self, entity: EntityRef, owner: AccountId) {
        self.owners
            .write()
            .expect("directory lock poisoned")
            .insert(entity, owner);
    }

    pub fn remove_entity(&self, entity: EntityRef) {
        self.owners
            .write()
            .expect("directory lock poisoned")
            .remove(&entity);
    }
}

impl AccountDirectory for InMemoryDirectory {
    fn find_account(&self, id: AccountId) -> Option<Account> {
        self.accounts
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
    }
}

impl DomainDirectory for InMemoryDirectory {
    fn find_domain(&self, id: DomainId) -> Option<Domain> {
        self.domains
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
    }
}

impl EntityDirectory for InMemoryDirectory {
    fn find_owner(&self, entity: EntityRef) -> Option<AccountId> {
        self.owners
            .read()
            .expect("directory lock poisoned")
            .get(&entity)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_core::{AccountKind, EntityKind};

    #[test]
    fn seeded_directory_knows_root_and_system() {
        let dir = InMemoryDirectory::seeded();
        assert!(dir.find_domain(cirrus_core::ROOT_DOMAIN_ID).is_some());
        assert!(dir.find_account(Account::system().id).is_some());
    }

    #[test]
    fn owner_lookup_round_trip() {
        let dir = InMemoryDirectory::seeded();
        let volume = EntityRef::new(EntityKind::Volume, 10);
        dir.put_account(Account::new(
            AccountId::new(7),
            AccountKind::User,
            cirrus_core::ROOT_DOMAIN_ID,
        ));
        dir.put_owner(volume, AccountId::new(7));

        assert_eq!(dir.find_owner(volume), Some(AccountId::new(7)));
        dir.remove_entity(volume);
        assert_eq!(dir.find_owner(volume), None);
    }
}
