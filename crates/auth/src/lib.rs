//! `cirrus-auth` — account/domain authorization resolution.
//!
//! This crate is intentionally decoupled from transport and storage: entity
//! and tenancy lookups go through the directory traits, which any read model
//! can implement.

pub mod caller;
pub mod directory;
pub mod resolver;

pub use caller::Caller;
pub use directory::{AccountDirectory, DomainDirectory, EntityDirectory};
pub use resolver::{AuthorizationResolver, AuthzError};
