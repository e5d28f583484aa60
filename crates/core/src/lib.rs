//! `cirrus-core` — shared control-plane primitives.
//!
//! This crate contains **pure model** types (no infrastructure concerns):
//! identifiers, the account/domain tenancy model, entity references, and the
//! API error taxonomy.

pub mod account;
pub mod domain;
pub mod entity;
pub mod error;
pub mod id;

pub use account::{Account, AccountKind};
pub use domain::{Domain, ROOT_DOMAIN_ID};
pub use entity::{EntityKind, EntityRef};
pub use error::{ApiErrorCode, CommandError, CommandResult, WireError};
pub use id::{AccountId, DomainId, UserId};
