//! Caller context for one API request.

use serde::{Deserialize, Serialize};

use cirrus_core::{Account, UserId};

/// The authenticated principal behind a request.
///
/// Derived by the transport layer (session/key validation is out of scope
/// here) and passed into every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub account: Account,
    pub user_id: UserId,
}

impl Caller {
    pub fn new(account: Account, user_id: UserId) -> Self {
        Self { account, user_id }
    }

    pub fn is_privileged(&self) -> bool {
        self.account.kind.is_privileged()
    }
}
