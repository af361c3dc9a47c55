//! Read-only index over the chart of accounts.

use ledgerlint_shared::types::AccountId;
use std::collections::HashMap;

use super::types::{Account, AccountType};

/// In-memory index over the chart of accounts.
///
/// Built once from the full chart at the start of a detection run and
/// read-only thereafter. A lookup miss is ordinary data (checkers turn
/// it into an `InvalidAccount` finding), never a fault.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    by_id: HashMap<AccountId, Account>,
}

impl AccountDirectory {
    /// Builds a directory from the full chart of accounts.
    #[must_use]
    pub fn from_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = Account>,
    {
        let by_id = accounts
            .into_iter()
            .map(|account| (account.id, account))
            .collect();
        Self { by_id }
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.by_id.get(&id)
    }

    /// Returns all accounts of the given type, sorted by account code.
    #[must_use]
    pub fn by_type(&self, account_type: AccountType) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self
            .by_id
            .values()
            .filter(|account| account.account_type == account_type)
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Returns true if the account exists and is active.
    #[must_use]
    pub fn is_valid_active(&self, id: AccountId) -> bool {
        self.get(id).is_some_and(|account| account.is_active)
    }

    /// Iterates over all accounts, sorted by account code for
    /// deterministic downstream ranking.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        let mut accounts: Vec<&Account> = self.by_id.values().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts.into_iter()
    }

    /// Number of accounts in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the directory holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
