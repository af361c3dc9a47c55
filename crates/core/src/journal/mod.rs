//! Journal entry domain types and the account directory.
//!
//! - Chart of accounts types (account type, normal balance)
//! - Journal entries and their debit/credit lines
//! - Read-only account directory built once per detection run

pub mod directory;
pub mod types;

pub use directory::AccountDirectory;
pub use types::{Account, AccountType, JournalEntry, JournalEntryLine, NormalBalance};
