//! Journal domain types for error detection.
//!
//! These types mirror the relational schema the caller loads entries
//! from. The detection engine only ever borrows them; findings and
//! suggestions are produced as new values.

use chrono::NaiveDate;
use ledgerlint_shared::types::{AccountId, EntryId, LineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Account classification in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Resources owned (cash, receivables, equipment).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the side on which this account type naturally increases.
    ///
    /// Asset/Expense accounts are debit-normal; Liability/Equity/Revenue
    /// accounts are credit-normal.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// The side (debit or credit) on which an account naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalBalance {
    /// Debit-normal.
    Debit,
    /// Credit-normal.
    Credit,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Account code (e.g., "1000").
    pub code: String,
    /// Account name (e.g., "Cash - Operating").
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional finer classification (e.g., "current_asset").
    pub subtype: Option<String>,
    /// Stored normal balance side. Should agree with the account type;
    /// detection treats a contradiction as a data error, not a panic.
    pub normal_balance: NormalBalance,
    /// Whether the account accepts postings.
    pub is_active: bool,
    /// Optional parent account in the chart hierarchy.
    pub parent: Option<AccountId>,
}

impl Account {
    /// Creates an active account with the normal balance derived from
    /// its type.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            account_type,
            subtype: None,
            normal_balance: account_type.normal_balance(),
            is_active: true,
            parent: None,
        }
    }

    /// Returns true if the stored normal balance agrees with the one
    /// implied by the account type.
    #[must_use]
    pub fn normal_balance_consistent(&self) -> bool {
        self.normal_balance == self.account_type.normal_balance()
    }
}

/// One debit-or-credit movement against one account within an entry.
///
/// The schema enforces at most one nonzero side per line, but real data
/// can violate that; the checkers treat both sides as untrusted input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// The line ID.
    pub id: LineId,
    /// Position of the line within its entry (1-based).
    pub line_number: u32,
    /// The account this line posts to.
    pub account_id: AccountId,
    /// Debit amount (zero if this is a credit line).
    pub debit_amount: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit_amount: Decimal,
    /// Optional line-level description.
    pub description: Option<String>,
}

impl JournalEntryLine {
    /// Returns the magnitude of the line: the larger of the two sides.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.debit_amount.max(self.credit_amount)
    }
}

/// A journal entry: a set of debit/credit lines recorded together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// The entry ID.
    pub id: EntryId,
    /// Human-facing entry number (e.g., "JE-2026-0042").
    pub entry_number: String,
    /// The posting date.
    pub entry_date: NaiveDate,
    /// Free-text description of the transaction.
    pub description: String,
    /// Optional reference (check number, invoice number, ...).
    pub reference: Option<String>,
    /// The entry's lines, in recorded order.
    pub lines: Vec<JournalEntryLine>,
    /// Whether the entry has been posted to the ledger.
    pub is_posted: bool,
}

impl JournalEntry {
    /// Sum of all debit amounts across lines.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit_amount).sum()
    }

    /// Sum of all credit amounts across lines.
    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit_amount).sum()
    }

    /// Signed out-of-balance amount: debits minus credits.
    #[must_use]
    pub fn imbalance(&self) -> Decimal {
        self.total_debits() - self.total_credits()
    }

    /// Returns true if debits exactly equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.imbalance().is_zero()
    }

    /// The set of accounts this entry touches, in a stable order.
    #[must_use]
    pub fn account_ids(&self) -> BTreeSet<AccountId> {
        self.lines.iter().map(|line| line.account_id).collect()
    }
}
