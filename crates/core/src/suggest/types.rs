//! Correction suggestion types.
//!
//! Suggestions are ephemeral: produced per detection run and handed to
//! the caller, never persisted by the core.

use ledgerlint_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of remediation a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionAction {
    /// Add a debit line for the given amount.
    AddDebit,
    /// Add a credit line for the given amount.
    AddCredit,
    /// Reduce an existing debit line by the given amount.
    ReduceDebit,
    /// Reduce an existing credit line by the given amount.
    ReduceCredit,
    /// Post to a different account.
    SubstituteAccount,
    /// Advisory only: verify against source documents.
    Review,
}

/// A concrete, ranked correction proposal tied to one finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionSuggestion {
    /// What kind of change is proposed.
    pub action: CorrectionAction,
    /// The account the change targets, when one applies.
    pub account_id: Option<AccountId>,
    /// The exact amount involved, when one applies.
    pub amount: Option<Decimal>,
    /// Free-text rationale for the reviewer.
    pub rationale: String,
}

impl CorrectionSuggestion {
    /// An amount-exact proposal against a specific account.
    #[must_use]
    pub fn amount_fix(
        action: CorrectionAction,
        account_id: Option<AccountId>,
        amount: Decimal,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            action,
            account_id,
            amount: Some(amount),
            rationale: rationale.into(),
        }
    }

    /// A substitute-account proposal.
    #[must_use]
    pub fn substitution(account_id: AccountId, rationale: impl Into<String>) -> Self {
        Self {
            action: CorrectionAction::SubstituteAccount,
            account_id: Some(account_id),
            amount: None,
            rationale: rationale.into(),
        }
    }

    /// An advisory proposal with no account or amount change.
    #[must_use]
    pub fn advisory(rationale: impl Into<String>) -> Self {
        Self {
            action: CorrectionAction::Review,
            account_id: None,
            amount: None,
            rationale: rationale.into(),
        }
    }
}
