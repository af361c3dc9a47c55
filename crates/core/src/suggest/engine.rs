//! Correction proposal generation for detected findings.

use rust_decimal::Decimal;

use ledgerlint_shared::types::AccountId;

use super::similarity::AccountSimilarityScorer;
use super::types::{CorrectionAction, CorrectionSuggestion};
use crate::detect::{ErrorType, Finding};
use crate::journal::{AccountDirectory, JournalEntry, JournalEntryLine, NormalBalance};

/// Produces ranked, concrete correction proposals for findings.
///
/// A pure transformation: no I/O, no mutation of the entry. Suggestions
/// are returned in rank order and consumed immediately by the caller.
pub struct CorrectionEngine {
    scorer: AccountSimilarityScorer,
}

impl Default for CorrectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectionEngine {
    /// Creates an engine with the default similarity scorer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: AccountSimilarityScorer::new(),
        }
    }

    /// Creates an engine with a caller-configured scorer.
    #[must_use]
    pub const fn with_scorer(scorer: AccountSimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Generates ranked correction proposals for one finding.
    #[must_use]
    pub fn suggest(
        &self,
        finding: &Finding,
        entry: &JournalEntry,
        directory: &AccountDirectory,
    ) -> Vec<CorrectionSuggestion> {
        match finding.error_type {
            ErrorType::UnbalancedEntry => Self::balance_proposals(entry, directory),
            ErrorType::AccountTypeMismatch | ErrorType::InvalidAccount => {
                self.substitution_proposals(finding, entry, directory)
            }
            ErrorType::UnusualAmount | ErrorType::RoundAmount => {
                Self::amount_proposals(finding, entry)
            }
            _ => vec![Self::fallback_advisory(finding)],
        }
    }

    /// Three amount-exact proposals for an unbalanced entry, in fixed
    /// rank order: add the missing credit, add the debit counterpart,
    /// reduce the largest line on the heavier side.
    fn balance_proposals(
        entry: &JournalEntry,
        directory: &AccountDirectory,
    ) -> Vec<CorrectionSuggestion> {
        let imbalance = entry.imbalance();
        if imbalance.is_zero() || entry.lines.is_empty() {
            return Vec::new();
        }
        let amount = imbalance.abs();

        let mut proposals = Vec::with_capacity(3);

        proposals.push(CorrectionSuggestion::amount_fix(
            CorrectionAction::AddCredit,
            most_recent_account(entry, directory, NormalBalance::Credit),
            amount,
            format!("Add a credit of {amount} to balance the entry if the credit side is understated"),
        ));
        proposals.push(CorrectionSuggestion::amount_fix(
            CorrectionAction::AddDebit,
            most_recent_account(entry, directory, NormalBalance::Debit),
            amount,
            format!("Add a debit of {amount} to balance the entry if the debit side is understated"),
        ));

        let debits_heavier = imbalance > Decimal::ZERO;
        if let Some(largest) = largest_line(entry, debits_heavier) {
            let (action, side) = if debits_heavier {
                (CorrectionAction::ReduceDebit, "debit")
            } else {
                (CorrectionAction::ReduceCredit, "credit")
            };
            proposals.push(CorrectionSuggestion::amount_fix(
                action,
                Some(largest.account_id),
                amount,
                format!(
                    "Reduce the largest {side} line (line {}, currently {}) by {amount}",
                    largest.line_number,
                    largest.magnitude()
                ),
            ));
        }

        proposals
    }

    /// Substitute-account proposals via the similarity scorer,
    /// preserving score-based rank.
    fn substitution_proposals(
        &self,
        finding: &Finding,
        entry: &JournalEntry,
        directory: &AccountDirectory,
    ) -> Vec<CorrectionSuggestion> {
        let line = finding
            .line_id
            .and_then(|line_id| entry.lines.iter().find(|line| line.id == line_id));
        let account = line.and_then(|line| directory.get(line.account_id));

        let Some(account) = account else {
            // Entry-level mismatch, or an account the directory has
            // never heard of: nothing to score against.
            return vec![Self::fallback_advisory(finding)];
        };

        let ranked = self
            .scorer
            .suggest_accounts(account, directory, &entry.description);
        if ranked.is_empty() {
            return vec![Self::fallback_advisory(finding)];
        }

        ranked
            .into_iter()
            .filter_map(|(candidate_id, score)| {
                directory.get(candidate_id).map(|candidate| {
                    CorrectionSuggestion::substitution(
                        candidate_id,
                        format!(
                            "Consider using {} - {} instead of {} (similarity {score})",
                            candidate.code, candidate.name, account.code
                        ),
                    )
                })
            })
            .collect()
    }

    /// Advisory proposals for amount findings: no numeric correction,
    /// since the amount may be legitimate, plus a missing-decimals hint
    /// for large round amounts.
    fn amount_proposals(finding: &Finding, entry: &JournalEntry) -> Vec<CorrectionSuggestion> {
        let mut proposals = vec![Self::fallback_advisory(finding)];

        let line = finding
            .line_id
            .and_then(|line_id| entry.lines.iter().find(|line| line.id == line_id));
        if let Some(line) = line {
            let magnitude = line.magnitude();
            if magnitude >= Decimal::ONE_THOUSAND && (magnitude % Decimal::ONE_HUNDRED).is_zero() {
                let adjusted = magnitude / Decimal::ONE_HUNDRED;
                proposals.push(CorrectionSuggestion::advisory(format!(
                    "Check whether the amount should be {adjusted} (missing decimal places)"
                )));
            }
        }

        proposals
    }

    /// Single advisory built from the checker's remediation hint.
    fn fallback_advisory(finding: &Finding) -> CorrectionSuggestion {
        CorrectionSuggestion::advisory(
            finding
                .suggested_correction
                .clone()
                .unwrap_or_else(|| "Review this finding against source documents".to_string()),
        )
    }
}

/// The most recently used account in the entry whose normal balance
/// matches `side`; falls back to the last line's account.
fn most_recent_account(
    entry: &JournalEntry,
    directory: &AccountDirectory,
    side: NormalBalance,
) -> Option<AccountId> {
    entry
        .lines
        .iter()
        .rev()
        .find(|line| {
            directory
                .get(line.account_id)
                .is_some_and(|account| account.normal_balance == side)
        })
        .or_else(|| entry.lines.last())
        .map(|line| line.account_id)
}

/// The largest line on the debit or credit side.
fn largest_line(entry: &JournalEntry, debit_side: bool) -> Option<&JournalEntryLine> {
    entry.lines.iter().max_by_key(|line| {
        if debit_side {
            line.debit_amount
        } else {
            line.credit_amount
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Severity;
    use crate::journal::{Account, AccountType};
    use chrono::NaiveDate;
    use ledgerlint_shared::types::{EntryId, LineId};
    use rust_decimal_macros::dec;

    fn line(line_number: u32, account_id: AccountId, debit: Decimal, credit: Decimal) -> JournalEntryLine {
        JournalEntryLine {
            id: LineId::new(),
            line_number,
            account_id,
            debit_amount: debit,
            credit_amount: credit,
            description: None,
        }
    }

    fn entry(lines: Vec<JournalEntryLine>) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            entry_number: "JE-0001".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
            description: "Recorded sale".to_string(),
            reference: None,
            lines,
            is_posted: true,
        }
    }

    fn chart() -> (AccountDirectory, AccountId, AccountId) {
        let cash = Account::new("1000", "Cash - Operating", AccountType::Asset);
        let revenue = Account::new("4000", "Sales Revenue", AccountType::Revenue);
        let (cash_id, revenue_id) = (cash.id, revenue.id);
        (
            AccountDirectory::from_accounts(vec![cash, revenue]),
            cash_id,
            revenue_id,
        )
    }

    #[test]
    fn test_balance_proposals_for_debit_heavy_entry() {
        let (directory, cash, revenue) = chart();
        let e = entry(vec![
            line(1, cash, dec!(1000), dec!(0)),
            line(2, revenue, dec!(0), dec!(900)),
        ]);
        let finding = Finding::new(
            e.id,
            ErrorType::UnbalancedEntry,
            Severity::High,
            "out of balance by 100",
        );

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals.len(), 3);

        // (a) add credit of the exact imbalance to the MRU credit-normal account
        assert_eq!(proposals[0].action, CorrectionAction::AddCredit);
        assert_eq!(proposals[0].amount, Some(dec!(100)));
        assert_eq!(proposals[0].account_id, Some(revenue));

        // (b) debit counterpart
        assert_eq!(proposals[1].action, CorrectionAction::AddDebit);
        assert_eq!(proposals[1].amount, Some(dec!(100)));
        assert_eq!(proposals[1].account_id, Some(cash));

        // (c) reduce the largest debit line
        assert_eq!(proposals[2].action, CorrectionAction::ReduceDebit);
        assert_eq!(proposals[2].amount, Some(dec!(100)));
        assert_eq!(proposals[2].account_id, Some(cash));
    }

    #[test]
    fn test_balance_proposals_exact_amount_no_drift() {
        let (directory, cash, revenue) = chart();
        let e = entry(vec![
            line(1, cash, dec!(1234.57), dec!(0)),
            line(2, revenue, dec!(0), dec!(1234.5699)),
        ]);
        let finding = Finding::new(
            e.id,
            ErrorType::UnbalancedEntry,
            Severity::High,
            "out of balance",
        );

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        let imbalance = e.imbalance().abs();
        assert!(proposals.iter().any(|p| p.amount == Some(imbalance)));
        assert_eq!(imbalance, dec!(0.0001));
    }

    #[test]
    fn test_balance_proposals_credit_heavy_reduces_credit() {
        let (directory, cash, revenue) = chart();
        let e = entry(vec![
            line(1, cash, dec!(400), dec!(0)),
            line(2, revenue, dec!(0), dec!(500)),
        ]);
        let finding = Finding::new(
            e.id,
            ErrorType::UnbalancedEntry,
            Severity::High,
            "out of balance",
        );

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals[2].action, CorrectionAction::ReduceCredit);
        assert_eq!(proposals[2].account_id, Some(revenue));
        assert_eq!(proposals[2].amount, Some(dec!(100)));
    }

    #[test]
    fn test_substitution_proposals_preserve_scorer_rank() {
        let cash = Account::new("1000", "Cash Operating", AccountType::Asset);
        let petty = Account::new("1010", "Cash Petty", AccountType::Asset);
        let receivable = Account::new("1200", "Accounts Receivable", AccountType::Asset);
        let (cash_id, petty_id) = (cash.id, petty.id);
        let directory = AccountDirectory::from_accounts(vec![cash, petty, receivable]);

        let misposted = line(1, cash_id, dec!(250), dec!(0));
        let line_id = misposted.id;
        let e = entry(vec![misposted]);
        let finding = Finding::new(
            e.id,
            ErrorType::AccountTypeMismatch,
            Severity::Medium,
            "account usage inconsistent",
        )
        .with_line(line_id);

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert!(!proposals.is_empty());
        assert!(proposals
            .iter()
            .all(|p| p.action == CorrectionAction::SubstituteAccount));
        // Shared "Cash" name token ranks the petty cash account first.
        assert_eq!(proposals[0].account_id, Some(petty_id));
    }

    #[test]
    fn test_unknown_account_falls_back_to_advisory() {
        let (directory, _, _) = chart();
        let orphan = line(1, AccountId::new(), dec!(250), dec!(0));
        let line_id = orphan.id;
        let e = entry(vec![orphan]);
        let finding = Finding::new(
            e.id,
            ErrorType::InvalidAccount,
            Severity::High,
            "unknown account",
        )
        .with_line(line_id)
        .with_correction("Select a valid account from the chart of accounts");

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].action, CorrectionAction::Review);
        assert!(proposals[0].rationale.contains("valid account"));
    }

    #[test]
    fn test_unusual_amount_advisory_quotes_threshold() {
        let (directory, cash, _) = chart();
        let big = line(1, cash, dec!(5000), dec!(0));
        let line_id = big.id;
        let e = entry(vec![big]);
        let finding = Finding::new(
            e.id,
            ErrorType::UnusualAmount,
            Severity::Medium,
            "amount unusually large",
        )
        .with_line(line_id)
        .with_correction("Verify the amount against source documents; detection threshold was 11.00");

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals[0].action, CorrectionAction::Review);
        assert!(proposals[0].rationale.contains("11.00"));
        // 5000 is a large round amount: missing-decimals hint follows.
        assert_eq!(proposals.len(), 2);
        assert!(proposals[1].rationale.contains("50"));
    }

    #[test]
    fn test_duplicate_advisory_names_other_entry() {
        let (directory, cash, revenue) = chart();
        let e = entry(vec![
            line(1, cash, dec!(500), dec!(0)),
            line(2, revenue, dec!(0), dec!(500)),
        ]);
        let finding = Finding::new(
            e.id,
            ErrorType::DuplicateEntry,
            Severity::Medium,
            "Potential duplicate of entry JE-0007",
        )
        .with_correction("Confirm intent or void one of the two entries (see entry JE-0007)");

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].action, CorrectionAction::Review);
        assert!(proposals[0].rationale.contains("JE-0007"));
    }

    #[test]
    fn test_missing_description_single_advisory() {
        let (directory, cash, _) = chart();
        let e = entry(vec![line(1, cash, dec!(100), dec!(0))]);
        let finding = Finding::new(
            e.id,
            ErrorType::MissingDescription,
            Severity::Low,
            "description missing",
        )
        .with_correction("Add a meaningful description explaining the transaction");

        let proposals = CorrectionEngine::new().suggest(&finding, &e, &directory);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].action, CorrectionAction::Review);
        assert!(proposals[0].amount.is_none());
    }
}
