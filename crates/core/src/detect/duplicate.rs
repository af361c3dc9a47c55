//! Duplicate transaction matching over a lookback window.

use super::finding::{ErrorType, Finding, Severity};
use crate::journal::JournalEntry;

/// Matches a candidate entry against other entries in the batch for
/// near-identical amount/account/date signatures.
///
/// A match requires equal debit and credit totals, at least half of the
/// candidate's account set in common, and dates within the window. The
/// relation is symmetric, but only the later-dated entry of a pair is
/// flagged so one underlying problem is not counted twice; same-date
/// pairs are resolved by entry number.
#[derive(Debug, Clone)]
pub struct DuplicateMatcher {
    window_days: i64,
}

impl DuplicateMatcher {
    /// Creates a matcher with the given lookback window in days.
    #[must_use]
    pub const fn new(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Returns the first batch entry the candidate duplicates, if any.
    #[must_use]
    pub fn find_duplicate<'a>(
        &self,
        entry: &JournalEntry,
        batch: &'a [JournalEntry],
    ) -> Option<&'a JournalEntry> {
        let accounts = entry.account_ids();
        if accounts.is_empty() {
            return None;
        }
        let total_debits = entry.total_debits();
        let total_credits = entry.total_credits();

        batch.iter().find(|other| {
            if other.id == entry.id {
                return false;
            }
            if (other.entry_date - entry.entry_date).num_days().abs() > self.window_days {
                return false;
            }
            if other.total_debits() != total_debits || other.total_credits() != total_credits {
                return false;
            }
            if !Self::is_later(entry, other) {
                return false;
            }

            let shared = other.account_ids().intersection(&accounts).count();
            // At least half of the candidate's accounts must overlap.
            shared * 2 >= accounts.len()
        })
    }

    /// Reports a MEDIUM finding when the candidate duplicates an
    /// earlier entry in the batch.
    #[must_use]
    pub fn check(&self, entry: &JournalEntry, batch: &[JournalEntry]) -> Vec<Finding> {
        let Some(original) = self.find_duplicate(entry, batch) else {
            return Vec::new();
        };

        vec![
            Finding::new(
                entry.id,
                ErrorType::DuplicateEntry,
                Severity::Medium,
                format!(
                    "Potential duplicate of entry {} dated {}",
                    original.entry_number, original.entry_date
                ),
            )
            .with_correction(format!(
                "Confirm intent or void one of the two entries (see entry {})",
                original.entry_number
            )),
        ]
    }

    /// True when `entry` sorts after `other`: by date, then by entry
    /// number for same-date pairs. The later one receives the finding.
    fn is_later(entry: &JournalEntry, other: &JournalEntry) -> bool {
        (entry.entry_date, &entry.entry_number) > (other.entry_date, &other.entry_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlint_shared::types::{AccountId, EntryId, LineId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn line(account_id: AccountId, debit: Decimal, credit: Decimal) -> crate::journal::JournalEntryLine {
        crate::journal::JournalEntryLine {
            id: LineId::new(),
            line_number: 1,
            account_id,
            debit_amount: debit,
            credit_amount: credit,
            description: None,
        }
    }

    fn entry(
        number: &str,
        date: NaiveDate,
        lines: Vec<crate::journal::JournalEntryLine>,
    ) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            entry_number: number.to_string(),
            entry_date: date,
            description: "Vendor payment".to_string(),
            reference: None,
            lines,
            is_posted: true,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pair() -> (JournalEntry, JournalEntry) {
        let cash = AccountId::new();
        let payable = AccountId::new();
        let earlier = entry(
            "JE-0001",
            date(2026, 3, 10),
            vec![line(payable, dec!(500), dec!(0)), line(cash, dec!(0), dec!(500))],
        );
        let later = entry(
            "JE-0002",
            date(2026, 3, 12),
            vec![line(payable, dec!(500), dec!(0)), line(cash, dec!(0), dec!(500))],
        );
        (earlier, later)
    }

    #[test]
    fn test_later_entry_flagged_earlier_not() {
        let (earlier, later) = pair();
        let batch = vec![earlier.clone(), later.clone()];

        let matcher = DuplicateMatcher::new(30);
        let later_findings = matcher.check(&later, &batch);
        assert_eq!(later_findings.len(), 1);
        assert_eq!(later_findings[0].error_type, ErrorType::DuplicateEntry);
        assert_eq!(later_findings[0].severity, Severity::Medium);
        assert!(later_findings[0].description.contains("JE-0001"));

        assert!(matcher.check(&earlier, &batch).is_empty());
    }

    #[test]
    fn test_outside_window_not_flagged() {
        let (mut earlier, later) = pair();
        earlier.entry_date = date(2026, 1, 2);
        let batch = vec![earlier, later.clone()];

        assert!(DuplicateMatcher::new(30).check(&later, &batch).is_empty());
    }

    #[test]
    fn test_different_totals_not_flagged() {
        let (mut earlier, later) = pair();
        earlier.lines[0].debit_amount = dec!(400);
        earlier.lines[1].credit_amount = dec!(400);
        let batch = vec![earlier, later.clone()];

        assert!(DuplicateMatcher::new(30).check(&later, &batch).is_empty());
    }

    #[test]
    fn test_disjoint_accounts_not_flagged() {
        let (_, later) = pair();
        let other = entry(
            "JE-0003",
            date(2026, 3, 11),
            vec![
                line(AccountId::new(), dec!(500), dec!(0)),
                line(AccountId::new(), dec!(0), dec!(500)),
            ],
        );
        let batch = vec![other, later.clone()];

        assert!(DuplicateMatcher::new(30).check(&later, &batch).is_empty());
    }

    #[test]
    fn test_same_date_tiebreak_by_entry_number() {
        let (mut earlier, mut later) = pair();
        earlier.entry_date = date(2026, 3, 12);
        later.entry_date = date(2026, 3, 12);
        let batch = vec![earlier.clone(), later.clone()];

        let matcher = DuplicateMatcher::new(30);
        // JE-0002 sorts after JE-0001, so it takes the finding.
        assert_eq!(matcher.check(&later, &batch).len(), 1);
        assert!(matcher.check(&earlier, &batch).is_empty());
    }

    #[test]
    fn test_partial_overlap_still_matches() {
        let cash = AccountId::new();
        let payable = AccountId::new();
        let earlier = entry(
            "JE-0001",
            date(2026, 3, 10),
            vec![line(payable, dec!(500), dec!(0)), line(cash, dec!(0), dec!(500))],
        );
        // Shares only the cash account (1 of 2), exactly the half bound.
        let later = entry(
            "JE-0002",
            date(2026, 3, 12),
            vec![
                line(AccountId::new(), dec!(500), dec!(0)),
                line(cash, dec!(0), dec!(500)),
            ],
        );
        let batch = vec![earlier, later.clone()];

        assert_eq!(DuplicateMatcher::new(30).check(&later, &batch).len(), 1);
    }
}
