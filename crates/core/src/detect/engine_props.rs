//! Property-based tests for the detection engine.

use chrono::NaiveDate;
use ledgerlint_shared::types::{AccountId, EntryId, LineId};
use ledgerlint_shared::DetectionConfig;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::engine::DetectionEngine;
use super::finding::{ErrorType, Finding, Severity};
use crate::journal::{Account, AccountType, JournalEntry, JournalEntryLine};

// 2026-03-16 is a Monday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn chart() -> Vec<Account> {
    vec![
        Account::new("1000", "Cash - Operating", AccountType::Asset),
        Account::new("2000", "Accounts Payable", AccountType::Liability),
        Account::new("4000", "Sales Revenue", AccountType::Revenue),
    ]
}

/// One line spec: (account index into the chart, cents, is_debit).
type LineSpec = (usize, i64, bool);

fn line_spec() -> impl Strategy<Value = LineSpec> {
    (0usize..3, 1i64..100_000_000, any::<bool>())
}

fn make_entry(number: &str, accounts: &[Account], specs: &[LineSpec]) -> JournalEntry {
    let lines = specs
        .iter()
        .enumerate()
        .map(|(index, (account_index, cents, is_debit))| {
            let amount = Decimal::new(*cents, 2);
            JournalEntryLine {
                id: LineId::new(),
                line_number: u32::try_from(index + 1).unwrap_or(u32::MAX),
                account_id: accounts[*account_index].id,
                debit_amount: if *is_debit { amount } else { Decimal::ZERO },
                credit_amount: if *is_debit { Decimal::ZERO } else { amount },
                description: Some("line item".to_string()),
            }
        })
        .collect();

    JournalEntry {
        id: EntryId::new(),
        entry_number: number.to_string(),
        entry_date: today(),
        description: "Property test entry".to_string(),
        reference: None,
        lines,
        is_posted: true,
    }
}

/// Comparable view of a finding, ignoring the generated finding ID.
fn summary(finding: &Finding) -> (ErrorType, Severity, String, Option<LineId>) {
    (
        finding.error_type,
        finding.severity,
        finding.description.clone(),
        finding.line_id,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Running detection twice on the same immutable input yields
    /// identical finding sets (ignoring generated IDs).
    #[test]
    fn prop_detection_is_idempotent(
        specs in proptest::collection::vec(
            proptest::collection::vec(line_spec(), 0..5),
            1..4,
        )
    ) {
        let accounts = chart();
        let entries: Vec<JournalEntry> = specs
            .iter()
            .enumerate()
            .map(|(index, entry_specs)| {
                make_entry(&format!("JE-{index:04}"), &accounts, entry_specs)
            })
            .collect();
        let history: HashMap<AccountId, Vec<Decimal>> = HashMap::new();

        let engine = DetectionEngine::new(DetectionConfig::default());
        let first = engine.detect_as_of(&entries, &accounts, &history, today());
        let second = engine.detect_as_of(&entries, &accounts, &history, today());

        prop_assert_eq!(first.len(), second.len());
        for (entry_id, findings) in &first {
            let again = &second[entry_id];
            let left: Vec<_> = findings.iter().map(summary).collect();
            let right: Vec<_> = again.iter().map(summary).collect();
            prop_assert_eq!(left, right);
        }
    }

    /// An exactly balanced entry never produces an unbalanced finding.
    #[test]
    fn prop_balanced_entry_never_flagged_unbalanced(
        cents in proptest::collection::vec(1i64..100_000_000, 1..5)
    ) {
        let accounts = chart();
        // Mirror every amount: debit to cash, credit to revenue.
        let specs: Vec<LineSpec> = cents
            .iter()
            .flat_map(|value| [(0usize, *value, true), (2usize, *value, false)])
            .collect();
        let entry = make_entry("JE-0001", &accounts, &specs);
        prop_assert!(entry.is_balanced());

        let engine = DetectionEngine::new(DetectionConfig::default());
        let report = engine.detect_as_of(
            &[entry.clone()],
            &accounts,
            &HashMap::new(),
            today(),
        );

        prop_assert!(report[&entry.id]
            .iter()
            .all(|finding| finding.error_type != ErrorType::UnbalancedEntry));
    }

    /// Within one entry's finding list, no lower-severity finding ever
    /// precedes a higher-severity one.
    #[test]
    fn prop_findings_ordered_by_severity(
        specs in proptest::collection::vec(
            proptest::collection::vec(line_spec(), 0..6),
            1..4,
        )
    ) {
        let accounts = chart();
        let entries: Vec<JournalEntry> = specs
            .iter()
            .enumerate()
            .map(|(index, entry_specs)| {
                make_entry(&format!("JE-{index:04}"), &accounts, entry_specs)
            })
            .collect();

        let engine = DetectionEngine::new(DetectionConfig::default());
        let report = engine.detect_as_of(&entries, &accounts, &HashMap::new(), today());

        for findings in report.values() {
            for pair in findings.windows(2) {
                prop_assert!(pair[0].severity <= pair[1].severity);
            }
        }
    }
}
