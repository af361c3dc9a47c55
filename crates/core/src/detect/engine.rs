//! Error detection orchestration.

use chrono::{NaiveDate, Utc};
use ledgerlint_shared::types::{AccountId, EntryId};
use ledgerlint_shared::DetectionConfig;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::checks::{default_checks, Check, CheckContext};
use super::duplicate::DuplicateMatcher;
use super::finding::{ErrorType, Finding, Severity};
use crate::baseline::Baseline;
use crate::journal::{Account, AccountDirectory, JournalEntry};

/// Orchestrates rule checkers and the duplicate matcher over a batch.
///
/// The engine is side-effect-free with respect to its inputs: entries
/// and accounts are read-only, and findings come back as new values for
/// the caller to persist. Malformed input is what the engine exists to
/// surface, so it never raises on bad data; a structurally
/// uninterpretable entry degrades to a `MalformedEntry` finding and the
/// rest of the batch continues.
pub struct DetectionEngine {
    config: DetectionConfig,
    checks: Vec<Box<dyn Check>>,
    matcher: DuplicateMatcher,
}

impl DetectionEngine {
    /// Creates an engine with the standard checker set.
    #[must_use]
    pub fn new(config: DetectionConfig) -> Self {
        let matcher = DuplicateMatcher::new(config.duplicate_window_days);
        Self {
            config,
            checks: default_checks(),
            matcher,
        }
    }

    /// Creates an engine with a caller-supplied checker registry.
    #[must_use]
    pub fn with_checks(config: DetectionConfig, checks: Vec<Box<dyn Check>>) -> Self {
        let matcher = DuplicateMatcher::new(config.duplicate_window_days);
        Self {
            config,
            checks,
            matcher,
        }
    }

    /// Appends a checker to the registry. Registration order is the
    /// tie-break for findings of equal severity.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Runs detection over a batch using the current date.
    #[must_use]
    pub fn detect(
        &self,
        entries: &[JournalEntry],
        accounts: &[Account],
        history: &HashMap<AccountId, Vec<Decimal>>,
    ) -> BTreeMap<EntryId, Vec<Finding>> {
        self.detect_as_of(entries, accounts, history, Utc::now().date_naive())
    }

    /// Runs detection over a batch, treating `today` as the current
    /// date. Given identical inputs, the findings (ignoring generated
    /// IDs) are identical across runs.
    #[must_use]
    pub fn detect_as_of(
        &self,
        entries: &[JournalEntry],
        accounts: &[Account],
        history: &HashMap<AccountId, Vec<Decimal>>,
        today: NaiveDate,
    ) -> BTreeMap<EntryId, Vec<Finding>> {
        let directory = AccountDirectory::from_accounts(accounts.iter().cloned());
        let baseline = Baseline::from_history(history, &self.config);
        let ctx = CheckContext {
            directory: &directory,
            baseline: &baseline,
            config: &self.config,
            today,
        };

        let mut report = BTreeMap::new();

        for entry in entries {
            let mut findings = Vec::new();

            if entry.lines.is_empty() {
                findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::MalformedEntry,
                        Severity::High,
                        format!(
                            "Entry {} has no lines and cannot be interpreted",
                            entry.entry_number
                        ),
                    )
                    .with_correction("Add debit and credit lines or remove the entry"),
                );
            } else {
                for check in &self.checks {
                    findings.extend(check.check(entry, &ctx));
                }
                findings.extend(self.matcher.check(entry, entries));
            }

            // Stable sort: severity first, registration order within.
            findings.sort_by_key(|finding| finding.severity);

            debug!(
                entry = %entry.entry_number,
                findings = findings.len(),
                "entry analyzed"
            );
            report.insert(entry.id, findings);
        }

        report
    }
}
