//! Rule checkers for journal entry validation.
//!
//! Each checker is a pure function of one entry plus the run's shared
//! read-only context. Checkers never raise: every problem they can see
//! becomes a finding, and problems they cannot interpret are simply
//! skipped so the rest of the batch keeps going.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use rust_decimal::Decimal;

use ledgerlint_shared::DetectionConfig;

use super::finding::{ErrorType, Finding, Severity};
use crate::baseline::Baseline;
use crate::journal::{AccountDirectory, AccountType, JournalEntry, JournalEntryLine};

/// Shared read-only context for a detection run.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The account directory built for this run.
    pub directory: &'a AccountDirectory,
    /// The statistical amount baseline built for this run.
    pub baseline: &'a Baseline,
    /// The run configuration.
    pub config: &'a DetectionConfig,
    /// The date to treat as "today". Supplied by the engine so date
    /// checks stay deterministic under test.
    pub today: NaiveDate,
}

/// A single composable detection rule.
///
/// Implementations must be deterministic: identical inputs yield the
/// identical findings (ignoring generated IDs) across runs.
pub trait Check {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Runs the rule against one entry.
    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// The standard checker set, in registration order.
///
/// Registration order is the tie-break for findings of equal severity,
/// so output stays stable and testable.
#[must_use]
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(BalanceCheck),
        Box::new(AccountCheck),
        Box::new(NegativeAmountCheck),
        Box::new(DualSidedLineCheck),
        Box::new(ZeroAmountCheck),
        Box::new(AccountTypeMismatchCheck),
        Box::new(CashAccountCheck),
        Box::new(RevenueRecognitionCheck),
        Box::new(ExpenseCapitalizationCheck),
        Box::new(UnusualAmountCheck),
        Box::new(MissingDescriptionCheck),
        Box::new(DateCheck),
        Box::new(RoundNumberCheck),
        Box::new(WeekendPostingCheck),
        Box::new(LineCountCheck),
    ]
}

/// Flags entries whose debits do not equal credits.
pub struct BalanceCheck;

impl Check for BalanceCheck {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        if entry.is_balanced() {
            return Vec::new();
        }

        let imbalance = entry.imbalance();
        let side = if imbalance > Decimal::ZERO {
            "debits exceed credits"
        } else {
            "credits exceed debits"
        };
        vec![
            Finding::new(
                entry.id,
                ErrorType::UnbalancedEntry,
                Severity::High,
                format!(
                    "Entry {} is out of balance by {} ({}). Debits: {}, Credits: {}",
                    entry.entry_number,
                    imbalance.abs(),
                    side,
                    entry.total_debits(),
                    entry.total_credits()
                ),
            )
            .with_correction(format!(
                "Add the missing {} of {} or reduce the heavier side",
                if imbalance > Decimal::ZERO { "credit" } else { "debit" },
                imbalance.abs()
            )),
        ]
    }
}

/// Flags lines referencing unknown or inactive accounts.
pub struct AccountCheck;

impl Check for AccountCheck {
    fn name(&self) -> &'static str {
        "account"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for line in &entry.lines {
            match ctx.directory.get(line.account_id) {
                None => findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::InvalidAccount,
                        Severity::High,
                        format!(
                            "Line {} references unknown account {}",
                            line.line_number, line.account_id
                        ),
                    )
                    .with_line(line.id)
                    .with_correction("Select a valid account from the chart of accounts"),
                ),
                Some(account) if !account.is_active => findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::InvalidAccount,
                        Severity::High,
                        format!(
                            "Line {} account {} - {} is inactive",
                            line.line_number, account.code, account.name
                        ),
                    )
                    .with_line(line.id)
                    .with_correction("Use an active account or reactivate this account"),
                ),
                Some(_) => {}
            }
        }

        findings
    }
}

/// Flags negative debit or credit amounts.
///
/// The schema may already forbid negatives; real data can still carry
/// them, so the check stays.
pub struct NegativeAmountCheck;

impl Check for NegativeAmountCheck {
    fn name(&self) -> &'static str {
        "negative_amount"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        entry
            .lines
            .iter()
            .filter(|line| {
                line.debit_amount < Decimal::ZERO || line.credit_amount < Decimal::ZERO
            })
            .map(|line| {
                Finding::new(
                    entry.id,
                    ErrorType::NegativeAmount,
                    Severity::High,
                    format!("Line {} has a negative amount", line.line_number),
                )
                .with_line(line.id)
                .with_correction("Use a positive amount on the opposite side (debit vs credit)")
            })
            .collect()
    }
}

/// Flags lines carrying both a debit and a credit amount.
pub struct DualSidedLineCheck;

impl Check for DualSidedLineCheck {
    fn name(&self) -> &'static str {
        "dual_sided_line"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        entry
            .lines
            .iter()
            .filter(|line| {
                line.debit_amount > Decimal::ZERO && line.credit_amount > Decimal::ZERO
            })
            .map(|line| {
                Finding::new(
                    entry.id,
                    ErrorType::DualSidedLine,
                    Severity::High,
                    format!(
                        "Line {} carries both a debit ({}) and a credit ({})",
                        line.line_number, line.debit_amount, line.credit_amount
                    ),
                )
                .with_line(line.id)
                .with_correction("Split into two lines or zero the incorrect side")
            })
            .collect()
    }
}

/// Flags lines with neither side populated.
pub struct ZeroAmountCheck;

impl Check for ZeroAmountCheck {
    fn name(&self) -> &'static str {
        "zero_amount"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        entry
            .lines
            .iter()
            .filter(|line| line.debit_amount.is_zero() && line.credit_amount.is_zero())
            .map(|line| {
                Finding::new(
                    entry.id,
                    ErrorType::ZeroAmount,
                    Severity::Medium,
                    format!("Line {} has zero amount", line.line_number),
                )
                .with_line(line.id)
                .with_correction("Enter the correct debit or credit amount, or remove this line")
            })
            .collect()
    }
}

fn description_mentions(description: &str, words: &[&str]) -> bool {
    let lowered = description.to_lowercase();
    words.iter().any(|word| lowered.contains(word))
}

/// Heuristic check for account usage inconsistent with type or context.
///
/// Low-confidence by design: findings stay MEDIUM and are tagged as
/// heuristic so callers can separate them from deterministic checks.
pub struct AccountTypeMismatchCheck;

impl Check for AccountTypeMismatchCheck {
    fn name(&self) -> &'static str {
        "account_type_mismatch"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        // Stored normal balance contradicting the account type is a hard
        // data inconsistency, reported per line.
        for line in &entry.lines {
            if let Some(account) = ctx.directory.get(line.account_id) {
                if !account.normal_balance_consistent() {
                    findings.push(
                        Finding::new(
                            entry.id,
                            ErrorType::AccountTypeMismatch,
                            Severity::Medium,
                            format!(
                                "Account {} stores a {:?} normal balance but its type {:?} implies {:?}",
                                account.code,
                                account.normal_balance,
                                account.account_type,
                                account.account_type.normal_balance()
                            ),
                        )
                        .with_line(line.id)
                        .with_correction("Correct the account's normal balance or its type"),
                    );
                }
            }
        }

        let types: Vec<AccountType> = entry
            .lines
            .iter()
            .filter_map(|line| ctx.directory.get(line.account_id))
            .map(|account| account.account_type)
            .collect();

        let has = |wanted: AccountType| types.iter().any(|t| *t == wanted);
        let all_expense = !types.is_empty() && types.iter().all(|t| *t == AccountType::Expense);

        if all_expense
            && !description_mentions(
                &entry.description,
                &["depreciation", "amortization", "write-off"],
            )
        {
            findings.push(
                Finding::new(
                    entry.id,
                    ErrorType::AccountTypeMismatch,
                    Severity::Medium,
                    "Entry contains only expense accounts - may be missing asset/liability accounts"
                        .to_string(),
                )
                .with_correction("Review account selection to ensure proper categorization")
                .as_heuristic(),
            );
        }

        if has(AccountType::Revenue)
            && has(AccountType::Expense)
            && !description_mentions(&entry.description, &["closing", "year-end", "adjustment"])
        {
            findings.push(
                Finding::new(
                    entry.id,
                    ErrorType::AccountTypeMismatch,
                    Severity::Medium,
                    "Entry mixes revenue and expense accounts - verify this is intentional"
                        .to_string(),
                )
                .with_correction("Review account selection to ensure proper categorization")
                .as_heuristic(),
            );
        }

        let asset_lines = types.iter().filter(|t| **t == AccountType::Asset).count();
        if asset_lines > 2
            && !description_mentions(
                &entry.description,
                &["transfer", "reclassification", "acquisition"],
            )
        {
            findings.push(
                Finding::new(
                    entry.id,
                    ErrorType::AccountTypeMismatch,
                    Severity::Medium,
                    "Entry affects multiple asset accounts - ensure this reflects the actual transaction"
                        .to_string(),
                )
                .with_correction("Review account selection to ensure proper categorization")
                .as_heuristic(),
            );
        }

        findings
    }
}

/// Business rules for cash accounts: entries spanning several cash
/// lines, and large cash movements posted without a reference.
pub struct CashAccountCheck;

impl CashAccountCheck {
    /// Cash movements above this need a reference.
    const REFERENCE_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
}

impl Check for CashAccountCheck {
    fn name(&self) -> &'static str {
        "cash_account"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        let cash_lines: Vec<&JournalEntryLine> = entry
            .lines
            .iter()
            .filter(|line| {
                ctx.directory
                    .get(line.account_id)
                    .is_some_and(|account| account.name.to_lowercase().contains("cash"))
            })
            .collect();

        if cash_lines.len() > 1 {
            findings.push(
                Finding::new(
                    entry.id,
                    ErrorType::AccountTypeMismatch,
                    Severity::Medium,
                    "Entry affects multiple cash accounts".to_string(),
                )
                .with_correction("Verify this represents an actual cash transfer")
                .as_heuristic(),
            );
        }

        let has_reference = entry
            .reference
            .as_deref()
            .is_some_and(|reference| !reference.trim().is_empty());
        if !has_reference {
            for line in cash_lines {
                let magnitude = line.magnitude();
                if magnitude > Self::REFERENCE_THRESHOLD {
                    findings.push(
                        Finding::new(
                            entry.id,
                            ErrorType::MissingDescription,
                            Severity::Medium,
                            format!(
                                "Line {} is a large cash transaction ({}) without a reference",
                                line.line_number, magnitude
                            ),
                        )
                        .with_line(line.id)
                        .with_correction("Add a check number, wire transfer ID, or other reference"),
                    );
                }
            }
        }

        findings
    }
}

/// Flags revenue recognized without an asset or liability counterpart.
pub struct RevenueRecognitionCheck;

impl Check for RevenueRecognitionCheck {
    fn name(&self) -> &'static str {
        "revenue_recognition"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let types: Vec<AccountType> = entry
            .lines
            .iter()
            .filter_map(|line| ctx.directory.get(line.account_id))
            .map(|account| account.account_type)
            .collect();

        if !types.iter().any(|t| *t == AccountType::Revenue) {
            return Vec::new();
        }
        let has_counterpart = types
            .iter()
            .any(|t| matches!(t, AccountType::Asset | AccountType::Liability));
        if has_counterpart {
            return Vec::new();
        }

        vec![
            Finding::new(
                entry.id,
                ErrorType::AccountTypeMismatch,
                Severity::Medium,
                "Revenue recognized without a corresponding asset increase or liability decrease"
                    .to_string(),
            )
            .with_correction("Ensure a proper asset (cash/receivable) or liability reduction"),
        ]
    }
}

/// Heuristic check for large expenses that may need to be capitalized.
pub struct ExpenseCapitalizationCheck;

impl ExpenseCapitalizationCheck {
    /// Expenses above this on asset-like accounts are capitalization
    /// candidates.
    const CAPITALIZATION_THRESHOLD: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);
    /// Account-name keywords suggesting an asset rather than an expense.
    const ASSET_KEYWORDS: [&'static str; 4] =
        ["equipment", "software", "improvement", "installation"];
}

impl Check for ExpenseCapitalizationCheck {
    fn name(&self) -> &'static str {
        "expense_capitalization"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for line in &entry.lines {
            let Some(account) = ctx.directory.get(line.account_id) else {
                continue;
            };
            if account.account_type != AccountType::Expense {
                continue;
            }
            let magnitude = line.magnitude();
            if magnitude > Self::CAPITALIZATION_THRESHOLD
                && description_mentions(&account.name, &Self::ASSET_KEYWORDS)
            {
                findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::AccountTypeMismatch,
                        Severity::Medium,
                        format!(
                            "Line {} large expense {} for {} might need capitalization",
                            line.line_number, magnitude, account.name
                        ),
                    )
                    .with_line(line.id)
                    .with_correction("Consider recording this as an asset and depreciating it")
                    .as_heuristic(),
                );
            }
        }

        findings
    }
}

/// Flags amounts exceeding the statistical baseline threshold.
pub struct UnusualAmountCheck;

impl Check for UnusualAmountCheck {
    fn name(&self) -> &'static str {
        "unusual_amount"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for line in &entry.lines {
            let magnitude = line.magnitude();
            if magnitude <= Decimal::ZERO {
                continue;
            }
            // No usable baseline for this account means the checker is
            // silently skipped for the line; detection continues.
            let Some(threshold) = ctx.baseline.threshold(line.account_id) else {
                continue;
            };
            if magnitude > threshold {
                findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::UnusualAmount,
                        Severity::Medium,
                        format!(
                            "Line {} amount {} is unusually large (threshold: {})",
                            line.line_number, magnitude, threshold
                        ),
                    )
                    .with_line(line.id)
                    .with_correction(format!(
                        "Verify the amount against source documents; detection threshold was {threshold}"
                    )),
                );
            }
        }

        findings
    }
}

/// Flags missing entry-level and line-level descriptions.
pub struct MissingDescriptionCheck;

impl Check for MissingDescriptionCheck {
    fn name(&self) -> &'static str {
        "missing_description"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        if entry.description.trim().is_empty() {
            findings.push(
                Finding::new(
                    entry.id,
                    ErrorType::MissingDescription,
                    Severity::Low,
                    format!("Entry {} description is missing", entry.entry_number),
                )
                .with_correction("Add a meaningful description explaining the transaction"),
            );
        }

        for line in &entry.lines {
            if let Some(description) = &line.description {
                if description.trim().is_empty() {
                    findings.push(
                        Finding::new(
                            entry.id,
                            ErrorType::MissingDescription,
                            Severity::Low,
                            format!("Line {} description is empty", line.line_number),
                        )
                        .with_line(line.id)
                        .with_correction("Add a description to clarify this line item"),
                    );
                }
            }
        }

        findings
    }
}

/// Flags future and suspiciously old entry dates.
pub struct DateCheck;

impl Check for DateCheck {
    fn name(&self) -> &'static str {
        "date"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        // One day of grace for clock skew between systems.
        if let Some(grace) = ctx.today.succ_opt() {
            if entry.entry_date > grace {
                findings.push(
                    Finding::new(
                        entry.id,
                        ErrorType::InvalidDate,
                        Severity::Medium,
                        format!("Entry date {} is in the future", entry.entry_date),
                    )
                    .with_correction("Verify the entry date is correct"),
                );
            }
        }

        let staleness_months = u32::try_from(ctx.config.date_staleness_years)
            .unwrap_or(0)
            .saturating_mul(12);
        if staleness_months > 0 {
            if let Some(cutoff) = ctx.today.checked_sub_months(Months::new(staleness_months)) {
                if entry.entry_date < cutoff {
                    findings.push(
                        Finding::new(
                            entry.id,
                            ErrorType::InvalidDate,
                            Severity::Medium,
                            format!(
                                "Entry date {} is more than {} years old",
                                entry.entry_date, ctx.config.date_staleness_years
                            ),
                        )
                        .with_correction("Verify this is not a data entry error")
                        .as_heuristic(),
                    );
                }
            }
        }

        findings
    }
}

/// Heuristic check for large round amounts that may be estimates.
pub struct RoundNumberCheck;

impl RoundNumberCheck {
    /// Amounts below this are never flagged as round.
    const MIN_MAGNITUDE: Decimal = Decimal::ONE_THOUSAND;
    /// The round unit an amount must be a multiple of.
    const ROUND_UNIT: Decimal = Decimal::ONE_THOUSAND;
}

impl Check for RoundNumberCheck {
    fn name(&self) -> &'static str {
        "round_number"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        entry
            .lines
            .iter()
            .filter(|line| {
                let magnitude = line.magnitude();
                magnitude >= Self::MIN_MAGNITUDE && (magnitude % Self::ROUND_UNIT).is_zero()
            })
            .map(|line| {
                Finding::new(
                    entry.id,
                    ErrorType::RoundAmount,
                    Severity::Low,
                    format!(
                        "Line {} round amount {} might be an estimate",
                        line.line_number,
                        line.magnitude()
                    ),
                )
                .with_line(line.id)
                .with_correction("Verify the exact amount if this is not an estimate")
                .as_heuristic()
            })
            .collect()
    }
}

/// Heuristic check for entries dated on a weekend.
pub struct WeekendPostingCheck;

impl Check for WeekendPostingCheck {
    fn name(&self) -> &'static str {
        "weekend_posting"
    }

    fn check(&self, entry: &JournalEntry, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        let weekday = entry.entry_date.weekday();
        if weekday != Weekday::Sat && weekday != Weekday::Sun {
            return Vec::new();
        }

        vec![
            Finding::new(
                entry.id,
                ErrorType::WeekendPosting,
                Severity::Low,
                format!("Entry dated on a weekend: {}", entry.entry_date),
            )
            .with_correction("Consider using the next business day")
            .as_heuristic(),
        ]
    }
}

/// Flags entries with an unusually large number of lines.
pub struct LineCountCheck;

impl Check for LineCountCheck {
    fn name(&self) -> &'static str {
        "line_count"
    }

    fn check(&self, entry: &JournalEntry, ctx: &CheckContext<'_>) -> Vec<Finding> {
        if entry.lines.len() <= ctx.config.max_line_count {
            return Vec::new();
        }

        vec![
            Finding::new(
                entry.id,
                ErrorType::ExcessiveLines,
                Severity::Low,
                format!(
                    "Entry has {} lines - unusually complex (limit: {})",
                    entry.lines.len(),
                    ctx.config.max_line_count
                ),
            )
            .with_correction("Consider breaking into multiple entries or verify all lines are necessary"),
        ]
    }
}
