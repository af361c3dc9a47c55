//! Finding types: the detection engine's output.

use chrono::{DateTime, Utc};
use ledgerlint_shared::types::{EntryId, FindingId, LineId};
use serde::{Deserialize, Serialize};

/// How serious a finding is.
///
/// Variant order is the sort order: HIGH findings come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Must be fixed before the entry can be trusted.
    High,
    /// Needs review; may be legitimate.
    Medium,
    /// Advisory.
    Low,
}

/// The taxonomy of detectable posting errors.
///
/// Open for extension: a new checker introduces its variant here and is
/// registered alongside the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Debits do not equal credits.
    UnbalancedEntry,
    /// Line references an unknown or inactive account.
    InvalidAccount,
    /// A line carries a negative debit or credit amount.
    NegativeAmount,
    /// A line has neither a debit nor a credit amount.
    ZeroAmount,
    /// A line carries both a debit and a credit amount.
    DualSidedLine,
    /// Account usage is inconsistent with its type or context.
    AccountTypeMismatch,
    /// Amount exceeds the statistical baseline threshold.
    UnusualAmount,
    /// Entry or line description is missing.
    MissingDescription,
    /// Entry date is in the future or suspiciously old.
    InvalidDate,
    /// Amount is a suspiciously round number.
    RoundAmount,
    /// Entry is dated on a weekend.
    WeekendPosting,
    /// Entry has an unusually large number of lines.
    ExcessiveLines,
    /// Near-identical entry exists within the lookback window.
    DuplicateEntry,
    /// Entry cannot be interpreted at all (e.g., zero lines).
    MalformedEntry,
}

impl ErrorType {
    /// Stable code for reports and persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnbalancedEntry => "UNBALANCED_ENTRY",
            Self::InvalidAccount => "INVALID_ACCOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::DualSidedLine => "DUAL_SIDED_LINE",
            Self::AccountTypeMismatch => "ACCOUNT_TYPE_MISMATCH",
            Self::UnusualAmount => "UNUSUAL_AMOUNT",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::InvalidDate => "INVALID_DATE",
            Self::RoundAmount => "ROUND_AMOUNT",
            Self::WeekendPosting => "WEEKEND_POSTING",
            Self::ExcessiveLines => "EXCESSIVE_LINES",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::MalformedEntry => "MALFORMED_ENTRY",
        }
    }
}

/// A single detected problem on an entry (or one of its lines).
///
/// Created by the detection engine; the resolution fields are written
/// only by an external review workflow, never by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// The finding ID.
    pub id: FindingId,
    /// The entry this finding is about.
    pub entry_id: EntryId,
    /// The specific line, when the problem is line-scoped.
    pub line_id: Option<LineId>,
    /// The kind of error detected.
    pub error_type: ErrorType,
    /// How serious the finding is.
    pub severity: Severity,
    /// Human-readable description of the problem.
    pub description: String,
    /// Short remediation hint set by the checker.
    pub suggested_correction: Option<String>,
    /// True for confidence-limited heuristic checks, so callers can
    /// separate them from deterministic findings.
    pub heuristic: bool,
    /// Whether a reviewer has resolved this finding.
    pub is_resolved: bool,
    /// Who resolved it.
    pub resolved_by: Option<String>,
    /// Reviewer notes.
    pub resolution_notes: Option<String>,
    /// When it was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Finding {
    /// Creates an unresolved entry-level finding.
    #[must_use]
    pub fn new(
        entry_id: EntryId,
        error_type: ErrorType,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: FindingId::new(),
            entry_id,
            line_id: None,
            error_type,
            severity,
            description: description.into(),
            suggested_correction: None,
            heuristic: false,
            is_resolved: false,
            resolved_by: None,
            resolution_notes: None,
            resolved_at: None,
        }
    }

    /// Scopes the finding to a specific line.
    #[must_use]
    pub fn with_line(mut self, line_id: LineId) -> Self {
        self.line_id = Some(line_id);
        self
    }

    /// Attaches a remediation hint.
    #[must_use]
    pub fn with_correction(mut self, correction: impl Into<String>) -> Self {
        self.suggested_correction = Some(correction.into());
        self
    }

    /// Marks the finding as produced by a heuristic check.
    #[must_use]
    pub fn as_heuristic(mut self) -> Self {
        self.heuristic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
    }

    #[test]
    fn test_error_type_codes() {
        assert_eq!(ErrorType::UnbalancedEntry.as_str(), "UNBALANCED_ENTRY");
        assert_eq!(ErrorType::DuplicateEntry.as_str(), "DUPLICATE_ENTRY");
        assert_eq!(ErrorType::MalformedEntry.as_str(), "MALFORMED_ENTRY");
    }

    #[test]
    fn test_finding_builder() {
        let entry_id = EntryId::new();
        let line_id = LineId::new();
        let finding = Finding::new(
            entry_id,
            ErrorType::RoundAmount,
            Severity::Low,
            "Round amount 5000 might be an estimate",
        )
        .with_line(line_id)
        .with_correction("Verify exact amount if this is not an estimate")
        .as_heuristic();

        assert_eq!(finding.entry_id, entry_id);
        assert_eq!(finding.line_id, Some(line_id));
        assert!(finding.heuristic);
        assert!(!finding.is_resolved);
        assert!(finding.suggested_correction.is_some());
    }
}
