//! Account similarity scoring for substitute-account proposals.

use ledgerlint_shared::types::AccountId;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::journal::{Account, AccountDirectory};

/// Weight for a matching account type.
const TYPE_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5
/// Weight for a matching account subtype.
const SUBTYPE_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1); // 0.2
/// Weight scaling the name/keyword token overlap.
const OVERLAP_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1); // 0.2
/// Weight for a matching normal balance.
const NORMAL_BALANCE_WEIGHT: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

/// Ranks alternate accounts for a misclassified line.
///
/// Candidates below the similarity floor are dropped; at most `limit`
/// are returned. Ties are broken by account code ascending, so the
/// ranking is fully deterministic.
#[derive(Debug, Clone)]
pub struct AccountSimilarityScorer {
    floor: Decimal,
    limit: usize,
}

impl Default for AccountSimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountSimilarityScorer {
    /// Creates a scorer with the default floor (0.3) and limit (3).
    #[must_use]
    pub fn new() -> Self {
        Self {
            floor: Decimal::new(3, 1),
            limit: 3,
        }
    }

    /// Creates a scorer with a custom floor and candidate limit.
    #[must_use]
    pub const fn with_limits(floor: Decimal, limit: usize) -> Self {
        Self { floor, limit }
    }

    /// Ranks active alternate accounts for `target`, using the entry
    /// description as additional keyword context.
    ///
    /// Returns an empty list (not an error) when nothing clears the
    /// floor.
    #[must_use]
    pub fn suggest_accounts(
        &self,
        target: &Account,
        directory: &AccountDirectory,
        context: &str,
    ) -> Vec<(AccountId, Decimal)> {
        let mut reference_tokens = tokens(&target.name);
        reference_tokens.extend(tokens(context));

        let mut scored: Vec<(&Account, Decimal)> = directory
            .iter()
            .filter(|candidate| candidate.id != target.id && candidate.is_active)
            .map(|candidate| (candidate, score(target, candidate, &reference_tokens)))
            .filter(|(_, value)| *value >= self.floor)
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.code.cmp(&b.0.code)));
        scored.truncate(self.limit);
        scored
            .into_iter()
            .map(|(candidate, value)| (candidate.id, value))
            .collect()
    }
}

fn score(target: &Account, candidate: &Account, reference_tokens: &BTreeSet<String>) -> Decimal {
    let mut value = Decimal::ZERO;

    if candidate.account_type == target.account_type {
        value += TYPE_WEIGHT;
    }
    if let (Some(a), Some(b)) = (&target.subtype, &candidate.subtype) {
        if a == b {
            value += SUBTYPE_WEIGHT;
        }
    }
    value += OVERLAP_WEIGHT * jaccard(&tokens(&candidate.name), reference_tokens);
    if candidate.normal_balance == target.normal_balance {
        value += NORMAL_BALANCE_WEIGHT;
    }

    value
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Decimal {
    let union = a.union(b).count();
    if union == 0 {
        return Decimal::ZERO;
    }
    let shared = a.intersection(b).count();
    Decimal::from(shared) / Decimal::from(union)
}
