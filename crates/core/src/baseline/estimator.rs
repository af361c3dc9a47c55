//! Amount distribution estimation over posted line history.
//!
//! The baseline is rebuilt for every batch run from the history the
//! caller supplies; it is never persisted, so it cannot go stale.

use ledgerlint_shared::types::AccountId;
use ledgerlint_shared::DetectionConfig;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Mean and population standard deviation of a group of amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineStats {
    /// Arithmetic mean of the amounts.
    pub mean: Decimal,
    /// Population standard deviation of the amounts.
    pub std_dev: Decimal,
    /// Number of amounts in the group.
    pub sample_count: usize,
}

impl BaselineStats {
    /// Computes stats over a group of amounts. Returns `None` for an
    /// empty group.
    #[must_use]
    pub fn from_amounts(amounts: &[Decimal]) -> Option<Self> {
        if amounts.is_empty() {
            return None;
        }

        let count = Decimal::from(amounts.len());
        let mean = amounts.iter().copied().sum::<Decimal>() / count;
        let variance = amounts
            .iter()
            .map(|amount| {
                let diff = *amount - mean;
                diff * diff
            })
            .sum::<Decimal>()
            / count;

        Some(Self {
            mean,
            // Variance is non-negative, so sqrt cannot fail.
            std_dev: variance.sqrt().unwrap_or(Decimal::ZERO),
            sample_count: amounts.len(),
        })
    }
}

/// Per-account amount baselines with a global fallback.
///
/// Accounts with fewer than `min_baseline_sample` historical amounts
/// fall back to the distribution across all accounts, so sparse data
/// does not produce spurious thresholds.
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    per_account: HashMap<AccountId, BaselineStats>,
    global: Option<BaselineStats>,
    multiplier: Decimal,
    min_sample: usize,
}

impl Baseline {
    /// Builds the baseline from per-account historical line magnitudes.
    ///
    /// Zero and negative amounts are dropped before estimation. With no
    /// usable history at all, unusual-amount detection is disabled for
    /// the run (a notice is logged, nothing is raised).
    #[must_use]
    pub fn from_history(
        history: &HashMap<AccountId, Vec<Decimal>>,
        config: &DetectionConfig,
    ) -> Self {
        let mut per_account = HashMap::new();
        let mut all_amounts = Vec::new();

        for (account_id, amounts) in history {
            let positive: Vec<Decimal> = amounts
                .iter()
                .copied()
                .filter(|amount| *amount > Decimal::ZERO)
                .collect();
            all_amounts.extend_from_slice(&positive);

            if let Some(stats) = BaselineStats::from_amounts(&positive) {
                per_account.insert(*account_id, stats);
            }
        }

        let global = BaselineStats::from_amounts(&all_amounts);
        if global.is_none() {
            warn!("no historical amounts available; unusual-amount detection disabled for this run");
        } else {
            debug!(
                accounts = per_account.len(),
                samples = all_amounts.len(),
                "amount baseline built"
            );
        }

        Self {
            per_account,
            global,
            multiplier: config.amount_threshold_multiplier,
            min_sample: config.min_baseline_sample,
        }
    }

    /// Returns the stats used for an account: its own when the sample
    /// is large enough, otherwise the global fallback.
    #[must_use]
    pub fn stats_for(&self, account_id: AccountId) -> Option<&BaselineStats> {
        match self.per_account.get(&account_id) {
            Some(stats) if stats.sample_count >= self.min_sample => Some(stats),
            _ => self.global.as_ref(),
        }
    }

    /// Outlier threshold for an account: `mean + k * std_dev`.
    ///
    /// Returns `None` when there is no usable history or the group has
    /// no variation (a zero standard deviation would flag every amount
    /// above the mean).
    #[must_use]
    pub fn threshold(&self, account_id: AccountId) -> Option<Decimal> {
        let stats = self.stats_for(account_id)?;
        if stats.std_dev.is_zero() {
            return None;
        }
        Some(stats.mean + self.multiplier * stats.std_dev)
    }
}
