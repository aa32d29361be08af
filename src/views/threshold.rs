//! Per-period million-dollar transaction ratios.

use std::collections::BTreeMap;

use crate::models::PeriodKey;
use crate::views::{round_dp, MILLION_DOLLAR_MIN};

/// One period's million-dollar transaction tally and share.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRatioRow {
    pub period: PeriodKey,
    /// Transactions priced at or above [`MILLION_DOLLAR_MIN`].
    pub million_count: u64,
    /// All priced transactions in the period.
    pub total_count: u64,
    /// `million_count / total_count` as a percentage, rounded to two
    /// decimal places.
    pub million_pct: f64,
}

pub(crate) fn build(buckets: BTreeMap<PeriodKey, Vec<f64>>) -> Vec<ThresholdRatioRow> {
    buckets
        .into_iter()
        .map(|(period, prices)| {
            let total_count = prices.len() as u64;
            let million_count = prices.iter().filter(|&&p| p >= MILLION_DOLLAR_MIN).count() as u64;
            ThresholdRatioRow {
                period,
                million_count,
                total_count,
                million_pct: round_dp(million_count as f64 / total_count as f64 * 100.0, 2),
            }
        })
        .collect()
}
