//! Per-period, per-bracket counts and percentage shares.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{PeriodKey, PriceBracket};
use crate::views::round_dp;

/// Transaction count for one (period, bracket) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketCountRow {
    pub period: PeriodKey,
    pub bracket: PriceBracket,
    pub count: u64,
}

/// Percentage share of one bracket within its period.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketShareRow {
    pub period: PeriodKey,
    pub bracket: PriceBracket,
    pub count: u64,
    /// Share of the period's priced transactions, rounded to one decimal
    /// place.
    pub pct: f64,
}

/// Counts per (period, bracket), period-major and bracket-ordered, with
/// zero rows for brackets absent from a period.
pub(crate) fn counts(buckets: BTreeMap<PeriodKey, Vec<f64>>) -> Result<Vec<BracketCountRow>> {
    let mut rows = Vec::with_capacity(buckets.len() * PriceBracket::ALL.len());
    for (period, prices) in buckets {
        for (bracket, count) in tally(&prices)? {
            rows.push(BracketCountRow {
                period,
                bracket,
                count,
            });
        }
    }
    Ok(rows)
}

/// Like [`counts`], with each cell's share of its period total.
pub(crate) fn shares(buckets: BTreeMap<PeriodKey, Vec<f64>>) -> Result<Vec<BracketShareRow>> {
    let mut rows = Vec::with_capacity(buckets.len() * PriceBracket::ALL.len());
    for (period, prices) in buckets {
        let total = prices.len() as f64;
        for (bracket, count) in tally(&prices)? {
            rows.push(BracketShareRow {
                period,
                bracket,
                count,
                pct: round_dp(count as f64 / total * 100.0, 1),
            });
        }
    }
    Ok(rows)
}

/// Count prices per bracket, in bracket order, including zero cells.
fn tally(prices: &[f64]) -> Result<Vec<(PriceBracket, u64)>> {
    let mut counts = [0u64; PriceBracket::ALL.len()];
    for &price in prices {
        counts[PriceBracket::classify(price)? as usize] += 1;
    }
    Ok(PriceBracket::ALL.into_iter().zip(counts).collect())
}
