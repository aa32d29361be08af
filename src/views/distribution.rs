//! Per-period price distribution rows.

use std::collections::BTreeMap;

use crate::models::PeriodKey;
use crate::views::HIGH_MEDIAN_MIN;

/// One period's full price distribution, ready for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub period: PeriodKey,
    /// Every price in the period, ascending.
    pub prices: Vec<f64>,
    pub median: f64,
    /// Whether the median reaches [`HIGH_MEDIAN_MIN`].
    pub high_median: bool,
}

pub(crate) fn build(buckets: BTreeMap<PeriodKey, Vec<f64>>) -> Vec<DistributionRow> {
    buckets
        .into_iter()
        .map(|(period, mut prices)| {
            prices.sort_by(f64::total_cmp);
            let median = median_of_sorted(&prices);
            DistributionRow {
                period,
                prices,
                median,
                high_median: median >= HIGH_MEDIAN_MIN,
            }
        })
        .collect()
}

/// Median of an ascending slice: middle element for odd lengths, mean of
/// the two middle elements for even. Buckets are never empty (a period
/// only exists once it has a priced transaction).
fn median_of_sorted(prices: &[f64]) -> f64 {
    let n = prices.len();
    if n % 2 == 1 {
        prices[n / 2]
    } else {
        (prices[n / 2 - 1] + prices[n / 2]) / 2.0
    }
}
