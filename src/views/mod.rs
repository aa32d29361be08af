//! Summary views over the merged transaction set.
//!
//! Four chart-feeding aggregations, each a pure function from an immutable
//! transaction slice to ordered summary rows: price distribution per period,
//! million-dollar ratio per period, and bracketed counts/percentage shares
//! per period. Rows without a price are excluded everywhere (every view is
//! price-based), and periods always come out in chronological order.

pub mod brackets;
pub mod distribution;
pub mod threshold;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{Granularity, Month, PeriodKey, Quarter, ResaleTransaction};

pub use brackets::{BracketCountRow, BracketShareRow};
pub use distribution::DistributionRow;
pub use threshold::ThresholdRatioRow;

/// Transactions priced at or above this count toward the million-dollar
/// ratio.
pub const MILLION_DOLLAR_MIN: f64 = 1_000_000.0;

/// A period whose median price reaches this value is tagged high-median.
pub const HIGH_MEDIAN_MIN: f64 = 500_000.0;

// ---------------------------------------------------------------------------
// ViewKind and SummaryView
// ---------------------------------------------------------------------------

/// The four summary view kinds handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Distribution,
    ThresholdRatio,
    BracketCount,
    BracketPercentage,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Distribution => "distribution",
            ViewKind::ThresholdRatio => "threshold-ratio",
            ViewKind::BracketCount => "bracket-count",
            ViewKind::BracketPercentage => "bracket-percentage",
        }
    }
}

/// A materialized summary view: ordered rows plus their declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryView {
    Distribution(Vec<DistributionRow>),
    ThresholdRatio(Vec<ThresholdRatioRow>),
    BracketCount(Vec<BracketCountRow>),
    BracketPercentage(Vec<BracketShareRow>),
}

impl SummaryView {
    pub fn kind(&self) -> ViewKind {
        match self {
            SummaryView::Distribution(_) => ViewKind::Distribution,
            SummaryView::ThresholdRatio(_) => ViewKind::ThresholdRatio,
            SummaryView::BracketCount(_) => ViewKind::BracketCount,
            SummaryView::BracketPercentage(_) => ViewKind::BracketPercentage,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SummaryView::Distribution(rows) => rows.is_empty(),
            SummaryView::ThresholdRatio(rows) => rows.is_empty(),
            SummaryView::BracketCount(rows) => rows.is_empty(),
            SummaryView::BracketPercentage(rows) => rows.is_empty(),
        }
    }

    /// The earliest period in the view, if any.
    pub fn first_period(&self) -> Option<PeriodKey> {
        match self {
            SummaryView::Distribution(rows) => rows.first().map(|r| r.period),
            SummaryView::ThresholdRatio(rows) => rows.first().map(|r| r.period),
            SummaryView::BracketCount(rows) => rows.first().map(|r| r.period),
            SummaryView::BracketPercentage(rows) => rows.first().map(|r| r.period),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewSet
// ---------------------------------------------------------------------------

/// How period derivation treats records whose month does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeriveMode {
    /// Fail the whole view on the first unparseable month (the default).
    #[default]
    Strict,
    /// Skip unparseable records; [`ViewSet::invalid_rows`] reports them.
    BestEffort,
}

/// Borrowing view builder over a transaction slice.
///
/// Strict by default; [`best_effort`](Self::best_effort) opts into
/// skip-and-report. [`since`](Self::since) restricts the input to
/// transactions whose derived quarter is at or after a cutoff, which is how
/// the month-granularity charts window recent history.
pub struct ViewSet<'a> {
    rows: &'a [ResaleTransaction],
    granularity: Granularity,
    mode: DeriveMode,
    window: Option<Quarter>,
}

impl<'a> ViewSet<'a> {
    pub fn new(rows: &'a [ResaleTransaction], granularity: Granularity) -> Self {
        Self {
            rows,
            granularity,
            mode: DeriveMode::Strict,
            window: None,
        }
    }

    /// Skip records with unparseable months instead of failing.
    pub fn best_effort(mut self) -> Self {
        self.mode = DeriveMode::BestEffort;
        self
    }

    /// Only aggregate transactions whose derived quarter is >= `from`.
    pub fn since(mut self, from: Quarter) -> Self {
        self.window = Some(from);
        self
    }

    /// Per-period price distribution with medians.
    pub fn distribution(&self) -> Result<Vec<DistributionRow>> {
        Ok(distribution::build(self.priced_buckets()?))
    }

    /// Per-period million-dollar transaction ratio.
    pub fn million_ratio(&self) -> Result<Vec<ThresholdRatioRow>> {
        Ok(threshold::build(self.priced_buckets()?))
    }

    /// Per-(period, bracket) transaction counts, zero-filled across the
    /// full bracket set.
    pub fn bracket_counts(&self) -> Result<Vec<BracketCountRow>> {
        brackets::counts(self.priced_buckets()?)
    }

    /// Per-(period, bracket) percentage shares of the period total.
    pub fn bracket_shares(&self) -> Result<Vec<BracketShareRow>> {
        brackets::shares(self.priced_buckets()?)
    }

    /// Build the view of the requested kind.
    pub fn build(&self, kind: ViewKind) -> Result<SummaryView> {
        Ok(match kind {
            ViewKind::Distribution => SummaryView::Distribution(self.distribution()?),
            ViewKind::ThresholdRatio => SummaryView::ThresholdRatio(self.million_ratio()?),
            ViewKind::BracketCount => SummaryView::BracketCount(self.bracket_counts()?),
            ViewKind::BracketPercentage => SummaryView::BracketPercentage(self.bracket_shares()?),
        })
    }

    /// Records whose month field does not parse, for best-effort reporting.
    pub fn invalid_rows(&self) -> Vec<&'a ResaleTransaction> {
        self.rows
            .iter()
            .filter(|r| Month::parse(&r.month).is_err())
            .collect()
    }

    /// Group the prices of every priced transaction by period key.
    ///
    /// Records without a price are excluded; a period therefore only
    /// appears if it has at least one priced transaction. In strict mode
    /// the first unparseable month fails the whole grouping.
    fn priced_buckets(&self) -> Result<BTreeMap<PeriodKey, Vec<f64>>> {
        let mut buckets: BTreeMap<PeriodKey, Vec<f64>> = BTreeMap::new();

        for row in self.rows {
            let month = match Month::parse(&row.month) {
                Ok(month) => month,
                Err(e) => match self.mode {
                    DeriveMode::Strict => return Err(e),
                    DeriveMode::BestEffort => continue,
                },
            };
            if let Some(from) = self.window {
                if month.quarter() < from {
                    continue;
                }
            }
            let price = match row.resale_price {
                Some(p) => p,
                None => continue,
            };
            buckets
                .entry(self.granularity.bucket(month))
                .or_default()
                .push(price);
        }

        Ok(buckets)
    }
}

/// Round to `places` decimal places, half away from zero.
pub(crate) fn round_dp(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
