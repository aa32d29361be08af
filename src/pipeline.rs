//! The refresh pipeline: fetch, merge, persist, aggregate, render.
//!
//! One synchronous batch per call. Any stage failure aborts the run before
//! `publish`, so the output directory never shows a partially refreshed
//! chart set; the returned error names the stage that failed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config;
use crate::error::{Result, Stage};
use crate::fetch::Fetch;
use crate::history::HistoryStore;
use crate::ingest::{self, EmptyMonthPolicy, MergeReport};
use crate::models::{Granularity, Month, Quarter, ResaleTransaction};
use crate::render::Renderer;
use crate::views::{ViewKind, ViewSet};

// ---------------------------------------------------------------------------
// Chart plans
// ---------------------------------------------------------------------------

/// One artifact of the fixed dashboard set.
pub struct ChartPlan {
    pub artifact: &'static str,
    pub title: &'static str,
    pub kind: ViewKind,
    pub granularity: Granularity,
    /// Restrict input to transactions whose quarter is at or after this.
    pub window: Option<Quarter>,
}

/// The eight dashboard charts, in publish order. Quarterly charts cover
/// the full history; monthly charts cover the recent window.
pub fn chart_plans() -> Vec<ChartPlan> {
    let recent = Some(config::monthly_window_start());
    vec![
        ChartPlan {
            artifact: "qtr_boxplot.html",
            title: "By Quarters - Public Home Price Distributions From 2013",
            kind: ViewKind::Distribution,
            granularity: Granularity::Quarter,
            window: None,
        },
        ChartPlan {
            artifact: "mth_boxplot.html",
            title: "By Months - Public Home Price Distributions From 2020",
            kind: ViewKind::Distribution,
            granularity: Granularity::Month,
            window: recent,
        },
        ChartPlan {
            artifact: "qtr_barline_chart.html",
            title: "By Quarters - % of Million Dollar Public Home Sales [Line] & Total Sales Public Home Sales [Bar]",
            kind: ViewKind::ThresholdRatio,
            granularity: Granularity::Quarter,
            window: None,
        },
        ChartPlan {
            artifact: "mth_barline_chart.html",
            title: "By Months - % of Million Dollar Public Home Sales [Line] & Total Sales Public Home Sales [Bar]",
            kind: ViewKind::ThresholdRatio,
            granularity: Granularity::Month,
            window: recent,
        },
        ChartPlan {
            artifact: "qtr_stack_bar_values.html",
            title: "By Quarters - No. of Public Home Resales by Price Categories from 2013",
            kind: ViewKind::BracketCount,
            granularity: Granularity::Quarter,
            window: None,
        },
        ChartPlan {
            artifact: "mth_stack_bar_values.html",
            title: "By Months - No. of Public Home Resales by Price Categories from 2020",
            kind: ViewKind::BracketCount,
            granularity: Granularity::Month,
            window: recent,
        },
        ChartPlan {
            artifact: "qtr_stack_bar_percent.html",
            title: "By Quarters - % of Public Home Sales by Price Categories from 2013",
            kind: ViewKind::BracketPercentage,
            granularity: Granularity::Quarter,
            window: None,
        },
        ChartPlan {
            artifact: "mth_stack_bar_percent.html",
            title: "By Months - % of Public Home Sales by Price Categories from 2020",
            kind: ViewKind::BracketPercentage,
            granularity: Granularity::Month,
            window: recent,
        },
    ]
}

// ---------------------------------------------------------------------------
// Refresh run
// ---------------------------------------------------------------------------

/// Outcome of one refresh run.
#[derive(Debug)]
pub struct RefreshReport {
    /// Row count fetched per target month.
    pub fetched: BTreeMap<Month, usize>,
    pub merge: MergeReport,
    /// Published artifact paths, in publish order.
    pub artifacts: Vec<PathBuf>,
}

/// Run one refresh batch over `targets`.
///
/// Fetches every target month, merges into the persisted history, saves,
/// rebuilds all dashboard views over the merged set, renders and finally
/// publishes. Stage order means a failed fetch leaves the history file
/// untouched and a failed render leaves the published charts untouched.
pub fn run<F: Fetch, R: Renderer>(
    fetcher: &mut F,
    store: &HistoryStore,
    renderer: &mut R,
    targets: &[Month],
    policy: EmptyMonthPolicy,
) -> Result<RefreshReport> {
    let mut fetched = BTreeMap::new();
    let mut counts = BTreeMap::new();
    for &month in targets {
        let rows = fetcher
            .fetch_month(month)
            .map_err(|e| e.at_stage(Stage::Fetch))?;
        counts.insert(month, rows.len());
        fetched.insert(month, rows);
    }

    let history = store.load().map_err(|e| e.at_stage(Stage::History))?;
    let (merged, merge_report) = ingest::merge(history, fetched, policy);
    for month in &merge_report.kept {
        eprintln!("Empty fetch for {}; keeping persisted rows", month);
    }
    store
        .save(&merged)
        .map_err(|e| e.at_stage(Stage::History))?;

    // Months iterate in ascending key order, so the flattened rows are
    // already chronological.
    let rows: Vec<ResaleTransaction> = merged.into_values().flatten().collect();

    for plan in chart_plans() {
        let mut set = ViewSet::new(&rows, plan.granularity);
        if let Some(from) = plan.window {
            set = set.since(from);
        }
        let view = set
            .build(plan.kind)
            .map_err(|e| e.at_stage(Stage::Aggregate))?;
        renderer
            .render(&view, plan.title, plan.granularity, plan.artifact)
            .map_err(|e| e.at_stage(Stage::Render))?;
    }

    let artifacts = renderer
        .publish()
        .map_err(|e| e.at_stage(Stage::Render))?;

    Ok(RefreshReport {
        fetched: counts,
        merge: merge_report,
        artifacts,
    })
}
