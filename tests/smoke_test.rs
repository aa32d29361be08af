//! Live smoke test against the real Data.gov.sg datastore.
//!
//! Fetches two historical months, renders the full dashboard into a temp
//! directory and checks the published artifacts.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use hdb_dash::models::{Granularity, Month};
use hdb_dash::pipeline::chart_plans;
use hdb_dash::views::ViewSet;
use hdb_dash::HdbDash;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Print a section header to stderr.
fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

/// Counters for pass/fail reporting.
struct Counters {
    pass: usize,
    fail: usize,
}

impl Counters {
    fn new() -> Self {
        Self { pass: 0, fail: 0 }
    }

    fn check(&mut self, label: &str, condition: bool, detail: &str) {
        let status = if condition { "PASS" } else { "FAIL" };
        if condition {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        if detail.is_empty() {
            eprintln!("  [{}] {}", status, label);
        } else {
            eprintln!("  [{}] {} -- {}", status, label, detail);
        }
    }
}

// ---------------------------------------------------------------------------
// Main smoke test
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn smoke_test() {
    let data_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let mut c = Counters::new();

    let mut dash = HdbDash::builder()
        .data_dir(data_dir.path())
        .out_dir(out_dir.path())
        .build()
        .unwrap();

    // ================================================================
    // 1. BACKFILL
    // ================================================================
    section("Backfill 2024-01..2024-02");

    let from = Month::new(2024, 1).unwrap();
    let to = Month::new(2024, 2).unwrap();
    let report = dash.backfill(from, to).unwrap();

    c.check(
        "both months fetched",
        report.fetched.len() == 2,
        &format!("months={}", report.fetched.len()),
    );
    for (month, count) in &report.fetched {
        c.check(
            &format!("{} has records", month),
            *count > 0,
            &format!("records={}", count),
        );
    }
    c.check(
        "both months merged as new",
        report.merge.added.len() == 2,
        &format!("added={:?}", report.merge.added),
    );

    // ================================================================
    // 2. ARTIFACTS
    // ================================================================
    section("Published artifacts");

    c.check(
        "eight charts published",
        report.artifacts.len() == 8,
        &format!("artifacts={}", report.artifacts.len()),
    );
    for plan in chart_plans() {
        let path = out_dir.path().join(plan.artifact);
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        c.check(plan.artifact, size > 0, &format!("bytes={}", size));
    }

    // ================================================================
    // 3. HISTORY
    // ================================================================
    section("Persisted history");

    c.check("history file exists", dash.store().path().exists(), "");

    let history = dash.history().unwrap();
    c.check(
        "history holds both months",
        history.len() == 2,
        &format!("months={}", history.len()),
    );

    let rows: Vec<_> = history.into_values().flatten().collect();
    let distribution = ViewSet::new(&rows, Granularity::Quarter)
        .distribution()
        .unwrap();
    c.check(
        "quarterly distribution is non-empty",
        !distribution.is_empty(),
        &format!("periods={}", distribution.len()),
    );
    if let Some(first) = distribution.first() {
        c.check(
            "median is plausible",
            first.median > 100_000.0 && first.median < 3_000_000.0,
            &format!("median={}", first.median),
        );
    }

    // ================================================================
    // 4. DISPLAY
    // ================================================================
    section("Display");

    let display = format!("{}", dash);
    c.check(
        "Display impl",
        display.contains("HdbDash"),
        &format!("display={}", display),
    );

    // ================================================================
    // SUMMARY
    // ================================================================
    section("SMOKE TEST COMPLETE");

    eprintln!("  Passed:  {}", c.pass);
    eprintln!("  Failed:  {}", c.fail);
    eprintln!();

    assert_eq!(c.fail, 0, "{} smoke test checks failed", c.fail);
}
