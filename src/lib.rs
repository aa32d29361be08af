//! HDB resale dashboard pipeline.
//!
//! Fetches Singapore public-housing (HDB) resale transactions from the
//! Data.gov.sg datastore, merges them into a locally persisted history,
//! and renders the dashboard's fixed set of Plotly chart artifacts as
//! static HTML files.
//!
//! # Quick start
//!
//! ```no_run
//! use hdb_dash::HdbDash;
//!
//! let mut dash = HdbDash::builder().build().unwrap();
//!
//! // Fetch the current and previous month, merge, re-render all charts.
//! let report = dash.refresh().unwrap();
//! println!("published {} chart(s)", report.artifacts.len());
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod views;

pub use error::{HdbDashError, Result};
pub use fetch::{DataGovClient, Fetch};
pub use history::{History, HistoryStore};
pub use ingest::{EmptyMonthPolicy, MergeReport};
pub use pipeline::RefreshReport;
pub use render::{PlotlyHtmlRenderer, Renderer};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use models::Month;

// ---------------------------------------------------------------------------
// HdbDashBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`HdbDash`] instance.
///
/// Use [`HdbDash::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](HdbDashBuilder::build).
pub struct HdbDashBuilder {
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    timeout: Duration,
    policy: EmptyMonthPolicy,
    endpoint: Option<(String, String)>,
}

impl Default for HdbDashBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            out_dir: None,
            timeout: Duration::from_secs(120),
            policy: EmptyMonthPolicy::default(),
            endpoint: None,
        }
    }
}

impl HdbDashBuilder {
    /// Set the directory holding the history file.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/hdb-dash` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the directory chart artifacts are published to.
    ///
    /// Defaults to `charts` under the working directory.
    pub fn out_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout for datastore calls.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose how a zero-row fetch for a month with persisted history is
    /// merged. Defaults to [`EmptyMonthPolicy::KeepExisting`].
    pub fn empty_month_policy(mut self, policy: EmptyMonthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Point the fetch client at an alternative datastore endpoint and
    /// resource id. Integration tests use this to serve canned responses
    /// from a local server.
    pub fn endpoint(mut self, endpoint: impl Into<String>, resource_id: impl Into<String>) -> Self {
        self.endpoint = Some((endpoint.into(), resource_id.into()));
        self
    }

    /// Build the pipeline facade, creating the data directory if needed.
    ///
    /// Does not touch the network; months are fetched only by
    /// [`refresh`](HdbDash::refresh) and [`backfill`](HdbDash::backfill).
    pub fn build(self) -> Result<HdbDash> {
        let data_dir = self.data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&data_dir)?;
        let out_dir = self.out_dir.unwrap_or_else(config::default_out_dir);

        let client = match self.endpoint {
            Some((endpoint, resource_id)) => {
                DataGovClient::with_endpoint(endpoint, resource_id, self.timeout)
            }
            None => DataGovClient::new(self.timeout),
        };

        Ok(HdbDash {
            client,
            store: HistoryStore::new(&data_dir),
            out_dir,
            policy: self.policy,
        })
    }
}

// ---------------------------------------------------------------------------
// HdbDash
// ---------------------------------------------------------------------------

/// The main entry point for the dashboard pipeline.
///
/// Owns the fetch client, the history store and the output directory, and
/// runs the fetch-merge-persist-render batch on demand.
///
/// Created via [`HdbDash::builder()`].
pub struct HdbDash {
    client: DataGovClient,
    store: HistoryStore,
    out_dir: PathBuf,
    policy: EmptyMonthPolicy,
}

impl HdbDash {
    /// Create a new builder for configuring the pipeline.
    pub fn builder() -> HdbDashBuilder {
        HdbDashBuilder::default()
    }

    /// Refresh the dashboard from the live dataset.
    ///
    /// Targets the current and previous calendar month. Resale records
    /// trickle in for weeks after a month opens, so both months are
    /// refetched wholesale and replace their persisted entries.
    pub fn refresh(&mut self) -> Result<RefreshReport> {
        let current = Month::current();
        self.run(&[current.prev(), current])
    }

    /// Refresh an explicit inclusive month range instead of the rolling
    /// two-month window. Useful for first-time population and for
    /// repairing gaps.
    pub fn backfill(&mut self, from: Month, to: Month) -> Result<RefreshReport> {
        self.run(&Month::range_inclusive(from, to))
    }

    fn run(&mut self, targets: &[Month]) -> Result<RefreshReport> {
        let mut renderer = PlotlyHtmlRenderer::new(&self.out_dir);
        pipeline::run(
            &mut self.client,
            &self.store,
            &mut renderer,
            targets,
            self.policy,
        )
    }

    /// Load the currently persisted history.
    pub fn history(&self) -> Result<History> {
        self.store.load()
    }

    /// The store holding the persisted history file.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The directory chart artifacts are published to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for HdbDash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HdbDash(history={}, charts={})",
            self.store.path().display(),
            self.out_dir.display()
        )
    }
}
