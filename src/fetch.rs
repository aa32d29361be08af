//! Blocking client for the Data.gov.sg datastore API.
//!
//! Fetches one calendar month of resale records per call, paging with
//! limit/offset until the total the datastore reports has been retrieved.
//! No retries here; callers decide whether a failed month is fatal.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config;
use crate::error::{HdbDashError, Result};
use crate::models::{Month, RawRecord, ResaleTransaction};

/// Source of per-month transaction batches.
///
/// The pipeline runs against this interface; tests substitute a canned
/// implementation so no run touches the network.
pub trait Fetch {
    /// All transactions the upstream dataset records for one month.
    fn fetch_month(&mut self, month: Month) -> Result<Vec<ResaleTransaction>>;
}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// Top-level envelope of the `datastore_search` action.
#[derive(Debug, Deserialize)]
struct DatastoreResponse {
    #[serde(default)]
    success: bool,
    result: Option<DatastoreResult>,
}

#[derive(Debug, Deserialize)]
struct DatastoreResult {
    #[serde(default)]
    records: Vec<RawRecord>,
    #[serde(default)]
    total: u64,
}

// ---------------------------------------------------------------------------
// DataGovClient
// ---------------------------------------------------------------------------

/// Blocking `datastore_search` client for the HDB resale resource.
pub struct DataGovClient {
    endpoint: String,
    resource_id: String,
    timeout: Duration,
    client: Option<Client>,
}

impl DataGovClient {
    /// Client against the production Data.gov.sg endpoint.
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint(config::API_BASE, config::RESALE_RESOURCE_ID, timeout)
    }

    /// Client against an alternative endpoint and resource. Integration
    /// tests point this at a local server that replays canned responses.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        resource_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            resource_id: resource_id.into(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> &Client {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()
                    .expect("failed to build HTTP client"),
            );
        }
        self.client.as_ref().unwrap()
    }

    fn failure(month: Month, reason: impl fmt::Display) -> HdbDashError {
        HdbDashError::FetchFailure {
            month: month.to_string(),
            reason: reason.to_string(),
        }
    }

    /// One page of records for `month`, starting at `offset`.
    fn page(&mut self, month: Month, offset: u64) -> Result<DatastoreResult> {
        let filters = serde_json::json!({ "month": month.to_string() }).to_string();
        let fields = config::FETCH_FIELDS.join(",");
        let limit = config::PAGE_LIMIT.to_string();
        let offset = offset.to_string();

        let client = self.client().clone();
        let resp = client
            .get(&self.endpoint)
            .query(&[
                ("resource_id", self.resource_id.as_str()),
                ("fields", fields.as_str()),
                ("filters", filters.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .map_err(|e| Self::failure(month, e))?
            .error_for_status()
            .map_err(|e| Self::failure(month, e))?;

        let body: DatastoreResponse = resp.json().map_err(|e| Self::failure(month, e))?;
        if !body.success {
            return Err(Self::failure(month, "datastore reported success=false"));
        }
        body.result
            .ok_or_else(|| Self::failure(month, "datastore response missing result"))
    }
}

impl Fetch for DataGovClient {
    fn fetch_month(&mut self, month: Month) -> Result<Vec<ResaleTransaction>> {
        let mut raw: Vec<RawRecord> = Vec::new();
        loop {
            let page = self.page(month, raw.len() as u64)?;
            let count = page.records.len();
            raw.extend(page.records);
            // An empty page guards against a datastore total that never
            // reconciles with the rows it actually serves.
            if count == 0 || raw.len() as u64 >= page.total {
                break;
            }
        }

        eprintln!("Fetched {} resale records for {}", raw.len(), month);
        raw.into_iter().map(RawRecord::into_transaction).collect()
    }
}
