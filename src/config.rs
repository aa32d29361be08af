use std::path::PathBuf;

use crate::models::period::Quarter;

pub const API_BASE: &str = "https://data.gov.sg/api/action/datastore_search";
pub const RESALE_RESOURCE_ID: &str = "d_8b84c4ee58e3cfc0ece0d773c8ca6abc";

/// Columns requested from the resale resource, in upstream order.
pub const FETCH_FIELDS: [&str; 6] = [
    "month",
    "town",
    "floor_area_sqm",
    "flat_type",
    "lease_commence_date",
    "resale_price",
];

/// Rows requested per datastore page. The client keeps paging until the
/// reported total is retrieved, so this only bounds response size.
pub const PAGE_LIMIT: usize = 10_000;

pub const HISTORY_FILE: &str = "resale_history.json";

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

/// Earliest quarter included in the month-granularity charts. Quarterly
/// charts always cover the full history.
pub fn monthly_window_start() -> Quarter {
    Quarter::new(2020, 1)
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("hdb-dash")
    } else {
        PathBuf::from(".hdb-dash")
    }
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("charts")
}
