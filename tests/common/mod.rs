//! Shared test fixtures for the hdb-dash integration tests.
//!
//! Provides month and transaction builders so tests can exercise merging,
//! aggregation and rendering without touching the network.

use hdb_dash::models::{Month, ResaleTransaction};

/// Parse a `YYYY-MM` label into a [`Month`].
pub fn month(s: &str) -> Month {
    Month::parse(s).unwrap()
}

/// A minimal transaction: month plus optional price.
pub fn tx(month: &str, price: Option<f64>) -> ResaleTransaction {
    ResaleTransaction {
        month: month.to_string(),
        town: Some("ANG MO KIO".to_string()),
        flat_type: Some("4 ROOM".to_string()),
        floor_area_sqm: Some(93.0),
        lease_commence_date: Some(1986),
        resale_price: price,
    }
}

/// A batch of priced transactions in one month.
pub fn priced(month_label: &str, prices: &[f64]) -> Vec<ResaleTransaction> {
    prices.iter().map(|&p| tx(month_label, Some(p))).collect()
}
