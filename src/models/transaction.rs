//! Resale transaction records, wire and typed forms.

use serde::{Deserialize, Serialize};

use crate::error::{HdbDashError, Result};
use crate::models::period::Month;

// ---------------------------------------------------------------------------
// ResaleTransaction — validated record, as stored in history
// ---------------------------------------------------------------------------

/// One resale transaction. Field names follow the upstream resource schema.
///
/// Everything except `month` is optional: the datastore omits columns it has
/// no value for, and rows without a price are excluded from price-based
/// aggregates downstream. Records are immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleTransaction {
    /// Transaction month label, `YYYY-MM`. Always parseable for records
    /// produced by the fetch client; history read from disk is re-validated
    /// when views derive period keys.
    pub month: String,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub flat_type: Option<String>,
    #[serde(default)]
    pub floor_area_sqm: Option<f64>,
    #[serde(default)]
    pub lease_commence_date: Option<u16>,
    #[serde(default)]
    pub resale_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// RawRecord — string-typed wire row from the datastore
// ---------------------------------------------------------------------------

/// A row exactly as the datastore returns it: every field a string, every
/// field optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub month: Option<String>,
    pub town: Option<String>,
    pub flat_type: Option<String>,
    pub floor_area_sqm: Option<String>,
    pub lease_commence_date: Option<String>,
    pub resale_price: Option<String>,
}

impl RawRecord {
    /// Convert to a validated [`ResaleTransaction`].
    ///
    /// Numeric fields are parsed explicitly: an absent or empty field is
    /// `None`, a malformed one is `InvalidRecord` naming the field, and a
    /// negative or non-finite price is `PriceOutOfRange`. The month must
    /// parse as `YYYY-MM`. Nothing is dropped silently.
    pub fn into_transaction(self) -> Result<ResaleTransaction> {
        let month = self.month.unwrap_or_default();
        Month::parse(&month)?;

        let resale_price = parse_optional_f64("resale_price", self.resale_price)?;
        if let Some(price) = resale_price {
            if !price.is_finite() || price < 0.0 {
                return Err(HdbDashError::PriceOutOfRange(price));
            }
        }
        let floor_area_sqm = parse_optional_f64("floor_area_sqm", self.floor_area_sqm)?;
        let lease_commence_date =
            parse_optional_u16("lease_commence_date", self.lease_commence_date)?;

        Ok(ResaleTransaction {
            month,
            town: self.town,
            flat_type: self.flat_type,
            floor_area_sqm,
            lease_commence_date,
            resale_price,
        })
    }
}

fn parse_optional_f64(field: &'static str, value: Option<String>) -> Result<Option<f64>> {
    let raw = match value {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(HdbDashError::InvalidRecord { field, value: raw }),
    }
}

fn parse_optional_u16(field: &'static str, value: Option<String>) -> Result<Option<u16>> {
    let raw = match value {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u16>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(HdbDashError::InvalidRecord { field, value: raw }),
    }
}
