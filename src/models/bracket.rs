//! Fixed price brackets for resale transactions.
//!
//! The bracket set is a static enumeration, never inferred from data, so
//! chart series stay identical across runs. Boundaries are half-open:
//! left-inclusive, right-exclusive, with the top bracket unbounded above.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HdbDashError, Result};

/// Price bracket of a resale transaction. Variants are ordered ascending by
/// lower bound; `as usize` yields the bracket's index in [`ALL`](Self::ALL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceBracket {
    #[serde(rename = "<=300k")]
    UpTo300k,
    #[serde(rename = "300-500k")]
    From300k,
    #[serde(rename = "500-800k")]
    From500k,
    #[serde(rename = "800k-1m")]
    From800k,
    #[serde(rename = ">=1m")]
    FromMillion,
}

impl PriceBracket {
    /// Every bracket in display order.
    pub const ALL: [PriceBracket; 5] = [
        PriceBracket::UpTo300k,
        PriceBracket::From300k,
        PriceBracket::From500k,
        PriceBracket::From800k,
        PriceBracket::FromMillion,
    ];

    /// The bracket whose half-open interval contains `price`.
    ///
    /// Boundary values fall into the higher bracket (300,000 classifies as
    /// "300-500k") and the top bracket has no upper bound. Negative or
    /// non-finite prices are `PriceOutOfRange`.
    pub fn classify(price: f64) -> Result<PriceBracket> {
        if !price.is_finite() || price < 0.0 {
            return Err(HdbDashError::PriceOutOfRange(price));
        }
        Ok(match price {
            p if p < 300_000.0 => PriceBracket::UpTo300k,
            p if p < 500_000.0 => PriceBracket::From300k,
            p if p < 800_000.0 => PriceBracket::From500k,
            p if p < 1_000_000.0 => PriceBracket::From800k,
            _ => PriceBracket::FromMillion,
        })
    }

    /// Chart label for this bracket.
    pub fn label(&self) -> &'static str {
        match self {
            PriceBracket::UpTo300k => "<=300k",
            PriceBracket::From300k => "300-500k",
            PriceBracket::From500k => "500-800k",
            PriceBracket::From800k => "800k-1m",
            PriceBracket::FromMillion => ">=1m",
        }
    }
}

impl fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
