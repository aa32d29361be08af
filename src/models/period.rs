//! Calendar periods for bucketing resale transactions.
//!
//! Transactions carry a `YYYY-MM` month string; charts bucket them either by
//! that month or by the derived calendar quarter. Both keys order
//! chronologically, and their labels sort lexicographically the same way
//! (months are zero-padded, quarter labels are `<year>Q<quarter>`).

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HdbDashError, Result};

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

/// A calendar month, the native period key of the resale dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: u16,
    month: u8,
}

impl Month {
    /// Construct from numeric parts. The month must be 1-12.
    pub fn new(year: u16, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(HdbDashError::InvalidPeriod(format!(
                "{:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    /// Parse a strict `YYYY-MM` label: four-digit year, dash, two-digit
    /// month 01-12. Anything else is `InvalidPeriod` carrying the input.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || HdbDashError::InvalidPeriod(s.to_string());

        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4
            || m.len() != 2
            || !y.bytes().all(|b| b.is_ascii_digit())
            || !m.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: u16 = y.parse().map_err(|_| invalid())?;
        let month: u8 = m.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year() as u16,
            month: today.month() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// The calendar quarter this month falls in.
    pub fn quarter(&self) -> Quarter {
        Quarter {
            year: self.year,
            quarter: (self.month - 1) / 3 + 1,
        }
    }

    /// The preceding calendar month.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// All months from `from` through `to` inclusive, ascending. Empty when
    /// `from` is after `to`.
    pub fn range_inclusive(from: Month, to: Month) -> Vec<Month> {
        let mut months = Vec::new();
        let mut cursor = from;
        while cursor <= to {
            months.push(cursor);
            cursor = if cursor.month == 12 {
                Self {
                    year: cursor.year + 1,
                    month: 1,
                }
            } else {
                Self {
                    year: cursor.year,
                    month: cursor.month + 1,
                }
            };
        }
        months
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = HdbDashError;

    fn from_str(s: &str) -> Result<Self> {
        Month::parse(s)
    }
}

// Months key the history JSON document, so they serialize as their label.
impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Month::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Quarter
// ---------------------------------------------------------------------------

/// A calendar quarter, labeled `<year>Q<quarter>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: u16,
    quarter: u8,
}

impl Quarter {
    /// Construct from numeric parts. The quarter index must be 1-4; this is
    /// a programmer contract, not a data-validation path (data-driven
    /// quarters come from [`Month::quarter`]).
    pub const fn new(year: u16, quarter: u8) -> Self {
        assert!(quarter >= 1 && quarter <= 4);
        Self { year, quarter }
    }

    /// Parse a strict `<year>Q<quarter>` label: four-digit year, `Q`,
    /// one-digit quarter 1-4. Anything else is `InvalidPeriod`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || HdbDashError::InvalidPeriod(s.to_string());

        let (y, q) = s.split_once('Q').ok_or_else(invalid)?;
        if y.len() != 4
            || q.len() != 1
            || !y.bytes().all(|b| b.is_ascii_digit())
            || !q.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: u16 = y.parse().map_err(|_| invalid())?;
        let quarter: u8 = q.parse().map_err(|_| invalid())?;
        if !(1..=4).contains(&quarter) {
            return Err(invalid());
        }
        Ok(Self { year, quarter })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl FromStr for Quarter {
    type Err = HdbDashError;

    fn from_str(s: &str) -> Result<Self> {
        Quarter::parse(s)
    }
}

impl Serialize for Quarter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quarter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Quarter::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Granularity and PeriodKey
// ---------------------------------------------------------------------------

/// The bucketing granularity of a summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Month,
    Quarter,
}

impl Granularity {
    /// Bucket a month into the period key for this granularity.
    pub fn bucket(&self, month: Month) -> PeriodKey {
        match self {
            Granularity::Month => PeriodKey::Month(month),
            Granularity::Quarter => PeriodKey::Quarter(month.quarter()),
        }
    }

    /// Axis caption used by the chart renderer.
    pub fn axis_title(&self) -> &'static str {
        match self {
            Granularity::Month => "Months",
            Granularity::Quarter => "Quarters",
        }
    }
}

/// A derived period bucket at either granularity.
///
/// Views bucket with a single granularity per call, so ordering only ever
/// compares like variants; within a variant the derived `Ord` is
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Month(Month),
    Quarter(Quarter),
}

impl PeriodKey {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month(m) => m.fmt(f),
            PeriodKey::Quarter(q) => q.fmt(f),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
