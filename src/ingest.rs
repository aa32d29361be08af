//! Merging freshly fetched months into persisted history.
//!
//! Fetched months replace their persisted entries wholesale; months outside
//! the fetch keep their persisted rows. Replacement makes the merge
//! idempotent: applying the same fetch result twice yields the same history.

use std::collections::BTreeMap;

use crate::history::History;
use crate::models::{Month, ResaleTransaction};

/// What to do when a fetched month comes back with zero rows.
///
/// `KeepExisting` (the default) treats an empty result as a transient
/// upstream gap: persisted rows for that month survive and the month is
/// reported as kept. `ReplaceWithEmpty` trusts the fetch and drops the
/// month's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyMonthPolicy {
    #[default]
    KeepExisting,
    ReplaceWithEmpty,
}

/// Which months a merge touched, by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Target months whose persisted rows were replaced by fetched rows.
    pub replaced: Vec<Month>,
    /// Target months that had no persisted rows before this merge.
    pub added: Vec<Month>,
    /// Target months left untouched because the fetch was empty under
    /// `KeepExisting`.
    pub kept: Vec<Month>,
}

/// Merge fetched months into history.
///
/// `fetched` must contain one entry per target month, with an empty `Vec`
/// for months the fetch returned nothing for. Pure function: inputs are
/// consumed, nothing is mutated in place, and no I/O happens here.
pub fn merge(
    history: History,
    fetched: BTreeMap<Month, Vec<ResaleTransaction>>,
    policy: EmptyMonthPolicy,
) -> (History, MergeReport) {
    let mut merged = history;
    let mut report = MergeReport::default();

    for (month, rows) in fetched {
        if rows.is_empty() && policy == EmptyMonthPolicy::KeepExisting {
            report.kept.push(month);
            continue;
        }
        if merged.insert(month, rows).is_some() {
            report.replaced.push(month);
        } else {
            report.added.push(month);
        }
    }

    (merged, report)
}
