//! Row sorting for the in-memory store
//!
//! Multi-key, stable and deterministic. Missing values sort first.

use std::cmp::Ordering;

use crate::query::{Row, SortDirection, SortSpec};

/// Sorts result rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows by each key in turn, most significant first
    pub fn sort(rows: &mut [Row], order: &[SortSpec]) {
        if order.is_empty() {
            return;
        }
        rows.sort_by(|a, b| Self::compare_rows(a, b, order));
    }

    fn compare_rows(a: &Row, b: &Row, order: &[SortSpec]) -> Ordering {
        for spec in order {
            let ordering = match (a.get(&spec.column), b.get(&spec.column)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
            };
            let ordering = match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
