//! Keyset pagination
//!
//! Seeks past the last row of the previous page by value instead of by
//! offset. Rows are ordered by `(timestamp, id)`; the id breaks ties so
//! rows sharing a timestamp are neither skipped nor repeated across page
//! boundaries.
//!
//! Ascending seek predicate for anchor `a`:
//!
//! ```text
//! ts >= a.ts AND (id > a.id OR ts > a.ts)    ORDER BY ts ASC, id ASC
//! ```
//!
//! Descending mirrors both the comparisons and the ordering. The predicate
//! is value-based, so an anchor row deleted between pages still resumes at
//! the right place.

use super::cursor::Cursor;
use super::errors::{PaginationError, PaginationResult};
use crate::observability::{log_event, Event, Severity};
use crate::query::{CompareOp, Predicate, Query, QueryExecutor, Row, SortDirection, SortSpec};
use crate::schema::{ColumnKind, ColumnRegistry, TypedValue};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 1000;

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Row>,
    /// Resume point for the next page; `None` once exhausted
    pub next: Option<Cursor>,
}

impl Page {
    /// Returns true if no page follows this one
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Builds seek queries and cursors for `(timestamp, id)` keyset traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetPaginator {
    sort_column: String,
    tie_break_column: String,
    direction: SortDirection,
    page_size: usize,
}

impl KeysetPaginator {
    /// Ascending paginator over `sort_column` then `tie_break_column`
    pub fn new(
        sort_column: impl Into<String>,
        tie_break_column: impl Into<String>,
        page_size: usize,
    ) -> PaginationResult<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidPageSize {
                size: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self {
            sort_column: sort_column.into(),
            tie_break_column: tie_break_column.into(),
            direction: SortDirection::Asc,
            page_size,
        })
    }

    /// Sets the traversal direction
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Checks that the key columns exist with the kinds a cursor holds
    pub fn validate_against(&self, registry: &ColumnRegistry) -> PaginationResult<()> {
        check_key_column(registry, &self.sort_column, ColumnKind::DateTimeTz)?;
        check_key_column(registry, &self.tie_break_column, ColumnKind::Identifier)
    }

    pub fn sort_column(&self) -> &str {
        &self.sort_column
    }

    pub fn tie_break_column(&self) -> &str {
        &self.tie_break_column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Builds the predicate admitting only rows after `anchor`
    pub fn seek_predicate(&self, anchor: &Cursor) -> Predicate {
        let (bound, strict) = match self.direction {
            SortDirection::Asc => (CompareOp::Ge, CompareOp::Gt),
            SortDirection::Desc => (CompareOp::Le, CompareOp::Lt),
        };
        let ts = TypedValue::DateTimeTz(anchor.timestamp);

        Predicate::All(vec![
            Predicate::compare(&self.sort_column, bound, ts.clone()),
            Predicate::Any(vec![
                Predicate::compare(
                    &self.tie_break_column,
                    strict,
                    TypedValue::Identifier(anchor.id),
                ),
                Predicate::compare(&self.sort_column, strict, ts),
            ]),
        ])
    }

    /// Narrows `base` to one page after `cursor`.
    ///
    /// Any ordering already on `base` is replaced: the keyset ordering must
    /// match the seek predicate exactly.
    pub fn page_query(&self, base: Query, cursor: Option<&Cursor>) -> Query {
        let mut query = base;
        if let Some(anchor) = cursor {
            query = query.and_where(self.seek_predicate(anchor));
        }
        query.order.clear();
        query
            .order_by(SortSpec::new(&self.sort_column, self.direction))
            .order_by(SortSpec::new(&self.tie_break_column, self.direction))
            .with_limit(self.page_size)
    }

    /// Turns fetched rows into a page, taking the last row as the next anchor
    pub fn finish_page(&self, mut rows: Vec<Row>) -> PaginationResult<Page> {
        rows.truncate(self.page_size);

        let next = if rows.len() < self.page_size {
            None
        } else {
            rows.last()
                .map(|last| Cursor::from_row(last, &self.sort_column, &self.tie_break_column))
                .transpose()?
        };

        match &next {
            Some(cursor) => log_event(
                Severity::Trace,
                Event::PageEmitted,
                &[
                    ("id", cursor.id.to_string().as_str()),
                    ("rows", rows.len().to_string().as_str()),
                    ("timestamp", cursor.timestamp.to_iso_string().as_str()),
                ],
            ),
            None => log_event(
                Severity::Trace,
                Event::PaginationExhausted,
                &[("rows", rows.len().to_string().as_str())],
            ),
        }

        Ok(Page { rows, next })
    }

    /// Fetches one page with a single `execute` call
    pub fn fetch_page<E: QueryExecutor>(
        &self,
        executor: &E,
        base: &Query,
        cursor: Option<&Cursor>,
    ) -> PaginationResult<Page> {
        let query = self.page_query(base.clone(), cursor);
        let rows = executor.execute(&query)?;
        self.finish_page(rows)
    }
}

fn check_key_column(
    registry: &ColumnRegistry,
    column: &str,
    expected: ColumnKind,
) -> PaginationResult<()> {
    let descriptor = registry
        .lookup(column)
        .ok_or_else(|| PaginationError::InvalidKeyColumn {
            column: column.to_string(),
            reason: format!("not a column of '{}'", registry.table()),
        })?;

    if descriptor.kind != expected {
        return Err(PaginationError::InvalidKeyColumn {
            column: column.to_string(),
            reason: format!(
                "kind is {}, expected {}",
                descriptor.kind.type_name(),
                expected.type_name()
            ),
        });
    }
    Ok(())
}
