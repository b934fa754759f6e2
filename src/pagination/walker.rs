//! Page-by-page traversal
//!
//! Drives `Start -> FetchAnchor -> ComputeSeekPredicate -> FetchPage ->
//! EmitCursor -> (End | next page)` over any executor. The walker holds
//! only the current cursor; dropping it is the only cancellation needed.

use super::cursor::Cursor;
use super::errors::PaginationResult;
use super::paginator::{KeysetPaginator, Page};
use crate::query::{Query, QueryExecutor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Start(Option<Cursor>),
    Next(Cursor),
    End,
}

/// Iterator over consecutive pages
pub struct PageWalker<'a, E: QueryExecutor> {
    paginator: &'a KeysetPaginator,
    executor: &'a E,
    base: Query,
    state: WalkState,
}

impl<'a, E: QueryExecutor> PageWalker<'a, E> {
    /// Walks from the beginning of the ordering
    pub fn new(paginator: &'a KeysetPaginator, executor: &'a E, base: Query) -> Self {
        Self::resume(paginator, executor, base, None)
    }

    /// Walks from `cursor`, or from the beginning if `None`
    pub fn resume(
        paginator: &'a KeysetPaginator,
        executor: &'a E,
        base: Query,
        cursor: Option<Cursor>,
    ) -> Self {
        Self {
            paginator,
            executor,
            base,
            state: WalkState::Start(cursor),
        }
    }

    /// Returns true once no further page will be fetched
    pub fn is_finished(&self) -> bool {
        self.state == WalkState::End
    }
}

impl<'a, E: QueryExecutor> Iterator for PageWalker<'a, E> {
    type Item = PaginationResult<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let (anchor, first) = match self.state {
            WalkState::Start(cursor) => (cursor, true),
            WalkState::Next(cursor) => (Some(cursor), false),
            WalkState::End => return None,
        };

        let page = match self
            .paginator
            .fetch_page(self.executor, &self.base, anchor.as_ref())
        {
            Ok(page) => page,
            Err(err) => {
                self.state = WalkState::End;
                return Some(Err(err));
            }
        };

        self.state = match page.next {
            Some(cursor) => WalkState::Next(cursor),
            None => WalkState::End,
        };

        // A full final page leaves one empty fetch behind it; only the
        // first page is reported when empty.
        if page.rows.is_empty() && !first {
            return None;
        }
        Some(Ok(page))
    }
}

impl KeysetPaginator {
    /// Iterates pages of `base` from the beginning
    pub fn walk<'a, E: QueryExecutor>(&'a self, executor: &'a E, base: Query) -> PageWalker<'a, E> {
        PageWalker::new(self, executor, base)
    }
}
