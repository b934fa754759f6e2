//! Keyset pagination
//!
//! - [`KeysetPaginator`]: seek predicate, page query and next cursor
//! - [`Cursor`] / [`CursorCodec`]: the resume point and its opaque token form
//! - [`PageWalker`]: iterator over consecutive pages
//!
//! The paginator holds no state between calls. Cursors are supplied and
//! stored by the caller.

mod cursor;
mod errors;
mod paginator;
mod token;
mod walker;

pub use cursor::Cursor;
pub use errors::{CursorError, CursorResult, PaginationError, PaginationResult};
pub use paginator::{KeysetPaginator, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use token::CursorCodec;
pub use walker::PageWalker;
