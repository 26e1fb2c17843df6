//! # List Query Translation
//!
//! Turns the list parameters of a request into SQL fragments that are safe to
//! append to a `SELECT ... FROM <table>` statement.
//!
//! ## Rules
//!
//! - **Filters**: one substring predicate per allow-listed field, joined with
//!   `AND`. The substring travels as a bound parameter (`%substring%`).
//! - **Sorting**: an allow-listed column, optionally wrapped in a date function
//!   when it stores textual timestamps. Direction is `ASC` only when the
//!   parameter is exactly `ASC`, otherwise `DESC`.
//! - **Pagination**: `LIMIT pageSize OFFSET (page - 1) * pageSize`, with 1-based
//!   pages; page ≤ 1 has no offset.
//!
//! Column names must match `^[A-Za-z0-9_]+$` and be part of the resource's
//! [`ColumnAllowList`]. Anything else is silently dropped: a list request
//! never fails because of its filters, sort or pagination.
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Substring filters, combined with AND
//! GET /api/v1/agents?_filters={"status":"active","name":"sensor"}
//!
//! // Sorting by a timestamp column (normalized with datetime() on SQLite)
//! GET /api/v1/agents?_sortField=created&_sortDir=ASC
//!
//! // Third page of twenty
//! GET /api/v1/agents?_page=3&_perPage=20
//! ```
//!
//! ## Direct Use
//!
//! ```rust,ignore
//! let columns = ColumnAllowList::new(["status", "name"]).with_normalized(["created"]);
//! let fragment = translate(&ListQuery::from(&params), &columns);
//! let statement = fragment.select_statement("agents", db.get_database_backend());
//! ```

pub mod columns;
pub mod conditions;
pub mod pagination;
pub mod query;
pub mod sort;

// Re-export commonly used items
pub use columns::{ColumnAllowList, is_valid_identifier};
pub use conditions::{LikePredicate, WhereClause, build_where_clause, parse_filter_json};
pub use pagination::{
    LimitOffset, MAX_PAGE_VALUE, TOTAL_COUNT_HEADER, build_limit_offset, parse_page_number,
    total_count_headers,
};
pub use query::{QueryFragment, translate};
pub use sort::{OrderClause, SortDirection, build_order_clause};
