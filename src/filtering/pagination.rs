use axum::http::header::{HeaderMap, HeaderName, HeaderValue};

/// Header carrying the number of rows matching the filters, ignoring pagination.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `LIMIT`/`OFFSET` pair of a list query.
///
/// An offset is only rendered together with a limit: on its own it has no
/// effect, and some backends reject `OFFSET` without `LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOffset {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl LimitOffset {
    /// Render `LIMIT n [OFFSET m]`, or `None` when there is no limit.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        let limit = self.limit?;
        Some(match self.offset {
            Some(offset) => format!("LIMIT {limit} OFFSET {offset}"),
            None => format!("LIMIT {limit}"),
        })
    }
}

/// Largest `LIMIT` or `OFFSET` accepted by the backends (signed 64-bit).
pub const MAX_PAGE_VALUE: u64 = i64::MAX.unsigned_abs();

/// Parse `_page` / `_perPage`: the value must match `^[0-9]+$` and not exceed
/// [`MAX_PAGE_VALUE`].
#[must_use]
pub fn parse_page_number(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(value = %raw, "Ignoring non-numeric pagination value");
        return None;
    }
    match raw.parse::<u64>() {
        Ok(value) if value <= MAX_PAGE_VALUE => Some(value),
        _ => {
            tracing::debug!(value = %raw, "Ignoring out-of-range pagination value");
            None
        }
    }
}

/// Compute limit and offset from a 1-based page number and a page size.
///
/// Pages ≤ 1 never produce an offset. Without a page size the offset is
/// computed against a page size of zero. The offset is capped at
/// [`MAX_PAGE_VALUE`].
#[must_use]
pub fn build_limit_offset(page: Option<u64>, page_size: Option<u64>) -> Option<LimitOffset> {
    let offset = page
        .filter(|&page| page > 1)
        .map(|page| {
            (page - 1)
                .saturating_mul(page_size.unwrap_or(0))
                .min(MAX_PAGE_VALUE)
        });

    if page_size.is_none() && offset.is_none() {
        return None;
    }

    Some(LimitOffset {
        limit: page_size,
        offset,
    })
}

/// Build the `X-Total-Count` header for a list response.
#[must_use]
pub fn total_count_headers(total_count: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(total_count),
    );
    headers
}
