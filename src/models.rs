use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::filtering::{SortDirection, parse_filter_json, parse_page_number};

/// Query-string parameters accepted by list endpoints.
///
/// All values arrive as raw strings and are validated when converted into a
/// [`ListQuery`]. Anything malformed is ignored rather than rejected.
///
/// # Filtering
/// `_filters` is a JSON object mapping column names to substrings, combined
/// with `AND`:
/// ```json
/// {"status": "active", "name": "sensor"}
/// ```
///
/// # Sorting
/// `_sortField` names a column, `_sortDir` is `ASC` or `DESC` (default `DESC`).
///
/// # Pagination
/// `_page` is 1-based, `_perPage` is the page size: `_page=2&_perPage=10`.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON-encoded filters, e.g. `{"status": "active"}`.
    #[serde(rename = "_filters")]
    #[param(example = r#"{"status": "active"}"#)]
    pub filters: Option<String>,
    /// Column to sort by.
    #[serde(rename = "_sortField")]
    #[param(example = "created")]
    pub sort_field: Option<String>,
    /// Sort direction, `ASC` or `DESC`.
    #[serde(rename = "_sortDir")]
    #[param(example = "DESC")]
    pub sort_dir: Option<String>,
    /// 1-based page number.
    #[serde(rename = "_page")]
    #[param(example = "1")]
    pub page: Option<String>,
    /// Number of items per page.
    #[serde(rename = "_perPage")]
    #[param(example = "10")]
    pub per_page: Option<String>,
}

/// A validated list request, ready for translation into SQL fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Field → substring, combined with `AND`.
    pub filters: BTreeMap<String, String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// 1-based page number.
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl From<&ListParams> for ListQuery {
    fn from(params: &ListParams) -> Self {
        Self {
            filters: parse_filter_json(params.filters.as_deref()),
            sort_field: params.sort_field.clone(),
            sort_direction: params.sort_dir.as_deref().map(SortDirection::from_param),
            page: params.page.as_deref().and_then(parse_page_number),
            page_size: params.per_page.as_deref().and_then(parse_page_number),
        }
    }
}
