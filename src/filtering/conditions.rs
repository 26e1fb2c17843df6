use sea_orm::{DatabaseBackend, Value};
use std::collections::BTreeMap;

use super::columns::ColumnAllowList;

// Basic safety limit
const MAX_FILTER_VALUE_LENGTH: usize = 10_000;

/// A single `column LIKE '%substring%'` test, with the pattern kept out of the
/// SQL text. `%`, `_` and `\` in the substring are escaped, so they match
/// literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePredicate {
    pub column: String,
    pub pattern: String,
}

/// Substring predicates joined with `AND`.
///
/// Matching is ASCII case-insensitive: `LIKE` on SQLite and MySQL (whose
/// default collations ignore ASCII case) and `ILIKE` on PostgreSQL. PostgreSQL
/// columns are cast to `TEXT` first so numeric and timestamp columns can be
/// searched too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    predicates: Vec<LikePredicate>,
}

impl WhereClause {
    #[must_use]
    pub fn predicates(&self) -> &[LikePredicate] {
        &self.predicates
    }

    /// Render the clause body (without the `WHERE` keyword).
    #[must_use]
    pub fn to_sql(&self, backend: DatabaseBackend) -> String {
        self.predicates
            .iter()
            .enumerate()
            .map(|(i, predicate)| predicate_sql(backend, &predicate.column, i + 1))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Bound parameters, in placeholder order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.predicates
            .iter()
            .map(|predicate| Value::from(predicate.pattern.clone()))
            .collect()
    }
}

fn predicate_sql(backend: DatabaseBackend, column: &str, index: usize) -> String {
    match backend {
        DatabaseBackend::Postgres => format!("CAST({column} AS TEXT) ILIKE ${index}"),
        // backslash is SQLite's escape character only when declared
        DatabaseBackend::Sqlite => format!("{column} LIKE ? ESCAPE '\\'"),
        _ => format!("{column} LIKE ?"),
    }
}

/// Escape LIKE wildcards with a backslash.
fn escape_like(substring: &str) -> String {
    let mut escaped = String::with_capacity(substring.len());
    for c in substring.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the substring predicates for every allow-listed filter.
///
/// Fields outside the allow-list, empty substrings and oversized values are
/// skipped. Returns `None` when nothing survives.
#[must_use]
pub fn build_where_clause(
    filters: &BTreeMap<String, String>,
    columns: &ColumnAllowList,
) -> Option<WhereClause> {
    let mut predicates = Vec::new();

    for (field, substring) in filters {
        if !columns.allows(field) {
            tracing::debug!(field = %field, "Dropping filter on column outside the allow-list");
            continue;
        }
        if substring.is_empty() || substring.len() > MAX_FILTER_VALUE_LENGTH {
            tracing::debug!(field = %field, "Dropping filter with empty or oversized value");
            continue;
        }
        predicates.push(LikePredicate {
            column: field.clone(),
            pattern: format!("%{}%", escape_like(substring)),
        });
    }

    if predicates.is_empty() {
        None
    } else {
        Some(WhereClause { predicates })
    }
}

/// Decode the `_filters` query parameter, a JSON object of field → substring.
///
/// Numbers and booleans are kept in their textual form; any other value is
/// ignored. Input that is not a JSON object yields no filters.
#[must_use]
pub fn parse_filter_json(filter_str: Option<&str>) -> BTreeMap<String, String> {
    let Some(raw) = filter_str else {
        return BTreeMap::new();
    };

    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
        Ok(parsed) => parsed
            .into_iter()
            .filter_map(|(field, value)| filter_value_text(value).map(|text| (field, text)))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid _filters JSON");
            BTreeMap::new()
        }
    }
}

fn filter_value_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
