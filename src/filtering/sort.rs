use sea_orm::DatabaseBackend;

use super::columns::ColumnAllowList;

/// Sort direction of a list query. Defaults to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse the `_sortDir` parameter: exactly `ASC` sorts ascending, anything
    /// else sorts descending.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == "ASC" { Self::Asc } else { Self::Desc }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `ORDER BY` target: an allow-listed column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    /// The column holds textual timestamps and is compared as a date.
    pub normalized: bool,
    pub direction: SortDirection,
}

impl OrderClause {
    /// Render the clause body (without the `ORDER BY` keywords).
    ///
    /// Normalized columns go through `datetime()` on SQLite, and are cast to
    /// `TIMESTAMP` on PostgreSQL or `DATETIME` on MySQL.
    #[must_use]
    pub fn to_sql(&self, backend: DatabaseBackend) -> String {
        format!("{} {}", self.sort_key(backend), self.direction.as_sql())
    }

    fn sort_key(&self, backend: DatabaseBackend) -> String {
        let column = &self.column;
        if !self.normalized {
            return column.clone();
        }
        match backend {
            DatabaseBackend::Sqlite => format!("datetime({column})"),
            DatabaseBackend::Postgres => format!("CAST({column} AS TIMESTAMP)"),
            _ => format!("CAST({column} AS DATETIME)"),
        }
    }
}

/// Build the order clause for an allow-listed sort field.
///
/// A missing or rejected field yields `None`; the direction alone never
/// produces a clause.
#[must_use]
pub fn build_order_clause(
    sort_field: Option<&str>,
    direction: Option<SortDirection>,
    columns: &ColumnAllowList,
) -> Option<OrderClause> {
    let field = sort_field?;
    if !columns.allows(field) {
        tracing::debug!(field = %field, "Dropping sort on column outside the allow-list");
        return None;
    }

    Some(OrderClause {
        column: field.to_string(),
        normalized: columns.needs_normalization(field),
        direction: direction.unwrap_or_default(),
    })
}
