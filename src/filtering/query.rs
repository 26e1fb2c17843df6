use sea_orm::{DatabaseBackend, Statement, Value};

use super::columns::{ColumnAllowList, is_valid_identifier};
use super::conditions::{WhereClause, build_where_clause};
use super::pagination::{LimitOffset, build_limit_offset};
use super::sort::{OrderClause, build_order_clause};
use crate::models::ListQuery;

/// Translated list query: optional WHERE, ORDER BY and LIMIT/OFFSET parts.
///
/// The only user-supplied data carried here as text are allow-listed column
/// names; every filter value lives in the bound parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFragment {
    pub where_clause: Option<WhereClause>,
    pub order_clause: Option<OrderClause>,
    pub limit_offset: Option<LimitOffset>,
}

/// Translate a [`ListQuery`] into a [`QueryFragment`].
///
/// Pure and infallible: filters or sort fields outside `columns`, and
/// malformed pagination, are dropped from the result instead of reported.
#[must_use]
pub fn translate(query: &ListQuery, columns: &ColumnAllowList) -> QueryFragment {
    QueryFragment {
        where_clause: build_where_clause(&query.filters, columns),
        order_clause: build_order_clause(
            query.sort_field.as_deref(),
            query.sort_direction,
            columns,
        ),
        limit_offset: build_limit_offset(query.page, query.page_size),
    }
}

impl QueryFragment {
    /// Bound parameters for the rendered statements.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.where_clause
            .as_ref()
            .map(WhereClause::values)
            .unwrap_or_default()
    }

    /// `SELECT * FROM <table>` followed by every present clause.
    ///
    /// `table` must be a trusted identifier, never request input.
    #[must_use]
    pub fn select_statement(&self, table: &str, backend: DatabaseBackend) -> Statement {
        debug_assert!(is_valid_identifier(table));
        let mut sql = format!("SELECT * FROM {table}");
        self.push_where(&mut sql, backend);
        if let Some(order) = &self.order_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.to_sql(backend));
        }
        if let Some(limit) = self.limit_offset.as_ref().and_then(LimitOffset::to_sql) {
            sql.push(' ');
            sql.push_str(&limit);
        }
        Statement::from_sql_and_values(backend, sql, self.values())
    }

    /// `SELECT COUNT(*) AS total FROM <table>` restricted by the WHERE clause only.
    #[must_use]
    pub fn count_statement(&self, table: &str, backend: DatabaseBackend) -> Statement {
        debug_assert!(is_valid_identifier(table));
        let mut sql = format!("SELECT COUNT(*) AS total FROM {table}");
        self.push_where(&mut sql, backend);
        Statement::from_sql_and_values(backend, sql, self.values())
    }

    fn push_where(&self, sql: &mut String, backend: DatabaseBackend) {
        if let Some(where_clause) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.to_sql(backend));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::SortDirection;

    fn allow_list() -> ColumnAllowList {
        ColumnAllowList::new(["status", "name"]).with_normalized(["created"])
    }

    fn full_query() -> ListQuery {
        ListQuery {
            filters: [("status".to_string(), "active".to_string())].into(),
            sort_field: Some("created".to_string()),
            sort_direction: Some(SortDirection::Asc),
            page: Some(2),
            page_size: Some(10),
        }
    }

    #[test]
    fn test_translate_full_query() {
        let fragment = translate(&full_query(), &allow_list());

        let where_clause = fragment.where_clause.as_ref().unwrap();
        assert_eq!(where_clause.to_sql(DatabaseBackend::Sqlite), "status LIKE ? ESCAPE '\\'");
        assert_eq!(where_clause.values(), vec![Value::from("%active%")]);

        let order = fragment.order_clause.as_ref().unwrap();
        assert_eq!(order.to_sql(DatabaseBackend::Sqlite), "datetime(created) ASC");

        let limit_offset = fragment.limit_offset.unwrap();
        assert_eq!(limit_offset.to_sql().as_deref(), Some("LIMIT 10 OFFSET 10"));
    }

    #[test]
    fn test_translate_empty_query() {
        assert_eq!(
            translate(&ListQuery::default(), &allow_list()),
            QueryFragment::default()
        );
    }

    #[test]
    fn test_translate_sanitizes_sort_field() {
        let query = ListQuery {
            sort_field: Some("1;DROP TABLE".to_string()),
            ..Default::default()
        };
        let fragment = translate(&query, &allow_list());
        assert!(fragment.order_clause.is_none());
    }

    #[test]
    fn test_select_statement_sqlite() {
        let statement =
            translate(&full_query(), &allow_list()).select_statement("agents", DatabaseBackend::Sqlite);
        assert_eq!(
            statement.sql,
            "SELECT * FROM agents WHERE status LIKE ? ESCAPE '\\' ORDER BY datetime(created) ASC LIMIT 10 OFFSET 10"
        );
        assert_eq!(
            statement.values.map(|values| values.0),
            Some(vec![Value::from("%active%")])
        );
    }

    #[test]
    fn test_select_statement_postgres() {
        let statement = translate(&full_query(), &allow_list())
            .select_statement("agents", DatabaseBackend::Postgres);
        assert_eq!(
            statement.sql,
            "SELECT * FROM agents WHERE CAST(status AS TEXT) ILIKE $1 ORDER BY CAST(created AS TIMESTAMP) ASC LIMIT 10 OFFSET 10"
        );
    }

    #[test]
    fn test_select_statement_without_clauses() {
        let statement = QueryFragment::default().select_statement("users", DatabaseBackend::Sqlite);
        assert_eq!(statement.sql, "SELECT * FROM users");
        assert!(statement.values.is_none_or(|values| values.0.is_empty()));
    }

    #[test]
    fn test_count_statement_ignores_order_and_limit() {
        let statement =
            translate(&full_query(), &allow_list()).count_statement("agents", DatabaseBackend::Sqlite);
        assert_eq!(
            statement.sql,
            "SELECT COUNT(*) AS total FROM agents WHERE status LIKE ? ESCAPE '\\'"
        );
        assert_eq!(
            statement.values.map(|values| values.0),
            Some(vec![Value::from("%active%")])
        );
    }

    #[test]
    fn test_offset_alone_not_rendered() {
        let query = ListQuery {
            page: Some(4),
            ..Default::default()
        };
        let statement =
            translate(&query, &allow_list()).select_statement("agents", DatabaseBackend::Sqlite);
        assert_eq!(statement.sql, "SELECT * FROM agents");
    }
}
