use std::collections::BTreeSet;

/// Check a field name against `^[A-Za-z0-9_]+$`.
///
/// Only names passing this check are ever written into SQL text.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Column names a list query is allowed to reference in filters and sorting.
///
/// Columns registered through [`ColumnAllowList::with_normalized`] hold textual
/// timestamps and are wrapped in a date function before ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAllowList {
    columns: BTreeSet<String>,
    normalized: BTreeSet<String>,
}

impl ColumnAllowList {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            normalized: BTreeSet::new(),
        }
    }

    /// Mark columns as needing date normalization when sorted.
    ///
    /// Normalized columns are also added to the allow-list.
    #[must_use]
    pub fn with_normalized<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            let column = column.into();
            self.columns.insert(column.clone());
            self.normalized.insert(column);
        }
        self
    }

    /// True when `field` is a well-formed identifier present in the allow-list.
    #[must_use]
    pub fn allows(&self, field: &str) -> bool {
        is_valid_identifier(field) && self.columns.contains(field)
    }

    #[must_use]
    pub fn needs_normalization(&self, field: &str) -> bool {
        self.normalized.contains(field)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("status"));
        assert!(is_valid_identifier("created_at"));
        assert!(is_valid_identifier("Col_9"));
        assert!(is_valid_identifier("123"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1;DROP TABLE"));
        assert!(!is_valid_identifier("name desc"));
        assert!(!is_valid_identifier("users.name"));
        assert!(!is_valid_identifier("name--"));
        assert!(!is_valid_identifier("naïve"));
    }

    #[test]
    fn test_allows_only_listed_columns() {
        let columns = ColumnAllowList::new(["name", "status"]);
        assert!(columns.allows("name"));
        assert!(columns.allows("status"));
        assert!(!columns.allows("pass"));
        assert!(!columns.allows("Name"), "matching is case-sensitive");
    }

    /// A malformed name is refused even if a caller put it in the list
    #[test]
    fn test_malformed_entry_never_allowed() {
        let columns = ColumnAllowList::new(["bad name", "ok"]);
        assert!(!columns.allows("bad name"));
        assert!(columns.allows("ok"));
    }

    #[test]
    fn test_normalized_columns_are_allowed() {
        let columns = ColumnAllowList::new(["name"]).with_normalized(["created", "updated"]);
        assert!(columns.allows("created"));
        assert!(columns.needs_normalization("created"));
        assert!(columns.needs_normalization("updated"));
        assert!(!columns.needs_normalization("name"));
        assert_eq!(
            columns.columns().collect::<Vec<_>>(),
            vec!["created", "name", "updated"]
        );
    }
}
