//! Table query description, rendered as PostgREST query parameters.

use serde_json::Value;

/// Equality filter on one column.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableQuery {
    pub table: String,
    pub filters: Vec<Filter>,
    pub single: bool,
}

impl TableQuery {
    pub fn from(table: &str) -> Self {
        TableQuery {
            table: table.to_string(),
            filters: Vec::new(),
            single: false,
        }
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Expect exactly one row.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// True when `row` satisfies every filter. Non-string cells compare by their JSON text.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| match row.get(&f.column) {
            Some(Value::String(s)) => *s == f.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == f.value,
        })
    }

    /// Filter parameters (`col=eq.value`).
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
            .collect()
    }

    /// Parameters for a read: `select=*` followed by the filters.
    pub fn select_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filter_params());
        params
    }
}
