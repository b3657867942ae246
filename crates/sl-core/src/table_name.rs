//! Strongly-typed table and column names.

use crate::newtype_string::define_identifier;
use crate::sql_utils::split_qualified_name;

define_identifier! {
    /// A non-empty, possibly schema-qualified table name (`users`, `crm.users`).
    pub struct TableName("table name");
}

define_identifier! {
    /// A non-empty column name.
    pub struct ColumnName("column name");
}

impl TableName {
    /// Split into `(schema, table)`, defaulting the schema to `main`.
    pub fn parts(&self) -> (&str, &str) {
        split_qualified_name(self.as_str())
    }
}

#[cfg(test)]
#[path = "table_name_test.rs"]
mod tests;
