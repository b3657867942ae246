//! Introspected table structure.

use sl_core::TableName;
use std::fmt;

/// One column as reported by the store's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type as the store spells it (DuckDB reports `TEXT` as `VARCHAR`)
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
}

impl ColumnDescriptor {
    /// Nullable column with no default.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default: None,
        }
    }

    /// Name comparison under DuckDB's case-insensitive identifier rules.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

/// Read-only snapshot of one table's columns, in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub table: TableName,
    pub columns: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    pub fn new(table: TableName, columns: Vec<ColumnDescriptor>) -> Self {
        Self { table, columns }
    }

    /// Find a column by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.matches_name(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
