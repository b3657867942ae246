//! The immutable description of a single additive column change.

use crate::error::{CoreError, CoreResult};
use crate::sql_type::SqlType;
use crate::sql_utils::{quote_ident, quote_qualified};
use crate::table_name::{ColumnName, TableName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Table touched by the built-in migration.
pub const BUILTIN_TABLE: &str = "users";

/// Column added by the built-in migration.
pub const BUILTIN_COLUMN: &str = "socials";

/// One "add this nullable column to that table" migration.
///
/// A spec is supplied by the caller and never mutated by the executor. The
/// column it adds is always nullable; rows that exist before the migration
/// read `NULL` (or the default expression, when one is given).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationSpec {
    /// Target table, optionally schema-qualified
    pub table: TableName,

    /// Column to add
    pub column: ColumnName,

    /// Declared type of the new column
    #[serde(rename = "type")]
    pub column_type: SqlType,

    /// Optional SQL default expression, spliced after `DEFAULT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl MigrationSpec {
    /// Describe an `ADD COLUMN` with no default.
    pub fn add_column(table: TableName, column: ColumnName, column_type: SqlType) -> Self {
        Self {
            table,
            column,
            column_type,
            default: None,
        }
    }

    /// The compiled-in migration: `users.socials TEXT`, nullable, no default.
    pub fn builtin() -> Self {
        Self::add_column(
            TableName::new(BUILTIN_TABLE),
            ColumnName::new(BUILTIN_COLUMN),
            SqlType::text(),
        )
    }

    /// Attach a default expression, e.g. `'[]'` or `0`.
    ///
    /// A `;` or `--` outside string literals and quoted identifiers is
    /// rejected; inside them (`'a;b'`, `'--'`) both are ordinary text.
    pub fn with_default(mut self, expr: impl Into<String>) -> CoreResult<Self> {
        self.default = Some(expr.into());
        self.validate()?;
        Ok(self)
    }

    /// Check the parts that the identifier and type wrappers cannot.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(expr) = &self.default {
            let expr = expr.trim();
            if expr.is_empty() {
                return Err(self.invalid("default expression is empty"));
            }
            if has_unquoted_terminator(expr) {
                return Err(self.invalid("default expression must be a single SQL expression"));
            }
        }
        Ok(())
    }

    /// Render the additive statement for this spec.
    ///
    /// ```
    /// use sl_core::MigrationSpec;
    /// assert_eq!(
    ///     MigrationSpec::builtin().statement(),
    ///     r#"ALTER TABLE "users" ADD COLUMN "socials" TEXT"#
    /// );
    /// ```
    pub fn statement(&self) -> String {
        let mut sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            quote_qualified(self.table.as_str()),
            quote_ident(self.column.as_str()),
            self.column_type
        );
        if let Some(expr) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(expr.trim());
        }
        sql
    }

    /// `table.column`, used as the label in progress lines and reports.
    pub fn target(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    fn invalid(&self, reason: &str) -> CoreError {
        CoreError::InvalidSpec {
            target: self.target(),
            reason: reason.to_string(),
        }
    }
}

/// True when `expr` has a `;` or `--` outside `'...'` and `"..."`, or leaves
/// a quote unterminated.
fn has_unquoted_terminator(expr: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        match (quote, c) {
            // a doubled quote inside a literal toggles out and straight back in
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ';') => return true,
            (None, '-') if chars.peek() == Some(&'-') => return true,
            (None, _) => {}
        }
    }
    quote.is_some()
}

impl fmt::Display for MigrationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target(), self.column_type)
    }
}

#[cfg(test)]
#[path = "migration_spec_test.rs"]
mod tests;
