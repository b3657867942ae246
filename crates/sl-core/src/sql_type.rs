//! Declared column type fragment.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static TYPE_FRAGMENT_RE: OnceLock<Regex> = OnceLock::new();

fn type_fragment_re() -> &'static Regex {
    TYPE_FRAGMENT_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\s*\(\s*\d+(\s*,\s*\d+)?\s*\))?(\s*\[\s*\])?$")
            .expect("valid regex")
    })
}

/// A SQL type fragment such as `TEXT`, `VARCHAR(64)` or `DECIMAL(10, 2)`.
///
/// The fragment is spliced verbatim into DDL, so it is restricted to a type
/// name with optional precision/scale and an optional trailing `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlType(String);

impl SqlType {
    /// The nullable text column added by the built-in migration.
    pub fn text() -> Self {
        Self("TEXT".to_string())
    }

    /// Validate a type fragment.
    pub fn parse(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if !type_fragment_re().is_match(trimmed) {
            return Err(CoreError::InvalidSqlType { value });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SqlType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SqlType> for String {
    fn from(value: SqlType) -> Self {
        value.0
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
