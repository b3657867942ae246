//! SQL identifier helpers used when rendering DDL.
//!
//! Identifiers are always quoted so that reserved words and mixed-case names
//! survive the trip into an `ALTER TABLE` statement unchanged.

/// Quote a single SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use sl_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("socials"), r#""socials""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name as `"schema"."table"`.
///
/// Splits exactly like [`split_qualified_name`], so the rendered DDL names the
/// same relation that introspection looks up.
///
/// # Examples
/// ```
/// use sl_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("users"), r#""users""#);
/// assert_eq!(quote_qualified("crm.users"), r#""crm"."users""#);
/// assert_eq!(quote_qualified("a.b.c"), r#""a.b"."c""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    if !name.contains('.') {
        return quote_ident(name);
    }
    let (schema, table) = split_qualified_name(name);
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Split a potentially schema-qualified table name into (schema, table).
///
/// Uses the last `.` as the separator; bare names live in `main`.
///
/// # Examples
/// ```
/// use sl_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("users"), ("main", "users"));
/// assert_eq!(split_qualified_name("crm.users"), ("crm", "users"));
/// ```
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("main", name),
    }
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
