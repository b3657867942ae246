//! Macro for defining SQL identifier newtypes.
//!
//! Table and column names share the same invariant (non-empty) and the same
//! comparison rules: exact equality for `PartialEq`, ASCII case-insensitive
//! equality for `matches`, which mirrors how DuckDB folds
//! unquoted identifiers.

/// Define a strongly-typed, non-empty identifier newtype.
///
/// Generates:
/// - The struct with `Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize`
/// - Custom `Deserialize` (rejects empty strings)
/// - `new()` (panics on empty), `parse()` (returns `CoreResult`), `as_str()`,
///   `matches()` (case-insensitive)
/// - `Display`, `AsRef<str>`, `Deref<Target=str>`
/// - `TryFrom<&str>`, `PartialEq<str>`, `PartialEq<&str>`
macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident($label:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::parse(s).map_err(serde::de::Error::custom)
            }
        }

        impl $Name {
            /// Create a new instance, panicking if the name is empty.
            ///
            /// Prefer [`parse`](Self::parse) when handling untrusted input.
            pub fn new(name: impl Into<String>) -> Self {
                let s = name.into();
                assert!(!s.trim().is_empty(), concat!($label, " must not be empty"));
                Self(s)
            }

            /// Validate and wrap a name. Surrounding whitespace is trimmed.
            pub fn parse(name: impl Into<String>) -> $crate::error::CoreResult<Self> {
                let s = name.into();
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::error::CoreError::EmptyIdentifier { kind: $label });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Return the underlying name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Compare against another identifier using DuckDB's folding rules.
            pub fn matches(&self, other: &str) -> bool {
                self.0.eq_ignore_ascii_case(other)
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl TryFrom<&str> for $Name {
            type Error = $crate::error::CoreError;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::parse(s)
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_identifier;
