//! Typed option values and coercion from raw text.
//!
//! Both parse passes (command line and config file) coerce raw strings
//! through [`coerce`] so the two sources agree on what a valid value is.

use std::fmt;

/// The declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean switch (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`).
    Bool,
    /// Signed integer.
    Integer,
    /// Free-form string.
    Str,
}

impl ValueKind {
    /// The fallback value used when an option has no built-in default.
    #[must_use]
    pub fn zero(self) -> OptionValue {
        match self {
            Self::Bool => OptionValue::Bool(false),
            Self::Integer => OptionValue::Integer(0),
            Self::Str => OptionValue::Str(String::new()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Str => "string",
        };
        f.write_str(name)
    }
}

/// A single typed setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// String value.
    Str(String),
}

impl OptionValue {
    /// The kind this value was coerced to.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Str(_) => ValueKind::Str,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// Coerces a raw textual value to the given kind.
///
/// Returns `None` when the text cannot be interpreted as the kind; the
/// caller turns that into a `TypeMismatch` with its own context.
#[must_use]
pub fn coerce(kind: ValueKind, raw: &str) -> Option<OptionValue> {
    match kind {
        ValueKind::Bool => parse_bool_literal(raw).map(OptionValue::Bool),
        ValueKind::Integer => raw.trim().parse::<i64>().ok().map(OptionValue::Integer),
        ValueKind::Str => Some(OptionValue::Str(raw.to_string())),
    }
}

/// Parses the boolean literals accepted by both sources.
#[must_use]
pub fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
