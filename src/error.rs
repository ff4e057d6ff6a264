//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueKind;

/// Error type for configuration operations.
///
/// Parse-time variants are fatal: the merge aborts before any resolved
/// settings exist. An unreadable config file is deliberately *not* an
/// error (the daemon may run from command-line flags alone); it is
/// reported through logging instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A command-line token or config-file key matches no registered option.
    #[error("Unknown option '{token}'\nTry using --help")]
    UnknownOption {
        /// The offending token or key.
        token: String,
    },

    /// A value could not be coerced to the option's declared type.
    #[error("Invalid value '{value}' for '{option}': expected {expected}")]
    TypeMismatch {
        /// Long name of the option.
        option: &'static str,
        /// The raw value that failed to coerce.
        value: String,
        /// The declared kind of the option.
        expected: ValueKind,
    },

    /// A non-boolean option appeared at the end of the command line
    /// without a value.
    #[error("Option '--{option}' requires a value")]
    MissingValue {
        /// Long name of the option.
        option: String,
    },

    /// A config-file line violates the `key = value` grammar.
    #[error("{}:{line}: malformed line '{text}' (expected 'key = value')", path.display())]
    Malformed {
        /// Path of the file being parsed.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// Failed to read a file whose absence is not tolerated
    /// (the tunnels document loader).
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A port setting is outside the valid TCP/UDP range.
    #[error("Value {value} for '{option}' is out of range [{min}, {max}]")]
    PortOutOfRange {
        /// Long name of the option.
        option: &'static str,
        /// The resolved value.
        value: i64,
        /// Lowest accepted value.
        min: u16,
        /// Highest accepted value.
        max: u16,
    },

    /// The bandwidth class is not a recognized letter.
    #[error("Invalid bandwidth class '{value}': expected L or O")]
    InvalidBandwidth {
        /// The resolved value.
        value: String,
    },
}

impl ConfigError {
    /// Creates an `UnknownOption` error for a token.
    #[must_use]
    pub fn unknown(token: impl Into<String>) -> Self {
        Self::UnknownOption {
            token: token.into(),
        }
    }
}
