//! Line-oriented config-file parsing.
//!
//! One grammar serves both on-disk files: plain `key = value` lines with
//! `#`/`;` comments, plus bracketed `[section]` headers. The main
//! settings file uses only the flat global scope; the tunnels file
//! (consumed elsewhere) groups its entries under sections via the same
//! [`Document`] parser.
//!
//! A missing or unreadable main settings file is a tolerated condition,
//! not an error: the daemon may run purely from command-line flags. It
//! is reported through `tracing` and parsing continues with an empty
//! partial result.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::registry::Registry;
use crate::settings::Partial;
use crate::value;

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key text, trimmed.
    pub key: String,
    /// Value text, trimmed.
    pub value: String,
    /// One-based line number in the source file.
    pub line: usize,
}

/// A bracketed section and the entries under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name without the brackets.
    pub name: String,
    /// Entries in file order.
    pub entries: Vec<Entry>,
    /// One-based line number of the header.
    pub line: usize,
}

/// A parsed config file: flat global entries plus any sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Entries before the first section header.
    pub global: Vec<Entry>,
    /// Sections in file order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Parses the line-oriented grammar.
    ///
    /// Blank lines and `#`/`;` comments are skipped; `[name]` opens a
    /// section; everything else must be `key = value`.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` with the path and line context for any line
    /// violating the grammar.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut doc = Self::default();

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(name) = section_header(trimmed) {
                doc.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                    line,
                });
                continue;
            }

            let entry = key_value(trimmed, line).ok_or_else(|| ConfigError::Malformed {
                path: path.to_path_buf(),
                line,
                text: trimmed.to_string(),
            })?;

            match doc.sections.last_mut() {
                Some(section) => section.entries.push(entry),
                None => doc.global.push(entry),
            }
        }

        Ok(doc)
    }

    /// The first section with the given name, if any.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let name = inner.trim();
    if name.is_empty() { None } else { Some(name) }
}

fn key_value(line: &str, number: usize) -> Option<Entry> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(Entry {
        key: key.to_string(),
        value: value.trim().to_string(),
        line: number,
    })
}

/// Loads and parses a document whose absence is an error (the tunnels
/// file consumer goes through here).
///
/// # Errors
///
/// Returns `FileRead` when the file cannot be read and `Malformed` for
/// grammar violations.
pub fn load_document(path: &Path) -> Result<Document, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Document::parse(&text, path)
}

/// Parses the main settings file into a partial result.
///
/// An unreadable file yields an empty partial (reported, non-fatal).
/// Keys are matched against the registry and values coerced exactly as
/// on the command line. Sectioned keys do not belong to the flat main
/// config and are rejected as unknown.
///
/// # Errors
///
/// Returns `Malformed` for grammar violations, `UnknownOption` for
/// unregistered keys, and `TypeMismatch` for uncoercible values.
pub fn parse_config_file(path: &Path, registry: &Registry) -> Result<Partial, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            warn!(path = %path.display(), %error, "could not open config file; continuing with command-line values and defaults");
            return Ok(Partial::new());
        }
    };

    let doc = Document::parse(&text, path)?;

    if let Some(section) = doc.sections.first() {
        let token = section.entries.first().map_or_else(
            || format!("[{}]", section.name),
            |entry| format!("{}.{}", section.name, entry.key),
        );
        return Err(ConfigError::unknown(token));
    }

    let mut out = Partial::new();
    for entry in &doc.global {
        let key = registry
            .lookup_long(&entry.key)
            .ok_or_else(|| ConfigError::unknown(entry.key.as_str()))?;
        let value =
            value::coerce(key.kind(), &entry.value).ok_or_else(|| ConfigError::TypeMismatch {
                option: key.name(),
                value: entry.value.clone(),
                expected: key.kind(),
            })?;
        out.insert(key, value);
    }

    Ok(out)
}
