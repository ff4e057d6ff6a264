//! Resolved settings and the two-source merge.
//!
//! Each parse pass produces a [`Partial`]; [`merge`] folds the two
//! partials and the registry defaults into one [`ResolvedSettings`] with
//! a provenance tag per key. The resolved structure is built once and
//! replaced wholesale on any reload, never field-mutated, so readers can
//! hold a snapshot without locking.

use std::collections::BTreeMap;
use std::fmt;

use crate::registry::{Category, OptionKey, Registry};
use crate::value::OptionValue;

/// Values collected from a single source (command line or config file).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partial {
    values: BTreeMap<OptionKey, OptionValue>,
}

impl Partial {
    /// Creates an empty partial result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value; a later value for the same key wins.
    pub fn insert(&mut self, key: OptionKey, value: OptionValue) {
        self.values.insert(key, value);
    }

    /// The value for a key, if this source supplied one.
    #[must_use]
    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key)
    }

    /// Whether this source supplied a value for the key.
    #[must_use]
    pub fn contains(&self, key: OptionKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Whether this source supplied anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of keys this source supplied.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the supplied keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &OptionValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Which source supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Explicitly set on the command line.
    CommandLine,
    /// Set in the config file (and not overridden on the command line).
    File,
    /// Neither source set it; the built-in default applies.
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommandLine => "command line",
            Self::File => "config file",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// One resolved value with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The value in effect.
    pub value: OptionValue,
    /// Where it came from.
    pub provenance: Provenance,
}

/// The authoritative merged settings: one entry per registered key.
///
/// Entries are stored in [`OptionKey::ALL`] order, so lookup is total;
/// every key has exactly one entry after [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    entries: Vec<Resolved>,
}

impl ResolvedSettings {
    /// The resolved entry for a key.
    #[must_use]
    pub fn get(&self, key: OptionKey) -> &Resolved {
        &self.entries[key.index()]
    }

    /// The value in effect for a key.
    #[must_use]
    pub fn value(&self, key: OptionKey) -> &OptionValue {
        &self.get(key).value
    }

    /// Which source supplied the key.
    #[must_use]
    pub fn provenance(&self, key: OptionKey) -> Provenance {
        self.get(key).provenance
    }

    /// Boolean value for a key (false when the key is not a boolean).
    #[must_use]
    pub fn boolean(&self, key: OptionKey) -> bool {
        self.value(key).as_bool().unwrap_or(false)
    }

    /// Integer value for a key (0 when the key is not an integer).
    #[must_use]
    pub fn integer(&self, key: OptionKey) -> i64 {
        self.value(key).as_integer().unwrap_or(0)
    }

    /// String value for a key ("" when the key is not a string).
    #[must_use]
    pub fn text(&self, key: OptionKey) -> &str {
        self.value(key).as_str().unwrap_or("")
    }

    /// Iterates over every entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &Resolved)> {
        OptionKey::ALL.iter().map(|&k| (k, self.get(k)))
    }
}

impl fmt::Display for ResolvedSettings {
    /// Effective-configuration dump, one `key = value (source)` line per
    /// option. The transient help flags are not settings and are skipped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, resolved) in self.iter() {
            if key.category() == Category::Help {
                continue;
            }
            writeln!(
                f,
                "{} = {}  ({})",
                key.name(),
                resolved.value,
                resolved.provenance
            )?;
        }
        Ok(())
    }
}

/// Merges the two parse passes against the registry.
///
/// For every registered key: the command-line value wins, then the file
/// value, then the built-in default; a key with no default falls back to
/// its kind's zero value. Pure and idempotent — the same inputs always
/// produce an equal result.
#[must_use]
pub fn merge(cli: &Partial, file: &Partial, registry: &Registry) -> ResolvedSettings {
    let entries = OptionKey::ALL
        .iter()
        .map(|&key| {
            if let Some(value) = cli.get(key) {
                Resolved {
                    value: value.clone(),
                    provenance: Provenance::CommandLine,
                }
            } else if let Some(value) = file.get(key) {
                Resolved {
                    value: value.clone(),
                    provenance: Provenance::File,
                }
            } else {
                Resolved {
                    value: registry
                        .default_for(key)
                        .cloned()
                        .unwrap_or_else(|| key.kind().zero()),
                    provenance: Provenance::Default,
                }
            }
        })
        .collect();

    ResolvedSettings { entries }
}
