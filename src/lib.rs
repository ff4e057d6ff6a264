//! Configuration resolution for the garlicd overlay router.
//!
//! This crate merges the command line and the persistent settings file
//! into one authoritative set of runtime settings, renders the
//! multi-section help text from the same declarative registry, and draws
//! the randomized default listening port once per process start.
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit command-line arguments**
//! 2. **Settings file** (`garlicd.conf`)
//! 3. **Built-in defaults** (including the per-run randomized port)
//!
//! Every resolved value carries a [`settings::Provenance`] tag recording
//! which source supplied it.
//!
//! # Lifecycle
//!
//! [`resolve::resolve`] runs the whole single pass: parse the command
//! line, parse the settings file (a missing file is tolerated), honor a
//! help request by short-circuiting with rendered text, otherwise merge.
//! The resulting [`settings::ResolvedSettings`] is immutable; a reload
//! re-runs [`resolve::resolve_with`] and replaces it wholesale. Callers
//! run their validation pass between the merge and first use.

pub mod cli;
pub mod error;
pub mod file;
pub mod help;
pub mod paths;
pub mod registry;
pub mod resolve;
pub mod settings;
pub mod value;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod file_tests;

pub use error::ConfigError;
pub use registry::{Category, OptionKey, Registry, RuntimeDefaults};
pub use resolve::{Outcome, resolve, resolve_with};
pub use settings::{Partial, Provenance, Resolved, ResolvedSettings, merge};
pub use value::{OptionValue, ValueKind};
