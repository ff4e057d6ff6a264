//! The single-pass resolution state machine.
//!
//! Start → draw port → build registry → parse command line → parse
//! config file → help check → merge. Fatal parse errors abort before any
//! resolved settings exist; a help request short-circuits with the
//! rendered text. A reload is a fresh call producing a new
//! [`ResolvedSettings`] that replaces the old one wholesale.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ConfigError;
use crate::registry::{OptionKey, Registry};
use crate::settings::{ResolvedSettings, merge};
use crate::{cli, file, help};

/// Terminal state of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Help was requested: the rendered text, and the caller must exit
    /// without starting services.
    Help(String),
    /// Normal startup: the merged settings, ready for the validation
    /// hook and then for consumers.
    Ready(ResolvedSettings),
}

/// Resolves the effective configuration for this process start.
///
/// Builds a fresh registry (drawing the randomized port default) and
/// runs the full pass over the given command-line tokens (without the
/// program name).
///
/// # Errors
///
/// Any fatal parse error from either source; see [`ConfigError`].
pub fn resolve<I, S>(tokens: I) -> Result<Outcome, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let registry = Registry::with_runtime_defaults();
    resolve_with(tokens, &registry)
}

/// Runs the resolution pass against an existing registry.
///
/// This is the reusable routine a config reload would call: same
/// registry, fresh parse, new settings.
///
/// # Errors
///
/// Any fatal parse error from either source; see [`ConfigError`].
pub fn resolve_with<I, S>(tokens: I, registry: &Registry) -> Result<Outcome, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Command-line parsing must complete first: the merge gives its
    // values precedence over everything the file supplies.
    let cli = cli::parse(tokens, registry)?;

    let config_path = config_file_path(&cli, registry);
    debug!(path = %config_path.display(), "reading settings file");
    let file = file::parse_config_file(&config_path, registry)?;

    match help::selector(&cli) {
        help::HelpSelector::General => Ok(Outcome::Help(help::general_help(registry))),
        help::HelpSelector::Topic(name) => Ok(Outcome::Help(help::render_topic(&name, registry))),
        help::HelpSelector::None => Ok(Outcome::Ready(merge(&cli, &file, registry))),
    }
}

/// The settings-file path: command-line override or registry default.
fn config_file_path(cli: &crate::settings::Partial, registry: &Registry) -> PathBuf {
    let from_cli = cli.get(OptionKey::ConfigFile).and_then(|v| v.as_str());
    let from_default = registry
        .default_for(OptionKey::ConfigFile)
        .and_then(|v| v.as_str());

    PathBuf::from(from_cli.or(from_default).unwrap_or(""))
}
