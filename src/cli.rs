//! Command-line parsing against the option registry.
//!
//! Accepted forms: `--name value`, `--name=value`, `-x value`, `-x=value`.
//! Boolean options take an optional explicit literal (`--log 1`,
//! `--log=true`); bare presence means true. `--help` is a pure flag and
//! never consumes a value. Unknown tokens and uncoercible values are
//! fatal; this pass must complete before the config file is read so the
//! merge can honor command-line precedence.

use crate::error::ConfigError;
use crate::registry::{OptionKey, Registry};
use crate::settings::Partial;
use crate::value::{self, OptionValue, ValueKind};

/// Parses command-line tokens (without the program name) into a partial
/// result.
///
/// # Errors
///
/// Returns `UnknownOption` for a token matching no descriptor,
/// `TypeMismatch` for a value that cannot be coerced to the option's
/// declared type, and `MissingValue` when a non-boolean option ends the
/// token stream without a value.
pub fn parse<I, S>(tokens: I, registry: &Registry) -> Result<Partial, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
    let mut out = Partial::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        let (key, inline) = match_token(token, registry)?;

        index += 1;
        let value = match key.kind() {
            ValueKind::Bool => parse_bool_option(key, inline, &tokens, &mut index)?,
            kind => {
                let raw = match inline {
                    Some(v) => v.to_string(),
                    None => next_value(key, &tokens, &mut index)?,
                };
                coerce_or_mismatch(key, kind, &raw)?
            }
        };

        // Last occurrence of a repeated option wins.
        out.insert(key, value);
    }

    Ok(out)
}

/// Resolves one token to a key, splitting off an inline `=value`.
fn match_token<'a>(
    token: &'a str,
    registry: &Registry,
) -> Result<(OptionKey, Option<&'a str>), ConfigError> {
    if let Some(rest) = token.strip_prefix("--") {
        let (name, inline) = split_inline(rest);
        let key = registry
            .lookup_long(name)
            .ok_or_else(|| ConfigError::unknown(token))?;
        return Ok((key, inline));
    }

    if let Some(rest) = token.strip_prefix('-') {
        let (alias, inline) = split_inline(rest);
        let mut chars = alias.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let key = registry
                .lookup_short(c)
                .ok_or_else(|| ConfigError::unknown(token))?;
            return Ok((key, inline));
        }
    }

    // Bare words and chained short flags are not part of the surface.
    Err(ConfigError::unknown(token))
}

fn split_inline(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    }
}

/// Boolean options: inline literal, lookahead literal, or bare = true.
fn parse_bool_option(
    key: OptionKey,
    inline: Option<&str>,
    tokens: &[String],
    index: &mut usize,
) -> Result<OptionValue, ConfigError> {
    if let Some(raw) = inline {
        return coerce_or_mismatch(key, ValueKind::Bool, raw);
    }

    // `help` never takes a value.
    if key != OptionKey::Help {
        if let Some(next) = tokens.get(*index) {
            if !next.starts_with('-') {
                if let Some(flag) = value::parse_bool_literal(next) {
                    *index += 1;
                    return Ok(OptionValue::Bool(flag));
                }
            }
        }
    }

    Ok(OptionValue::Bool(true))
}

fn next_value(
    key: OptionKey,
    tokens: &[String],
    index: &mut usize,
) -> Result<String, ConfigError> {
    let Some(raw) = tokens.get(*index) else {
        return Err(ConfigError::MissingValue {
            option: key.name().to_string(),
        });
    };
    *index += 1;
    Ok(raw.clone())
}

fn coerce_or_mismatch(
    key: OptionKey,
    kind: ValueKind,
    raw: &str,
) -> Result<OptionValue, ConfigError> {
    value::coerce(kind, raw).ok_or_else(|| ConfigError::TypeMismatch {
        option: key.name(),
        value: raw.to_string(),
        expected: kind,
    })
}
