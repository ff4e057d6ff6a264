//! Application-layer support for the entry point.
//!
//! This module holds the exit-code contract, tracing setup, and the
//! concrete validation pass behind the post-merge hook: the resolution
//! core only coerces types, while range and format checks live here.

use garlicd_config::{ConfigError, OptionKey, ResolvedSettings};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Lowest usable listening port.
const PORT_MIN: u16 = 1;

/// Highest usable listening port.
const PORT_MAX: u16 = 65535;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success, including "help shown" (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Fatal parse or validation error (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sanity-checks the merged settings before anything trusts them.
///
/// # Errors
///
/// Returns `PortOutOfRange` for any listening or proxy port outside
/// `[1, 65535]` (the control port may also be 0, meaning disabled), and
/// `InvalidBandwidth` when the bandwidth class is not `L` or `O`.
pub fn validate(settings: &ResolvedSettings) -> Result<(), ConfigError> {
    check_port(settings, OptionKey::Port)?;
    check_port(settings, OptionKey::HttpProxyPort)?;
    check_port(settings, OptionKey::SocksProxyPort)?;

    let control_port = settings.integer(OptionKey::ControlPort);
    if control_port != 0 {
        check_port(settings, OptionKey::ControlPort)?;
    }

    let bandwidth = settings.text(OptionKey::Bandwidth);
    if !matches!(bandwidth, "L" | "O") {
        return Err(ConfigError::InvalidBandwidth {
            value: bandwidth.to_string(),
        });
    }

    Ok(())
}

fn check_port(settings: &ResolvedSettings, key: OptionKey) -> Result<(), ConfigError> {
    let value = settings.integer(key);
    if value < i64::from(PORT_MIN) || value > i64::from(PORT_MAX) {
        return Err(ConfigError::PortOutOfRange {
            option: key.name(),
            value,
            min: PORT_MIN,
            max: PORT_MAX,
        });
    }
    Ok(())
}
