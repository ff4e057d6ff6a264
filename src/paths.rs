//! Default locations for the on-disk configuration files.
//!
//! The platform data directory (via `dirs`) holds the router's files
//! under a `garlicd` subdirectory; when no data directory is available
//! (minimal containers, unusual platforms) the current directory is used.

use std::path::PathBuf;

/// File name of the main settings file.
pub const CONFIG_FILE_NAME: &str = "garlicd.conf";

/// File name of the tunnels configuration file.
pub const TUNNELS_FILE_NAME: &str = "tunnels.cfg";

/// Returns the default full path for a router data file.
#[must_use]
pub fn default_path(file_name: &str) -> PathBuf {
    data_dir().join(file_name)
}

/// The directory holding the router's persistent files.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("."), |d| d.join("garlicd"))
}
