//! Declarative catalog of recognized options.
//!
//! Every option the router understands is one variant of [`OptionKey`];
//! long names, short aliases, categories, and value kinds are fixed at
//! compile time, so uniqueness is structural. Defaults that can only be
//! known at runtime (the randomized listening port, the resolved config
//! file paths) are injected through [`RuntimeDefaults`] when the
//! [`Registry`] is built, once per process start.

use std::path::PathBuf;

use rand::Rng;

use crate::paths;
use crate::value::{OptionValue, ValueKind};

/// Lowest port the randomizer may pick.
pub const PORT_RANGE_MIN: u16 = 9111;

/// Highest port the randomizer may pick.
pub const PORT_RANGE_MAX: u16 = 30777;

/// Placeholder control-service password shipped in the defaults.
pub const CONTROL_PASSWORD_PLACEHOLDER: &str = "itoopie";

/// Draws the default listening port for this process start.
///
/// Uniform in `[PORT_RANGE_MIN, PORT_RANGE_MAX]` from `thread_rng`, a
/// ChaCha-based CSPRNG, so the default is not predictable across nodes.
/// The drawn value is only used when neither the command line nor the
/// config file supplies `port`; it is never persisted.
#[must_use]
pub fn random_default_port() -> u16 {
    rand::thread_rng().gen_range(PORT_RANGE_MIN..=PORT_RANGE_MAX)
}

/// Named grouping of options for help display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// The help flags themselves.
    Help,
    /// Host and listening port.
    Basic,
    /// Logging and daemonization.
    System,
    /// Transport and router-role settings.
    Network,
    /// HTTP and SOCKS proxy endpoints.
    Proxy,
    /// The control service.
    Control,
    /// Locations of the configuration files.
    Config,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 7] = [
        Self::Help,
        Self::Basic,
        Self::System,
        Self::Network,
        Self::Proxy,
        Self::Control,
        Self::Config,
    ];

    /// Human-readable section title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Help => "Help",
            Self::Basic => "Basic",
            Self::System => "System",
            Self::Network => "Network",
            Self::Proxy => "Proxy",
            Self::Control => "Control service",
            Self::Config => "Configuration files",
        }
    }
}

/// Closed set of every option the router recognizes.
///
/// Declaration order is category order; [`OptionKey::ALL`] and the
/// registry's descriptor list follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    /// `--help` / `-h`: general usage.
    Help,
    /// `--help-with` / `-w`: help for one category or `all`.
    HelpWith,
    /// `--host`: external address.
    Host,
    /// `--port` / `-p`: listening port.
    Port,
    /// `--log` / `-l`: log to file.
    Log,
    /// `--daemon` / `-d`: run in the background.
    Daemon,
    /// `--service` / `-s`: use system service folders.
    Service,
    /// `--v6` / `-6`: enable IPv6.
    V6,
    /// `--floodfill` / `-f`: operate as a floodfill router.
    Floodfill,
    /// `--bandwidth` / `-b`: bandwidth class.
    Bandwidth,
    /// `--httpproxyport`: HTTP proxy port.
    HttpProxyPort,
    /// `--httpproxyaddress`: HTTP proxy address.
    HttpProxyAddress,
    /// `--socksproxyport`: SOCKS proxy port.
    SocksProxyPort,
    /// `--socksproxyaddress`: SOCKS proxy address.
    SocksProxyAddress,
    /// `--proxykeys` / `-k`: keys file for the proxy destination.
    ProxyKeys,
    /// `--i2pcontrolport`: control service port (0 disables).
    ControlPort,
    /// `--i2pcontroladdress`: control service address.
    ControlAddress,
    /// `--i2pcontrolpassword`: control service password.
    ControlPassword,
    /// `--config` / `-c`: main settings file path.
    ConfigFile,
    /// `--tunnelscfg` / `-t`: tunnels file path.
    TunnelsFile,
}

impl OptionKey {
    /// Every key, in category order.
    pub const ALL: [Self; 20] = [
        Self::Help,
        Self::HelpWith,
        Self::Host,
        Self::Port,
        Self::Log,
        Self::Daemon,
        Self::Service,
        Self::V6,
        Self::Floodfill,
        Self::Bandwidth,
        Self::HttpProxyPort,
        Self::HttpProxyAddress,
        Self::SocksProxyPort,
        Self::SocksProxyAddress,
        Self::ProxyKeys,
        Self::ControlPort,
        Self::ControlAddress,
        Self::ControlPassword,
        Self::ConfigFile,
        Self::TunnelsFile,
    ];

    /// Long name as written on the command line and in the config file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::HelpWith => "help-with",
            Self::Host => "host",
            Self::Port => "port",
            Self::Log => "log",
            Self::Daemon => "daemon",
            Self::Service => "service",
            Self::V6 => "v6",
            Self::Floodfill => "floodfill",
            Self::Bandwidth => "bandwidth",
            Self::HttpProxyPort => "httpproxyport",
            Self::HttpProxyAddress => "httpproxyaddress",
            Self::SocksProxyPort => "socksproxyport",
            Self::SocksProxyAddress => "socksproxyaddress",
            Self::ProxyKeys => "proxykeys",
            Self::ControlPort => "i2pcontrolport",
            Self::ControlAddress => "i2pcontroladdress",
            Self::ControlPassword => "i2pcontrolpassword",
            Self::ConfigFile => "config",
            Self::TunnelsFile => "tunnelscfg",
        }
    }

    /// Single-character alias, where one exists.
    #[must_use]
    pub const fn short(self) -> Option<char> {
        match self {
            Self::Help => Some('h'),
            Self::HelpWith => Some('w'),
            Self::Port => Some('p'),
            Self::Log => Some('l'),
            Self::Daemon => Some('d'),
            Self::Service => Some('s'),
            Self::V6 => Some('6'),
            Self::Floodfill => Some('f'),
            Self::Bandwidth => Some('b'),
            Self::ProxyKeys => Some('k'),
            Self::ConfigFile => Some('c'),
            Self::TunnelsFile => Some('t'),
            _ => None,
        }
    }

    /// The category this key is listed under.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Help | Self::HelpWith => Category::Help,
            Self::Host | Self::Port => Category::Basic,
            Self::Log | Self::Daemon | Self::Service => Category::System,
            Self::V6 | Self::Floodfill | Self::Bandwidth => Category::Network,
            Self::HttpProxyPort
            | Self::HttpProxyAddress
            | Self::SocksProxyPort
            | Self::SocksProxyAddress
            | Self::ProxyKeys => Category::Proxy,
            Self::ControlPort | Self::ControlAddress | Self::ControlPassword => Category::Control,
            Self::ConfigFile | Self::TunnelsFile => Category::Config,
        }
    }

    /// The declared value type.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Help
            | Self::Log
            | Self::Daemon
            | Self::Service
            | Self::V6
            | Self::Floodfill => ValueKind::Bool,
            Self::Port | Self::HttpProxyPort | Self::SocksProxyPort | Self::ControlPort => {
                ValueKind::Integer
            }
            Self::HelpWith
            | Self::Host
            | Self::Bandwidth
            | Self::HttpProxyAddress
            | Self::SocksProxyAddress
            | Self::ProxyKeys
            | Self::ControlAddress
            | Self::ControlPassword
            | Self::ConfigFile
            | Self::TunnelsFile => ValueKind::Str,
        }
    }

    /// Position of this key in [`OptionKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a key by its long name.
    #[must_use]
    pub fn from_long(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Looks up a key by its short alias.
    #[must_use]
    pub fn from_short(alias: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.short() == Some(alias))
    }
}

/// One registered option: its key, optional default, and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// The option's key.
    pub key: OptionKey,
    /// Built-in default, if the option has one. `None` means the
    /// resolved value falls back to the kind's zero value when unset.
    pub default: Option<OptionValue>,
    /// One-line help text.
    pub help: &'static str,
}

/// Per-run values wired into the registry's defaults.
#[derive(Debug, Clone)]
pub struct RuntimeDefaults {
    /// The randomized default listening port for this run.
    pub port: u16,
    /// Resolved default path of the main settings file.
    pub config_file: PathBuf,
    /// Resolved default path of the tunnels file.
    pub tunnels_file: PathBuf,
}

impl RuntimeDefaults {
    /// Draws the port and resolves the default file locations.
    #[must_use]
    pub fn gather() -> Self {
        Self {
            port: random_default_port(),
            config_file: paths::default_path(paths::CONFIG_FILE_NAME),
            tunnels_file: paths::default_path(paths::TUNNELS_FILE_NAME),
        }
    }
}

/// The assembled option catalog for one process run.
///
/// Construction is deterministic apart from the injected runtime
/// defaults; the descriptor list follows [`OptionKey::ALL`] order.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: Vec<Descriptor>,
}

impl Registry {
    /// Builds the registry with the given runtime defaults.
    #[must_use]
    pub fn new(runtime: &RuntimeDefaults) -> Self {
        let descriptors = OptionKey::ALL
            .iter()
            .map(|&key| build_descriptor(key, runtime))
            .collect();
        Self { descriptors }
    }

    /// Builds the registry for this process: draws the random port and
    /// resolves the default file locations.
    #[must_use]
    pub fn with_runtime_defaults() -> Self {
        Self::new(&RuntimeDefaults::gather())
    }

    /// All descriptors in category order.
    #[must_use]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The descriptor for a key.
    #[must_use]
    pub fn descriptor(&self, key: OptionKey) -> &Descriptor {
        &self.descriptors[key.index()]
    }

    /// Descriptors listed under one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Descriptor> {
        self.descriptors
            .iter()
            .filter(move |d| d.key.category() == category)
    }

    /// Built-in default for a key, if it has one.
    #[must_use]
    pub fn default_for(&self, key: OptionKey) -> Option<&OptionValue> {
        self.descriptor(key).default.as_ref()
    }

    /// Looks up a key by its long name.
    #[must_use]
    pub fn lookup_long(&self, name: &str) -> Option<OptionKey> {
        OptionKey::from_long(name)
    }

    /// Looks up a key by its short alias.
    #[must_use]
    pub fn lookup_short(&self, alias: char) -> Option<OptionKey> {
        OptionKey::from_short(alias)
    }
}

fn build_descriptor(key: OptionKey, runtime: &RuntimeDefaults) -> Descriptor {
    let (default, help) = match key {
        OptionKey::Help => (None, "Print general usage and exit"),
        OptionKey::HelpWith => (
            None,
            "Print help for one option category \
             (all | basic | system | network | proxy | i2pcs | config)",
        ),
        OptionKey::Host => (
            Some(OptionValue::Str("127.0.0.1".into())),
            "External address to advertise",
        ),
        OptionKey::Port => (
            Some(OptionValue::Integer(i64::from(runtime.port))),
            "Port to listen on (default: randomized per run)",
        ),
        OptionKey::Log => (
            Some(OptionValue::Bool(false)),
            "Log to file (1 = enabled, 0 = disabled)",
        ),
        OptionKey::Daemon => (
            Some(OptionValue::Bool(false)),
            "Run in the background (1 = enabled, 0 = disabled)",
        ),
        OptionKey::Service => (
            Some(OptionValue::Bool(false)),
            "Use system service folders for pid, log, and data files",
        ),
        OptionKey::V6 => (
            Some(OptionValue::Bool(false)),
            "Enable IPv6 transport (1 = enabled, 0 = disabled)",
        ),
        OptionKey::Floodfill => (
            Some(OptionValue::Bool(false)),
            "Operate as a floodfill router (1 = enabled, 0 = disabled)",
        ),
        OptionKey::Bandwidth => (
            Some(OptionValue::Str("L".into())),
            "Bandwidth class: L (limited to 32KB/s) or O (unlimited)",
        ),
        OptionKey::HttpProxyPort => (
            Some(OptionValue::Integer(4446)),
            "HTTP proxy listening port",
        ),
        OptionKey::HttpProxyAddress => (
            Some(OptionValue::Str("127.0.0.1".into())),
            "HTTP proxy listening address",
        ),
        OptionKey::SocksProxyPort => (
            Some(OptionValue::Integer(4447)),
            "SOCKS proxy listening port",
        ),
        OptionKey::SocksProxyAddress => (
            Some(OptionValue::Str("127.0.0.1".into())),
            "SOCKS proxy listening address",
        ),
        OptionKey::ProxyKeys => (
            Some(OptionValue::Str(String::new())),
            "Optional keys file for the proxy's local destination",
        ),
        OptionKey::ControlPort => (
            Some(OptionValue::Integer(0)),
            "Control service port (usually 7650); 0 leaves the service disabled",
        ),
        OptionKey::ControlAddress => (
            Some(OptionValue::Str("127.0.0.1".into())),
            "Control service listening address",
        ),
        OptionKey::ControlPassword => (
            Some(OptionValue::Str(CONTROL_PASSWORD_PLACEHOLDER.into())),
            "Control service password",
        ),
        OptionKey::ConfigFile => (
            Some(OptionValue::Str(
                runtime.config_file.display().to_string(),
            )),
            "Path to the main settings file; command-line values take \
             precedence over values found there",
        ),
        OptionKey::TunnelsFile => (
            Some(OptionValue::Str(
                runtime.tunnels_file.display().to_string(),
            )),
            "Path to the tunnels configuration file",
        ),
    };

    Descriptor { key, default, help }
}
