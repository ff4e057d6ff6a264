//! Help and usage rendering, driven by the option registry.
//!
//! Renderers return strings; the caller decides where they go. Any help
//! request means "stop, do not proceed": the driver maps a non-empty
//! selector to [`crate::resolve::Outcome::Help`].

use std::fmt::Write as _;

use crate::registry::{Category, Descriptor, OptionKey, Registry};
use crate::settings::Partial;

/// Version string embedded in the banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What kind of help, if any, the command line asked for.
///
/// `--help` wins over `--help-with`; when both are present the topic is
/// not evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpSelector {
    /// No help requested; startup proceeds.
    None,
    /// `--help`: banner plus general usage.
    General,
    /// `--help-with <name>`: a category name, `all`, or an unrecognized
    /// string (rendered as an unknown-option message).
    Topic(String),
}

/// The recognized `--help-with` topics. Names are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    /// Every category except Help.
    All,
    /// One category.
    Category(Category),
}

impl HelpTopic {
    /// Maps a topic name to a topic.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "basic" => Some(Self::Category(Category::Basic)),
            "system" => Some(Self::Category(Category::System)),
            "network" => Some(Self::Category(Category::Network)),
            "proxy" => Some(Self::Category(Category::Proxy)),
            "i2pcs" => Some(Self::Category(Category::Control)),
            "config" => Some(Self::Category(Category::Config)),
            _ => None,
        }
    }
}

/// Derives the help selector from the parsed command line.
#[must_use]
pub fn selector(cli: &Partial) -> HelpSelector {
    if cli.contains(OptionKey::Help) {
        return HelpSelector::General;
    }
    if let Some(value) = cli.get(OptionKey::HelpWith) {
        if let Some(name) = value.as_str() {
            return HelpSelector::Topic(name.to_string());
        }
    }
    HelpSelector::None
}

/// The top-level banner with the project name and version.
#[must_use]
pub fn banner() -> String {
    format!(
        ":----------------------------------------------------:\n\
         |              The Garlicd Router Project            |\n\
         |                 version {VERSION:<8}                   |\n\
         :----------------------------------------------------:\n"
    )
}

/// Banner plus general usage and the Help category listing.
#[must_use]
pub fn general_help(registry: &Registry) -> String {
    let mut out = banner();
    out.push_str(
        "\nGeneral usage:\n\n\
           $ garlicd\n\n\
         A random listening port is drawn on each start. Specify one\n\
         with --port, or set `port` in the settings file instead.\n\n\
         Reload the configuration file:\n\n\
           $ pkill -HUP garlicd\n\n\
         See garlicd.conf and tunnels.cfg for more options.\n\n",
    );
    out.push_str(&render_category(Category::Help, registry));
    out
}

/// Renders one `--help-with` topic: a category, `all`, or an
/// unknown-option message for anything unrecognized.
#[must_use]
pub fn render_topic(name: &str, registry: &Registry) -> String {
    match HelpTopic::from_name(name) {
        Some(HelpTopic::All) => Category::ALL
            .iter()
            .filter(|&&c| c != Category::Help)
            .map(|&c| render_category(c, registry))
            .collect(),
        Some(HelpTopic::Category(category)) => render_category(category, registry),
        None => format!("Unknown option '{name}'\nTry using --help\n"),
    }
}

/// Renders the descriptors of one category.
#[must_use]
pub fn render_category(category: Category, registry: &Registry) -> String {
    let title = category.title();
    let mut out = format!("{title}\n{}\n\n", "=".repeat(title.len()));

    for descriptor in registry.in_category(category) {
        render_descriptor(&mut out, descriptor);
    }

    out
}

fn render_descriptor(out: &mut String, descriptor: &Descriptor) {
    let key = descriptor.key;
    let _ = write!(out, "  --{}", key.name());
    if let Some(alias) = key.short() {
        let _ = write!(out, ", -{alias}");
    }
    let _ = writeln!(out, "  <{}>", key.kind());
    let _ = writeln!(out, "      {}", descriptor.help);
    if let Some(default) = &descriptor.default {
        let _ = writeln!(out, "      Default: {default}");
    }
    out.push('\n');
}
