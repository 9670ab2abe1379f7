//! Settings and the per-run view options.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `NAGIOS_VIEW_*` environment variables. Command-line
//! flags are applied on top by the binary, producing one immutable
//! [`ViewOptions`] that every pipeline stage receives explicitly.
//!
//! ```toml
//! file = "/usr/local/nagios/var/status.dat"
//! interval = "30s"
//! times = "all"
//! color = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::data::duration::parse_interval;
use crate::data::FilterSet;

/// Default location of the Nagios status file.
pub const DEFAULT_STATUS_FILE: &str = "/var/spool/nagios/status.dat";

/// Default delay between passes in watch mode.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// When to show the time since the last state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Never.
    None,
    /// Only for hosts and services that are not OK.
    #[default]
    Problems,
    /// Always.
    All,
}

/// Settings that may come from a config file or the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub file: PathBuf,
    /// Delay between passes in watch mode ("10s", "2m", or bare seconds).
    #[serde(deserialize_with = "interval")]
    pub interval: Duration,
    pub times: TimeMode,
    /// Force color on or off; `None` means "color when stdout is a terminal".
    pub color: Option<bool>,
    pub header: bool,
    pub status: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_STATUS_FILE),
            interval: DEFAULT_INTERVAL,
            times: TimeMode::default(),
            color: None,
            header: true,
            status: true,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, the per-user file
    /// (`$XDG_CONFIG_HOME/nagios-view/config.toml`) is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("file", defaults.file.display().to_string())?
            .set_default("interval", "10s")?
            .set_default("times", "problems")?
            .set_default("header", defaults.header)?
            .set_default("status", defaults.status)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => match user_config_path() {
                Some(path) => builder.add_source(File::from(path).required(false)),
                None => builder,
            },
        };

        builder
            .add_source(Environment::with_prefix("NAGIOS_VIEW").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

fn interval<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Secs(u64),
        Text(String),
    }

    let text = match Raw::deserialize(d)? {
        Raw::Secs(secs) => secs.to_string(),
        Raw::Text(text) => text,
    };
    parse_interval(&text).map_err(serde::de::Error::custom)
}

fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("nagios-view").join("config.toml"))
}

/// Everything a refresh pass needs to know about what to show.
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Status source, shown in the header line.
    pub file: PathBuf,
    pub header: bool,
    /// Print the totals block.
    pub status: bool,
    /// Print only the totals block.
    pub status_only: bool,
    pub hosts_only: bool,
    pub services_only: bool,
    pub problems_only: bool,
    pub hide_acknowledged: bool,
    pub times: TimeMode,
    pub color: bool,
    pub watch: bool,
    pub interval: Duration,
    pub filters: FilterSet,
}

impl ViewOptions {
    /// View options for `settings` with every mode switch off.
    pub fn from_settings(settings: &Settings, color: bool) -> Self {
        Self {
            file: settings.file.clone(),
            header: settings.header,
            status: settings.status,
            status_only: false,
            hosts_only: false,
            services_only: false,
            problems_only: false,
            hide_acknowledged: false,
            times: settings.times,
            color: settings.color.unwrap_or(color),
            watch: false,
            interval: settings.interval,
            filters: FilterSet::default(),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), false)
    }
}
