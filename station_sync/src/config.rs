//! Application configuration: one TOML file for the whole run.
//!
//! Sections:
//! - `[feed]` — feed time zone and HTTP timeout
//! - `[urls]` — purpose → URL table; this is the URL-lookup collaborator
//!   behind [`feed_ingestor::login::LoginProvider`]
//! - `[selection]` — which places to record, see [`crate::places::config`]
//! - `[notify]` — subject prefix for change notifications
//!
//! Loading validates eagerly: malformed TOML, an unknown time zone, or an
//! empty domain code is a terminal error before anything touches the
//! network or the store.

use std::collections::BTreeMap;

use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use toml::from_str;

use feed_ingestor::login::{LoginError, LoginProvider};

use crate::places::config::{PlaceSelection, normalize_selection};
use crate::tz::parse_tz;

/// Top-level configuration file model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Feed transport and time handling.
    #[serde(default)]
    pub feed: FeedCfg,
    /// Purpose → URL table (e.g. `StationList = "https://..."`).
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
    /// Which places to record snapshots for.
    #[serde(default)]
    pub selection: PlaceSelection,
    /// Notification rendering options.
    #[serde(default)]
    pub notify: NotifyCfg,
}

/// `[feed]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedCfg {
    /// IANA name of the zone the feed's query-time comment is written in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// `[notify]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyCfg {
    /// Prefix for notification subjects, rendered as `[<prefix>] <time>`.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_subject_prefix() -> String {
    "station-sync".to_string()
}

impl Default for FeedCfg {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for NotifyCfg {
    fn default() -> Self {
        Self {
            subject_prefix: default_subject_prefix(),
        }
    }
}

impl FeedCfg {
    /// The configured feed time zone, parsed.
    pub fn tz(&self) -> anyhow::Result<Tz> {
        parse_tz(&self.timezone)
    }
}

impl AppConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn load_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut cfg: AppConfig = from_str(toml_str).context("failed to parse config TOML")?;
        cfg.feed
            .tz()
            .context("config [feed].timezone is not a known zone")?;
        normalize_selection(&mut cfg.selection).context("config [selection] is invalid")?;
        Ok(cfg)
    }

    /// Read a configuration file from disk, parse, and validate it.
    pub fn load_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        Self::load_str(&text)
    }
}

impl LoginProvider for AppConfig {
    fn url(&self, purpose: &str) -> Result<String, LoginError> {
        self.urls
            .get(purpose)
            .cloned()
            .ok_or_else(|| LoginError::MissingUrl(purpose.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_ingestor::login::STATION_LIST;

    const FULL: &str = r#"
[feed]
timezone = "Europe/Berlin"
timeout_secs = 5

[urls]
StationList = "https://example.invalid/live.xml"

[selection]
domains = ["DE"]
cities = [14]

[notify]
subject_prefix = "bike-sync"
"#;

    #[test]
    fn full_config_loads_and_normalizes() {
        let cfg = AppConfig::load_str(FULL).unwrap();
        assert_eq!(cfg.feed.timeout_secs, 5);
        assert_eq!(cfg.selection.domains, vec!["de"]);
        assert_eq!(cfg.notify.subject_prefix, "bike-sync");
        assert_eq!(
            cfg.url(STATION_LIST).unwrap(),
            "https://example.invalid/live.xml"
        );
    }

    #[test]
    fn empty_config_gets_defaults() {
        let cfg = AppConfig::load_str("").unwrap();
        assert_eq!(cfg.feed.timezone, "UTC");
        assert_eq!(cfg.feed.timeout_secs, 20);
        assert!(cfg.selection.is_empty());
        assert!(cfg.url(STATION_LIST).is_err());
    }

    #[test]
    fn unknown_zone_is_terminal() {
        let err = AppConfig::load_str("[feed]\ntimezone = \"Nowhere/Atall\"").unwrap_err();
        assert!(err.to_string().contains("timezone"));
    }

    #[test]
    fn malformed_toml_is_terminal() {
        assert!(AppConfig::load_str("[feed").is_err());
    }
}
