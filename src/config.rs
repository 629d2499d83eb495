//! Console settings.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! `FIREWALL_CONSOLE_*` environment variables (`__` separates sections, e.g.
//! `FIREWALL_CONSOLE_POLLING__INTERVAL=2s`), then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::app::AppOptions;
use crate::data::duration::serde_duration;
use crate::sync::BackoffPolicy;

pub const ENV_PREFIX: &str = "FIREWALL_CONSOLE";
pub const DEFAULT_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub polling: PollingSettings,
    pub feeds: FeedSettings,
    pub notifications: NotificationSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub url: String,
    /// Use the in-process demo backend instead of `url`.
    pub demo: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    #[serde(deserialize_with = "serde_duration::deserialize")]
    pub interval: Duration,
    pub backoff: bool,
    #[serde(deserialize_with = "serde_duration::deserialize")]
    pub max_backoff: Duration,
    pub jitter: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub stats: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(deserialize_with = "serde_duration::deserialize")]
    pub ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub file: PathBuf,
    pub level: String,
}

/// Values given on the command line; they beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub interval: Option<String>,
    pub demo: bool,
    pub log_file: Option<PathBuf>,
    pub no_backoff: bool,
}

impl Settings {
    /// Load settings from every layer and validate them.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(file, overrides, Environment::default())
    }

    fn load_with_env(file: Option<&Path>, overrides: &Overrides, env: Environment) -> Result<Self> {
        let mut builder = defaults(Config::builder())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            env.prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(ref url) = overrides.url {
            builder = builder.set_override("backend.url", url.as_str())?;
        }
        if let Some(ref interval) = overrides.interval {
            builder = builder.set_override("polling.interval", interval.as_str())?;
        }
        if overrides.demo {
            builder = builder.set_override("backend.demo", true)?;
        }
        if let Some(ref log_file) = overrides.log_file {
            builder = builder.set_override("log.file", log_file.to_string_lossy().as_ref())?;
        }
        if overrides.no_backoff {
            builder = builder.set_override("polling.backoff", false)?;
        }

        let settings: Settings = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the console can not run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.backend.url.starts_with("http://") || self.backend.url.starts_with("https://")) {
            bail!("backend.url must start with http:// or https://: {}", self.backend.url);
        }
        if self.polling.interval.is_zero() {
            bail!("polling.interval must be greater than zero");
        }
        if self.notifications.ttl.is_zero() {
            bail!("notifications.ttl must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.polling.jitter) {
            bail!("polling.jitter must be within [0, 1]: {}", self.polling.jitter);
        }
        Ok(())
    }

    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy {
            enabled: self.polling.backoff,
            max_delay: self.polling.max_backoff,
            jitter: self.polling.jitter,
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            interval: self.polling.interval,
            backoff: self.backoff(),
            stats: self.feeds.stats,
            notice_ttl: self.notifications.ttl,
        }
    }
}

fn defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_default("backend.url", DEFAULT_URL)?
        .set_default("backend.demo", false)?
        .set_default("polling.interval", "5s")?
        .set_default("polling.backoff", true)?
        .set_default("polling.max_backoff", "60s")?
        .set_default("polling.jitter", 0.1)?
        .set_default("feeds.stats", true)?
        .set_default("notifications.ttl", "3s")?
        .set_default("log.file", "firewall-console.log")?
        .set_default("log.level", "info")?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env() -> Environment {
        Environment::default().source(Some(config::Map::new()))
    }

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::default().source(Some(vars))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, &Overrides::default(), no_env()).unwrap();
        assert_eq!(settings.backend.url, DEFAULT_URL);
        assert!(!settings.backend.demo);
        assert_eq!(settings.polling.interval, Duration::from_secs(5));
        assert!(settings.polling.backoff);
        assert_eq!(settings.polling.max_backoff, Duration::from_secs(60));
        assert_eq!(settings.notifications.ttl, Duration::from_secs(3));
        assert!(settings.feeds.stats);
        assert_eq!(settings.log.file, PathBuf::from("firewall-console.log"));
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let file = toml_file(
            r#"
[backend]
url = "http://firewall.internal:8000"

[polling]
interval = "10s"
jitter = 0.0

[feeds]
stats = false
"#,
        );

        let settings = Settings::load_with_env(
            Some(file.path()),
            &Overrides::default(),
            env(&[("FIREWALL_CONSOLE_POLLING__INTERVAL", "2s")]),
        )
        .unwrap();
        assert_eq!(settings.backend.url, "http://firewall.internal:8000");
        assert_eq!(settings.polling.interval, Duration::from_secs(2));
        assert_eq!(settings.polling.jitter, 0.0);
        assert!(!settings.feeds.stats);

        let overrides = Overrides {
            interval: Some("750ms".into()),
            no_backoff: true,
            ..Overrides::default()
        };
        let settings = Settings::load_with_env(
            Some(file.path()),
            &overrides,
            env(&[("FIREWALL_CONSOLE_POLLING__INTERVAL", "2s")]),
        )
        .unwrap();
        assert_eq!(settings.polling.interval, Duration::from_millis(750));
        assert!(!settings.app_options().backoff.enabled);
        assert!(!settings.app_options().stats);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_url = Overrides {
            url: Some("ftp://example.com".into()),
            ..Overrides::default()
        };
        assert!(Settings::load_with_env(None, &bad_url, no_env()).is_err());

        let zero_interval = Overrides {
            interval: Some("0s".into()),
            ..Overrides::default()
        };
        assert!(Settings::load_with_env(None, &zero_interval, no_env()).is_err());

        let file = toml_file("[polling]\njitter = 1.5\n");
        assert!(Settings::load_with_env(Some(file.path()), &Overrides::default(), no_env()).is_err());
    }

    #[test]
    fn test_unparseable_duration() {
        let file = toml_file("[notifications]\nttl = \"soon\"\n");
        let err = Settings::load_with_env(Some(file.path()), &Overrides::default(), no_env())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("invalid configuration"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/firewall-console.toml");
        assert!(Settings::load_with_env(Some(path), &Overrides::default(), no_env()).is_err());
    }
}
