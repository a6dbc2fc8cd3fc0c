use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_client::{ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

pub const SETTINGS_FILENAME: &str = "crawl_panel.ron";
pub const BASE_URL_ENV: &str = "CRAWL_PANEL_BASE_URL";

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub list_limit: u32,
    pub log_destination: LogDestination,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: 2000,
            connect_timeout_ms: 5000,
            request_timeout_ms: 10000,
            list_limit: 100,
            log_destination: LogDestination::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Settings path: first CLI argument, else `crawl_panel.ron` in the working directory.
pub fn settings_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME))
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<PanelSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PanelSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl PanelSettings {
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, SettingsError> {
        let base_url =
            Url::parse(&self.base_url).map_err(|source| SettingsError::InvalidBaseUrl {
                url: self.base_url.clone(),
                source,
            })?;
        let mut settings = ClientSettings::new(base_url);
        settings.connect_timeout = Duration::from_millis(self.connect_timeout_ms);
        settings.request_timeout = Duration::from_millis(self.request_timeout_ms);
        settings.list_limit = self.list_limit;
        Ok(settings)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join(SETTINGS_FILENAME)).unwrap();
        assert_eq!(settings, PanelSettings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(
            &path,
            r#"(base_url: "http://crawler.lan:9000/panel", poll_interval_ms: 500, log_destination: File)"#,
        )
        .unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.base_url, "http://crawler.lan:9000/panel");
        assert_eq!(settings.poll_interval(), Duration::from_millis(500));
        assert_eq!(settings.log_destination, LogDestination::File);
        assert_eq!(settings.list_limit, 100);

        let client = settings.client_settings().unwrap();
        assert_eq!(client.base_url.as_str(), "http://crawler.lan:9000/panel/");
        assert_eq!(client.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(base_url: ").unwrap();

        assert!(matches!(load(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut settings = PanelSettings::default();
        settings.apply_env_overrides(|key| {
            (key == BASE_URL_ENV).then(|| " http://10.0.0.5:8000 ".to_string())
        });
        assert_eq!(settings.base_url, "http://10.0.0.5:8000");

        settings.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(settings.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let settings = PanelSettings {
            base_url: "not a url".to_string(),
            ..PanelSettings::default()
        };
        assert!(matches!(
            settings.client_settings(),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let settings = PanelSettings {
            poll_interval_ms: 0,
            ..PanelSettings::default()
        };
        assert_eq!(settings.poll_interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn settings_path_prefers_cli_argument() {
        assert_eq!(
            settings_path(vec!["custom.ron".to_string()].into_iter()),
            PathBuf::from("custom.ron")
        );
        assert_eq!(
            settings_path(std::iter::empty()),
            PathBuf::from(SETTINGS_FILENAME)
        );
    }
}
