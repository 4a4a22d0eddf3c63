use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::utils::file_get;
use crate::utils::http::{FetchOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Environment variable that supplies the subscription URL
pub const SUBSCRIPTION_URL_ENV: &str = "SUBSCRIPTION_URL";

pub const NODES_FILE: &str = "nodes.json";
pub const CLASH_FILE: &str = "clash.yaml";
pub const CLASH_META_FILE: &str = "clash_meta.yaml";
pub const SUBSCRIPTION_FILE: &str = "subscription.txt";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings structure to hold run configuration
///
/// Every field has a default, so an empty (or absent) settings file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub subscription_url: Option<String>,
    pub output_dir: PathBuf,
    pub template_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            subscription_url: None,
            output_dir: PathBuf::from("output"),
            template_path: PathBuf::from("templates/clash_template.yaml"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from an optional TOML file, then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => {
                debug!("Loading settings from {}", path.display());
                let content = file_get(path).map_err(|source| SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&content)?
            }
            None => Settings::default(),
        };
        settings.override_subscription_url(env::var(SUBSCRIPTION_URL_ENV).ok());
        Ok(settings)
    }

    /// Replace the subscription URL when `url` is set and not blank.
    pub fn override_subscription_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            self.subscription_url = Some(url.trim().to_string());
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.output_dir.join(NODES_FILE)
    }

    pub fn clash_path(&self) -> PathBuf {
        self.output_dir.join(CLASH_FILE)
    }

    pub fn clash_meta_path(&self) -> PathBuf {
        self.output_dir.join(CLASH_META_FILE)
    }

    pub fn subscription_path(&self) -> PathBuf {
        self.output_dir.join(SUBSCRIPTION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.subscription_url, None);
        assert_eq!(settings.nodes_path(), PathBuf::from("output/nodes.json"));
        assert_eq!(settings.clash_meta_path(), PathBuf::from("output/clash_meta.yaml"));
        assert_eq!(settings.fetch_options().timeout, Duration::from_secs(30));
        assert_eq!(settings.fetch_options().user_agent, "ClashForWindows/0.20.39");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
subscription_url = "https://example.com/sub"
timeout_secs = 10
"#,
        )
        .unwrap();

        assert_eq!(settings.subscription_url.as_deref(), Some("https://example.com/sub"));
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_override_ignores_blank_values() {
        let mut settings = Settings::default();
        settings.override_subscription_url(Some("  ".to_string()));
        assert_eq!(settings.subscription_url, None);

        settings.override_subscription_url(Some(" https://a.com/s ".to_string()));
        assert_eq!(settings.subscription_url.as_deref(), Some("https://a.com/s"));

        settings.override_subscription_url(None);
        assert_eq!(settings.subscription_url.as_deref(), Some("https://a.com/s"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml_str("timeout_secs = \"soon\""),
            Err(SettingsError::Toml(_))
        ));
    }
}
