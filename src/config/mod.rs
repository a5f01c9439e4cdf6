use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::client::orchestrator::Endpoints;
use crate::errors::ChurnError;
use crate::form::payload::{BANK_ENDPOINT, TELECOM_ENDPOINT};

pub const HOME_ENV: &str = "CHURN_CLIENT_HOME";
pub const BASE_URL_ENV: &str = "CHURN_CLIENT_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const APP_DIR: &str = "churn_client";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`].
pub const KEYS: &[&str] = &[
    "base_url",
    "bank_endpoint",
    "telecom_endpoint",
    "request_timeout_secs",
    "discard_stale_responses",
    "screen_reader_mode",
    "high_contrast_mode",
    "quiet_mode",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
    #[serde(default = "Config::default_bank_endpoint")]
    pub bank_endpoint: String,
    #[serde(default = "Config::default_telecom_endpoint")]
    pub telecom_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "Config::default_discard_stale")]
    pub discard_stale_responses: bool,
    #[serde(default)]
    pub screen_reader_mode: bool,
    #[serde(default)]
    pub high_contrast_mode: bool,
    #[serde(default)]
    pub quiet_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            bank_endpoint: Self::default_bank_endpoint(),
            telecom_endpoint: Self::default_telecom_endpoint(),
            request_timeout_secs: None,
            discard_stale_responses: Self::default_discard_stale(),
            screen_reader_mode: false,
            high_contrast_mode: false,
            quiet_mode: false,
        }
    }
}

impl Config {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.into()
    }

    fn default_bank_endpoint() -> String {
        BANK_ENDPOINT.into()
    }

    fn default_telecom_endpoint() -> String {
        TELECOM_ENDPOINT.into()
    }

    fn default_discard_stale() -> bool {
        true
    }

    /// Base URL with the environment override applied.
    pub fn resolved_base_url(&self) -> String {
        env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            bank: self.bank_endpoint.clone(),
            telecom: self.telecom_endpoint.clone(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Updates one key from its textual form. `request_timeout_secs` accepts
    /// `none` to remove the timeout.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ChurnError> {
        let value = value.trim();
        match key {
            "base_url" => self.base_url = non_empty(key, value)?,
            "bank_endpoint" => self.bank_endpoint = endpoint(key, value)?,
            "telecom_endpoint" => self.telecom_endpoint = endpoint(key, value)?,
            "request_timeout_secs" => {
                self.request_timeout_secs = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    let secs = value.parse::<u64>().map_err(|_| {
                        ChurnError::Config(format!("`{key}` expects whole seconds or `none`"))
                    })?;
                    Some(secs).filter(|secs| *secs > 0)
                }
            }
            "discard_stale_responses" => self.discard_stale_responses = flag(key, value)?,
            "screen_reader_mode" => self.screen_reader_mode = flag(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = flag(key, value)?,
            "quiet_mode" => self.quiet_mode = flag(key, value)?,
            other => {
                return Err(ChurnError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("base_url", self.base_url.clone()),
            ("bank_endpoint", self.bank_endpoint.clone()),
            ("telecom_endpoint", self.telecom_endpoint.clone()),
            (
                "request_timeout_secs",
                self.request_timeout_secs
                    .map_or_else(|| "none".to_string(), |secs| secs.to_string()),
            ),
            (
                "discard_stale_responses",
                self.discard_stale_responses.to_string(),
            ),
            ("screen_reader_mode", self.screen_reader_mode.to_string()),
            ("high_contrast_mode", self.high_contrast_mode.to_string()),
            ("quiet_mode", self.quiet_mode.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ChurnError> {
    if value.is_empty() {
        return Err(ChurnError::Config(format!("`{key}` cannot be empty")));
    }
    Ok(value.to_string())
}

fn endpoint(key: &str, value: &str) -> Result<String, ChurnError> {
    let value = non_empty(key, value)?;
    if !value.starts_with('/') {
        return Err(ChurnError::Config(format!("`{key}` must start with `/`")));
    }
    Ok(value)
}

fn flag(key: &str, value: &str) -> Result<bool, ChurnError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ChurnError::Config(format!("`{key}` expects on or off"))),
    }
}

/// Base directory for client data: `CHURN_CLIENT_HOME`, else the platform
/// data directory.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Loads and persists [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ChurnError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ChurnError> {
        let config_root = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, ChurnError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ChurnError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ChurnError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.discard_stale_responses);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn save_round_trips_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("request_timeout_secs", "15").unwrap();
        config.set("quiet_mode", "on").unwrap();
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
        assert!(manager.path().ends_with("config/config.json"));
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"base_url": "http://models:8080"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.base_url, "http://models:8080");
        assert_eq!(config.telecom_endpoint, TELECOM_ENDPOINT);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("bank_endpoint", "api/bank").is_err());
        assert!(config.set("quiet_mode", "maybe").is_err());
        assert!(config.set("request_timeout_secs", "soon").is_err());

        config.set("request_timeout_secs", "5").unwrap();
        config.set("request_timeout_secs", "none").unwrap();
        assert_eq!(config.request_timeout_secs, None);
    }
}
