//! # reposim-config
//!
//! Loaded once at startup and passed down explicitly; nothing below the
//! binary reads the process environment.
//!
//! Precedence, later wins: built-in defaults, YAML file, environment.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TICK_MS: u64 = 250;
pub const DEFAULT_STEP_MS: u64 = 1500;

/// Credential variables, checked in order
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

pub const CONFIG_PATH_VAR: &str = "REPOSIM_CONFIG";
const MODEL_VAR: &str = "REPOSIM_MODEL";
const BASE_URL_VAR: &str = "REPOSIM_BASE_URL";
const TICK_VAR: &str = "REPOSIM_TICK_MS";
const STEP_VAR: &str = "REPOSIM_STEP_MS";
const TIMEOUT_VAR: &str = "REPOSIM_TIMEOUT_SECS";
const LOG_FILE_VAR: &str = "REPOSIM_LOG_FILE";

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No API key configured. Set {} (or api_key in the config file).", API_KEY_VARS.join(" or "))]
    MissingApiKey,

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Everything the simulator needs to start
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// UI tick period
    pub tick_rate: Duration,
    /// How long each cosmetic progress step stays on screen
    pub step_interval: Duration,
    /// `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("tick_rate", &self.tick_rate)
            .field("step_interval", &self.step_interval)
            .field("request_timeout", &self.request_timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// On-disk form; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub tick_rate_ms: Option<u64>,
    pub step_interval_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }

    fn from_yaml(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config {
    /// Load from the real process environment
    pub fn from_env() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` in place of the environment.
    ///
    /// The config file is `$REPOSIM_CONFIG` when set (and must exist),
    /// otherwise `<config dir>/reposim/config.yaml` when present.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match lookup(CONFIG_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => FileConfig::from_path(Path::new(path.trim()))?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => FileConfig::from_path(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::resolve(file, lookup)
    }

    /// Merge a parsed file with environment overrides
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| env(*name))
            .or_else(|| file.api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
            .ok_or(Error::MissingApiKey)?;

        let model = env(MODEL_VAR)
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = env(BASE_URL_VAR)
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let tick_ms = positive(TICK_VAR, env(TICK_VAR), file.tick_rate_ms)?.unwrap_or(DEFAULT_TICK_MS);
        let step_ms = positive(STEP_VAR, env(STEP_VAR), file.step_interval_ms)?.unwrap_or(DEFAULT_STEP_MS);
        let timeout_secs = positive(TIMEOUT_VAR, env(TIMEOUT_VAR), file.request_timeout_secs)?;

        let log_file = env(LOG_FILE_VAR).map(PathBuf::from).or(file.log_file);

        let config = Self {
            api_key,
            model,
            base_url,
            tick_rate: Duration::from_millis(tick_ms),
            step_interval: Duration::from_millis(step_ms),
            request_timeout: timeout_secs.map(Duration::from_secs),
            log_file,
        };
        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }
}

/// `<config dir>/reposim/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reposim").join("config.yaml"))
}

/// Environment value wins over file value; either must be a positive integer.
fn positive(name: &str, from_env: Option<String>, from_file: Option<u64>) -> Result<Option<u64>> {
    let value = match from_env {
        Some(raw) => Some(raw.parse::<u64>().map_err(|e| Error::InvalidValue {
            name: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })?),
        None => from_file,
    };

    match value {
        Some(0) => Err(Error::InvalidValue {
            name: name.to_string(),
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let err = Config::resolve(FileConfig::default(), env(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
        assert!(err.to_string().contains("API_KEY or GEMINI_API_KEY"));

        let blank = Config::resolve(FileConfig::default(), env(&[("API_KEY", "   ")]));
        assert!(matches!(blank, Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(FileConfig::default(), env(&[("API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert_eq!(config.step_interval, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_gemini_key_is_a_fallback() {
        let config = Config::resolve(
            FileConfig::default(),
            env(&[("GEMINI_API_KEY", "second"), ("API_KEY", "first")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "first");

        let config =
            Config::resolve(FileConfig::default(), env(&[("GEMINI_API_KEY", "second")])).unwrap();
        assert_eq!(config.api_key, "second");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = FileConfig {
            api_key: Some("from-file".into()),
            model: Some("file-model".into()),
            base_url: Some("http://file/".into()),
            step_interval_ms: Some(900),
            ..Default::default()
        };
        let config = Config::resolve(
            file,
            env(&[
                ("REPOSIM_MODEL", "env-model"),
                ("REPOSIM_TIMEOUT_SECS", "30"),
                ("REPOSIM_LOG_FILE", "/tmp/reposim.log"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, "http://file");
        assert_eq!(config.step_interval, Duration::from_millis(900));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/reposim.log")));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err = Config::resolve(
            FileConfig::default(),
            env(&[("API_KEY", "k"), ("REPOSIM_TICK_MS", "fast")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref name, .. } if name == "REPOSIM_TICK_MS"));

        let err = Config::resolve(
            FileConfig::default(),
            env(&[("API_KEY", "k"), ("REPOSIM_STEP_MS", "0")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: yaml-key\nmodel: gemini-2.5-pro\ntick_rate_ms: 100").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = Config::load_with(env(&[("REPOSIM_CONFIG", path.as_str())])).unwrap();
        assert_eq!(config.api_key, "yaml-key");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.tick_rate, Duration::from_millis(100));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let err = Config::load_with(env(&[
            ("REPOSIM_CONFIG", "/definitely/not/here.yaml"),
            ("API_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_unknown_file_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: k\nmodle: typo").unwrap();
        let err = FileConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::resolve(FileConfig::default(), env(&[("API_KEY", "secret-key")])).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
