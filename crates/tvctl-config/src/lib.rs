//! On-disk settings for tvctl.
//!
//! A single TOML document plus `TVCTL_`-prefixed env overrides (figment),
//! durable single-key updates through [`FileStore`], and resolution into
//! the runtime [`TvConfig`]. Env overrides apply at resolution time only;
//! the durable document never absorbs them.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use tvctl_core::config::{self, SettingsStore, Timing, TvConfig, keys};
use tvctl_core::error::CoreError;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting '{key}'")]
    Missing { key: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to persist settings: {0}")]
    Persist(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings document ───────────────────────────────────────────────

/// The TOML settings document. Every field is optional on disk;
/// [`resolve`] enforces which ones are mandatory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// TV address on the local network.
    pub address: Option<String>,

    /// Remote-channel port (default 8002).
    pub port: Option<u16>,

    /// TV MAC address; `:` and `-` separators are tolerated.
    pub mac: Option<String>,

    /// SmartThings personal access token.
    pub cloud_token: Option<String>,

    /// SmartThings device id of the TV.
    pub cloud_device_id: Option<String>,

    /// Pairing token issued by the TV on first authorization.
    pub pairing_token: Option<String>,

    /// Client instance id sent as `deviceId` on the remote channel.
    pub client_id: Option<String>,

    /// Cloud API base URL override.
    pub cloud_api_url: Option<String>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tvctl", "tvctl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("tvctl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load settings from `path` merged with `TVCTL_*` env overrides.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let settings: Settings = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TVCTL_"))
        .extract()?;
    Ok(settings)
}

/// Load settings from the canonical path.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Serialize settings to TOML and write them to `path`.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Write settings to the canonical path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&config_path(), settings)
}

/// Read the raw on-disk document, without env overrides. A missing file
/// yields the default (empty) document.
pub fn load_document(path: &Path) -> Result<Settings, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

// ── Durable key updates ─────────────────────────────────────────────

/// Load-modify-save persistence for the keys the core writes back.
///
/// Reads the document fresh on every call so a concurrent manual edit
/// of other keys is not clobbered wholesale.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_path() -> Self {
        Self::new(config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let persist_err = |e: ConfigError| CoreError::Persist {
            message: e.to_string(),
        };

        let mut settings = load_document(&self.path).map_err(persist_err)?;
        match key {
            keys::PAIRING_TOKEN => settings.pairing_token = Some(value.to_owned()),
            keys::CLOUD_TOKEN => settings.cloud_token = Some(value.to_owned()),
            keys::CLIENT_ID => settings.client_id = Some(value.to_owned()),
            other => {
                return Err(CoreError::Persist {
                    message: format!("unknown settings key '{other}'"),
                });
            }
        }
        save_settings_to(&self.path, &settings).map_err(persist_err)?;

        info!(key, path = %self.path.display(), "settings key updated");
        Ok(())
    }
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the settings document into the runtime configuration.
///
/// Validates the mandatory fields, normalizes the MAC, and bootstraps
/// the client instance id: generated once and persisted immediately so
/// the TV keeps recognizing this client across runs.
pub fn resolve(settings: &Settings, store: &dyn SettingsStore) -> Result<TvConfig, ConfigError> {
    let address = require(settings.address.as_deref(), "address")?;
    let mac = normalize_mac(require(settings.mac.as_deref(), "mac")?)?;
    let cloud_token = require(settings.cloud_token.as_deref(), "cloud_token")?;
    let cloud_device_id = require(settings.cloud_device_id.as_deref(), "cloud_device_id")?;

    let client_id = match settings.client_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => {
            let id = format!("uuid-{}", uuid::Uuid::new_v4());
            store
                .set(keys::CLIENT_ID, &id)
                .map_err(|e| ConfigError::Persist(e.to_string()))?;
            info!("generated client instance id");
            id
        }
    };

    Ok(TvConfig {
        host: address.to_owned(),
        port: settings.port.unwrap_or(config::DEFAULT_PORT),
        device_id: mac,
        app_name: config::APP_NAME.to_owned(),
        cloud_api_url: settings
            .cloud_api_url
            .clone()
            .unwrap_or_else(|| config::DEFAULT_CLOUD_API_URL.to_owned()),
        cloud_token: SecretString::from(cloud_token.to_owned()),
        cloud_device_id: cloud_device_id.to_owned(),
        pairing_token: settings.pairing_token.clone().filter(|t| !t.is_empty()),
        client_id,
        timing: Timing::default(),
    })
}

fn require<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing { key }),
    }
}

/// Strip `:` / `-` separators and validate 12 hex digits.
fn normalize_mac(raw: &str) -> Result<String, ConfigError> {
    let mac: String = raw
        .chars()
        .filter(|c| !matches!(c, ':' | '-'))
        .collect::<String>()
        .to_lowercase();

    if mac.len() != 12 || !mac.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Validation {
            field: "mac".into(),
            reason: format!("'{raw}' is not a MAC address"),
        });
    }
    Ok(mac)
}

// ── Tests ────────────────────────────────────────────────────────────
