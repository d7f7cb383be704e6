// ── Runtime configuration ──
//
// These types describe *how* to reach one TV. They carry addressing,
// credential material, and timing tunables, but never touch disk --
// the settings layer builds a `TvConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::CoreError;

/// Application name announced to the TV; shown on the pairing prompt.
pub const APP_NAME: &str = "tvctl";

/// Default remote-channel port (the TLS one).
pub const DEFAULT_PORT: u16 = tvctl_api::remote::TLS_PORT;

/// Default cloud API base.
pub const DEFAULT_CLOUD_API_URL: &str = tvctl_api::cloud::DEFAULT_API_URL;

/// Settings keys the core writes back through a [`SettingsStore`].
pub mod keys {
    pub const PAIRING_TOKEN: &str = "pairing_token";
    pub const CLOUD_TOKEN: &str = "cloud_token";
    pub const CLIENT_ID: &str = "client_id";
}

/// Configuration for one TV, loaded once per process run.
///
/// `cloud_token` and `pairing_token` are the two fields that may be
/// replaced during operation; every replacement goes through a `Tv`
/// setter that also persists, never a bare field assignment.
#[derive(Debug, Clone)]
pub struct TvConfig {
    /// TV address on the local network.
    pub host: String,

    /// Remote-channel port.
    pub port: u16,

    /// MAC-derived device identifier (bare hex, separators stripped).
    pub device_id: String,

    /// Client application name (encoded into the channel URL).
    pub app_name: String,

    /// Cloud API base URL.
    pub cloud_api_url: String,

    /// Cloud bearer credential.
    pub cloud_token: SecretString,

    /// Cloud-registered device id of the TV.
    pub cloud_device_id: String,

    /// Pairing token from a previous on-device authorization.
    pub pairing_token: Option<String>,

    /// Client instance identifier (generated once, persisted thereafter).
    pub client_id: String,

    /// Timing tunables.
    pub timing: Timing,
}

/// Delays and deadlines for the workflows. The defaults are the
/// canonical values; tests compress them.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Per-probe connect deadline.
    pub probe_timeout: Duration,

    /// How long to wait for the TV to come online after a cloud power-on.
    pub power_on_wait: Duration,

    /// Probe interval during that wait.
    pub poll_interval: Duration,

    /// Remote-channel connection attempts.
    pub connect_attempts: u32,

    /// Delay between connection attempts.
    pub connect_retry_delay: Duration,

    /// Deadline for the authorization handshake.
    pub handshake_timeout: Duration,

    /// Press-to-release gap for the power key (device debounce).
    pub power_debounce: Duration,

    /// Gap between repeated volume keys (device rate limit).
    pub key_repeat_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(1),
            power_on_wait: Duration::from_secs(60),
            poll_interval: Duration::from_secs(1),
            connect_attempts: 4,
            connect_retry_delay: Duration::from_secs(3),
            handshake_timeout: Duration::from_secs(30),
            power_debounce: Duration::from_secs(1),
            key_repeat_delay: Duration::from_millis(1200),
        }
    }
}

// ── Injected capabilities ────────────────────────────────────────────

/// Durable persistence callback for values (re)established at runtime.
///
/// The settings layer backs this with the on-disk document; tests inject
/// recording doubles.
pub trait SettingsStore {
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Interactive source for a replacement cloud credential.
///
/// `reason` is the human-readable detail of why the current credential
/// was rejected. The CLI backs this with a hidden terminal prompt.
pub trait TokenPrompt {
    fn prompt(&self, reason: &str) -> Result<String, CoreError>;
}
