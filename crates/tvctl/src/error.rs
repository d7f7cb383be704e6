//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and process exit codes.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use tvctl_config::ConfigError;
use tvctl_core::CoreError;

/// Exit codes for the top-level invocation boundary.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 4;
    pub const CLOUD: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Device connectivity ──────────────────────────────────────────

    #[error("could not connect to the TV: {reason}")]
    #[diagnostic(
        code(tvctl::connection),
        help(
            "Check that the TV is powered and on the network, and that\n\
             `address` in your settings is right (tvctl config show)."
        )
    )]
    Connection { reason: String },

    #[error("the TV refused the connection")]
    #[diagnostic(
        code(tvctl::unauthorized),
        help(
            "Accept the pairing prompt on the TV screen, then retry.\n\
             If no prompt appears, clear the stored token and pair again:\n\
             tvctl config set pairing_token \"\""
        )
    )]
    Unauthorized,

    #[error("remote channel error: {message}")]
    #[diagnostic(code(tvctl::session))]
    Session { message: String },

    // ── Cloud ────────────────────────────────────────────────────────

    #[error("SmartThings credential rejected: {message}")]
    #[diagnostic(
        code(tvctl::credential),
        help(
            "Generate a personal access token with scopes r:devices:* and\n\
             x:devices:*, then run: tvctl token renew"
        )
    )]
    Credential { message: String },

    #[error("SmartThings API error: {message}")]
    #[diagnostic(
        code(tvctl::cloud),
        help("Check the SmartThings device id in your settings (tvctl config show).")
    )]
    Cloud { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("missing required setting '{key}'")]
    #[diagnostic(
        code(tvctl::no_config),
        help(
            "Create the settings file with: tvctl config init\n\
             Expected at: {path}"
        )
    )]
    MissingSetting { key: String, path: String },

    #[error("invalid value for {field}: {reason}")]
    #[diagnostic(code(tvctl::validation))]
    Validation { field: String, reason: String },

    #[error("configuration error: {message}")]
    #[diagnostic(code(tvctl::config))]
    Config { message: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } | Self::Session { .. } => exit_code::CONNECTION,
            Self::Unauthorized | Self::Credential { .. } => exit_code::AUTH,
            Self::Cloud { .. } => exit_code::CLOUD,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason } => CliError::Connection { reason },

            CoreError::Unauthorized => CliError::Unauthorized,

            CoreError::Session { message } => CliError::Session { message },

            CoreError::Credential { message } => CliError::Credential { message },

            CoreError::CloudApi { message, status } => CliError::Cloud {
                message: match status {
                    Some(status) => format!("HTTP {status}: {message}"),
                    None => message,
                },
            },

            CoreError::Config { message } | CoreError::Persist { message } => {
                CliError::Config { message }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

/// Translate a settings-layer error, attaching the settings path the
/// invocation actually used (it may have been overridden with --config).
pub fn from_config(err: ConfigError, path: &Path) -> CliError {
    match err {
        ConfigError::Missing { key } => CliError::MissingSetting {
            key: key.to_owned(),
            path: path.display().to_string(),
        },
        ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
        other => CliError::Config {
            message: other.to_string(),
        },
    }
}
