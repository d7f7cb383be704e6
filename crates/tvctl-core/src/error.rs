// ── Core error types ──
//
// User-facing errors from tvctl-core. Consumers never see raw transport
// errors -- the `From<tvctl_api::Error>` impl translates them into
// domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Device connectivity ─────────────────────────────────────────
    #[error("cannot connect to the TV: {reason}")]
    ConnectionFailed { reason: String },

    #[error("the TV refused the connection -- accept the pairing prompt on its screen")]
    Unauthorized,

    #[error("remote channel error: {message}")]
    Session { message: String },

    // ── Cloud ───────────────────────────────────────────────────────
    #[error("cloud credential rejected: {message}")]
    Credential { message: String },

    #[error("cloud API error: {message}")]
    CloudApi {
        message: String,
        /// HTTP status, when the failure was an API response.
        status: Option<u16>,
    },

    // ── Configuration / persistence ─────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to persist settings: {message}")]
    Persist { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tvctl_api::Error> for CoreError {
    fn from(err: tvctl_api::Error) -> Self {
        match err {
            tvctl_api::Error::Connect {
                attempts,
                last_error,
            } => CoreError::ConnectionFailed {
                reason: format!("failed after {attempts} attempts: {last_error}"),
            },

            tvctl_api::Error::Unauthorized => CoreError::Unauthorized,

            tvctl_api::Error::Handshake { message } | tvctl_api::Error::WebSocket(message) => {
                CoreError::Session { message }
            }

            tvctl_api::Error::Tls(message) => CoreError::Session {
                message: format!("TLS error: {message}"),
            },

            tvctl_api::Error::CloudApi { status, message } => CoreError::CloudApi {
                message,
                status: Some(status),
            },

            tvctl_api::Error::CloudTransport(e) => CoreError::CloudApi {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },

            tvctl_api::Error::Credential { message } => CoreError::Credential { message },

            tvctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
        }
    }
}
