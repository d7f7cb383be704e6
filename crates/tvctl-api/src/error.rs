use thiserror::Error;

/// Top-level error type for the `tvctl-api` crate.
///
/// Covers the failure modes of both device-facing surfaces: the local
/// WebSocket remote channel and the SmartThings cloud API.
/// `tvctl-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Remote channel ──────────────────────────────────────────────
    /// Every connection attempt to the TV was exhausted.
    #[error("failed to connect to the TV after {attempts} attempts: {last_error}")]
    Connect { attempts: u32, last_error: String },

    /// The TV rejected the channel. Usually the on-screen pairing
    /// prompt was declined, or a stored pairing token was revoked.
    #[error("unauthorized -- accept the connection on the TV")]
    Unauthorized,

    /// The handshake frame was missing, malformed, or timed out.
    #[error("remote channel handshake failed: {message}")]
    Handshake { message: String },

    /// WebSocket read/write failure mid-session.
    #[error("remote channel transport error: {0}")]
    WebSocket(String),

    /// TLS connector setup failure.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Cloud API ───────────────────────────────────────────────────
    /// Non-success response from the cloud command endpoint.
    #[error("cloud API error (HTTP {status}): {message}")]
    CloudApi { status: u16, message: String },

    /// HTTP transport error talking to the cloud (DNS, refused, timeout).
    #[error("cloud transport error: {0}")]
    CloudTransport(#[from] reqwest::Error),

    /// The credential cannot be sent (e.g. not header-safe).
    #[error("invalid cloud credential: {message}")]
    Credential { message: String },

    // ── Shared ──────────────────────────────────────────────────────
    /// URL construction error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this is a transient failure worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::WebSocket(_) => true,
            Self::CloudTransport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if resolving this error requires action on the TV
    /// itself rather than a retry.
    pub fn requires_user_action(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
