//! Authenticated WebSocket remote channel to the TV.
//!
//! One [`RemoteSession`] per user-facing action: connect with retry,
//! validate the authorization handshake, send key presses, close.
//! Sessions are never pooled or reused.
//!
//! The TV serves the channel with a self-signed certificate on the TLS
//! port, so certificate verification is disabled for that connection.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{
    Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;

// ── Protocol constants ───────────────────────────────────────────────

/// Port the TV serves the TLS remote channel on. Other ports fall back
/// to plain `ws://` (useful for test servers).
pub const TLS_PORT: u16 = 8002;

/// Path of the remote-control channel endpoint.
pub const CHANNEL_PATH: &str = "/api/v2/channels/samsung.remote.control";

/// Handshake event confirming the channel is authorized.
const CHANNEL_CONNECT_EVENT: &str = "ms.channel.connect";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ── Connection configuration ─────────────────────────────────────────

/// Fixed-delay retry configuration for the initial connect.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Connection attempts before giving up. Default: 4.
    pub attempts: u32,

    /// Delay between attempts. Default: 3s.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            delay: Duration::from_secs(3),
        }
    }
}

/// Everything needed to open one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// TV address on the local network.
    pub host: String,

    /// Remote-channel port.
    pub port: u16,

    /// Application name shown on the TV's pairing prompt
    /// (base64-encoded into the `name` query parameter).
    pub app_name: String,

    /// Client instance identifier, sent as `deviceId`.
    pub client_id: String,

    /// Pairing token from a previous authorization, if any.
    pub token: Option<String>,

    /// Connect retry policy.
    pub retry: RetryPolicy,

    /// Deadline for the authorization handshake frame. Default: 30s.
    pub handshake_timeout: Duration,
}

// ── Keys and press types ─────────────────────────────────────────────

/// Remote-control keys the dispatcher knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Power,
    VolumeUp,
    VolumeDown,
    Mute,
}

impl Key {
    /// The wire key code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Power => "KEY_POWER",
            Self::VolumeUp => "KEY_VOLUP",
            Self::VolumeDown => "KEY_VOLDOWN",
            Self::Mute => "KEY_MUTE",
        }
    }
}

/// How a key is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Press {
    Press,
    Release,
    #[default]
    Click,
}

impl Press {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Press => "Press",
            Self::Release => "Release",
            Self::Click => "Click",
        }
    }
}

// ── Handshake event ──────────────────────────────────────────────────

/// Structured authorization event the TV sends as the first frame.
#[derive(Debug, Deserialize)]
struct ChannelEvent {
    event: String,
    #[serde(default)]
    data: ChannelEventData,
}

#[derive(Debug, Default, Deserialize)]
struct ChannelEventData {
    #[serde(default)]
    token: Option<String>,
}

// ── RemoteSession ────────────────────────────────────────────────────

/// One open, handshake-confirmed command channel.
#[derive(Debug)]
pub struct RemoteSession {
    ws: WsStream,
    issued_token: Option<String>,
}

impl RemoteSession {
    /// Connect, retrying per the config's [`RetryPolicy`], then validate
    /// the authorization handshake.
    ///
    /// The handshake read is bounded by `handshake_timeout`; once it
    /// succeeds no further read deadline applies (command sends are
    /// fire-and-forget and acknowledgements are not awaited).
    pub async fn open(config: &SessionConfig) -> Result<Self, Error> {
        let url = session_url(config)?;
        let mut ws = connect_with_retry(&url, config).await?;

        let first = tokio::time::timeout(config.handshake_timeout, ws.next())
            .await
            .map_err(|_| Error::Handshake {
                message: "timed out waiting for the channel event".into(),
            })?;

        let frame = match first {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(other)) => {
                return Err(Error::Handshake {
                    message: format!("expected a text frame, got {other:?}"),
                });
            }
            Some(Err(e)) => return Err(Error::WebSocket(e.to_string())),
            None => {
                return Err(Error::WebSocket(
                    "connection closed during handshake".into(),
                ));
            }
        };

        let event: ChannelEvent =
            serde_json::from_str(frame.as_str()).map_err(|e| Error::Handshake {
                message: format!("unparseable channel event: {e}"),
            })?;

        if event.event != CHANNEL_CONNECT_EVENT {
            warn!(event = %event.event, "channel rejected");
            return Err(Error::Unauthorized);
        }

        // A token in the handshake only matters when we connected without
        // one -- the caller persists it for the next session.
        let issued_token = if config.token.is_none() {
            event.data.token
        } else {
            None
        };

        info!(host = %config.host, "remote channel authorized");
        Ok(Self { ws, issued_token })
    }

    /// Pairing token freshly issued during the handshake, if the TV sent
    /// one and none was supplied in the config.
    pub fn issued_token(&self) -> Option<&str> {
        self.issued_token.as_deref()
    }

    /// Send one remote-control key press as a single framed text message.
    ///
    /// Fire-and-forget: no acknowledgement is awaited.
    pub async fn send_key(&mut self, key: Key, press: Press) -> Result<(), Error> {
        let payload = json!({
            "method": "ms.remote.control",
            "params": {
                "Cmd": press.as_str(),
                "DataOfCmd": key.code(),
                "TypeOfRemote": "SendRemoteKey",
            },
        });

        info!(key = key.code(), press = press.as_str(), "sending remote key");
        self.ws
            .send(Message::text(payload.to_string()))
            .await
            .map_err(|e| Error::WebSocket(e.to_string()))
    }

    /// Close the channel. Errors are logged, not surfaced -- the session
    /// is over either way.
    pub async fn close(mut self) {
        if let Err(e) = self.ws.close(None).await {
            debug!(error = %e, "error closing remote channel");
        }
    }
}

// ── Connection ───────────────────────────────────────────────────────

async fn connect_with_retry(url: &Url, config: &SessionConfig) -> Result<WsStream, Error> {
    let retry = &config.retry;
    let mut last_error = String::new();

    for attempt in 1..=retry.attempts {
        match connect_once(url, config.port).await {
            Ok(ws) => return Ok(ws),
            Err(e) => {
                warn!(
                    attempt,
                    attempts = retry.attempts,
                    port = config.port,
                    error = %e,
                    "remote channel connection attempt failed"
                );
                last_error = e.to_string();
                if attempt < retry.attempts {
                    tokio::time::sleep(retry.delay).await;
                }
            }
        }
    }

    Err(Error::Connect {
        attempts: retry.attempts,
        last_error,
    })
}

async fn connect_once(url: &Url, port: u16) -> Result<WsStream, Error> {
    debug!(url = %redacted(url), "connecting to remote channel");

    // The TLS port presents a self-signed certificate.
    let connector = if port == TLS_PORT {
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::Tls(e.to_string()))?;
        Some(Connector::NativeTls(tls))
    } else {
        None
    };

    let (ws, _response) = connect_async_tls_with_config(url.as_str(), None, false, connector)
        .await
        .map_err(|e| Error::WebSocket(e.to_string()))?;

    Ok(ws)
}

/// Deterministic channel URL: TLS scheme on the TLS port, app name
/// base64-encoded, client id as `deviceId`, token only when known.
fn session_url(config: &SessionConfig) -> Result<Url, Error> {
    let scheme = if config.port == TLS_PORT { "wss" } else { "ws" };
    let mut url = Url::parse(&format!(
        "{scheme}://{}:{}{CHANNEL_PATH}",
        config.host, config.port
    ))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("name", &STANDARD.encode(&config.app_name));
        query.append_pair("deviceId", &config.client_id);
        if let Some(ref token) = config.token {
            query.append_pair("token", token);
        }
    }

    Ok(url)
}

/// The URL without its query string, for logs (the token is a secret).
fn redacted(url: &Url) -> String {
    format!(
        "{}://{}:{}{}",
        url.scheme(),
        url.host_str().unwrap_or_default(),
        url.port().unwrap_or_default(),
        url.path()
    )
}

// ── Tests ────────────────────────────────────────────────────────────
