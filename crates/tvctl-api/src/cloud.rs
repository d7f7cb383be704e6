//! SmartThings cloud client.
//!
//! The cloud switch capability is the only way to power on a TV whose
//! network stack is asleep -- the local remote channel requires the set
//! to be awake already. Two calls cover everything the tool needs: a
//! lightweight credential check against the devices listing, and the
//! `switch on` command.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;

/// SmartThings API base.
pub const DEFAULT_API_URL: &str = "https://api.smartthings.com/v1";

/// Deadline for the credential check.
const PING_TIMEOUT: Duration = Duration::from_secs(8);

/// Deadline for command submission.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the SmartThings device-control API, bound to one device.
///
/// The bearer credential is replaceable at runtime ([`set_token`](Self::set_token))
/// because the ensure/renew cycle may swap it mid-process.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    device_id: String,
    token: SecretString,
}

impl CloudClient {
    pub fn new(
        base_url: &str,
        token: SecretString,
        device_id: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("tvctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::CloudTransport)?;

        Ok(Self {
            http,
            base_url,
            device_id: device_id.into(),
            token,
        })
    }

    /// Replace the bearer credential for subsequent requests.
    pub fn set_token(&mut self, token: SecretString) {
        self.token = token;
    }

    /// Lightweight authenticated check of the current credential.
    ///
    /// Issues a one-item devices listing. Returns success plus a
    /// human-readable detail (HTTP status or transport error) -- a failed
    /// check is reported through the bool, never as an error.
    pub async fn ping(&self) -> (bool, String) {
        if self.token.expose_secret().is_empty() {
            return (false, "empty token".into());
        }

        let auth = match self.bearer() {
            Ok(value) => value,
            Err(e) => return (false, e.to_string()),
        };

        let url = match self.base_url.join("devices") {
            Ok(url) => url,
            Err(e) => return (false, e.to_string()),
        };
        debug!(url = %url, "checking cloud credential");

        match self
            .http
            .get(url)
            .query(&[("limit", "1")])
            .header(AUTHORIZATION, auth)
            .timeout(PING_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => {
                let status = resp.status();
                (status.is_success(), format!("HTTP {}", status.as_u16()))
            }
            Err(e) => (false, e.to_string()),
        }
    }

    /// Issue `switch on` for the bound device.
    ///
    /// Any non-success response is fatal for the call -- power-on must
    /// not silently fail.
    pub async fn switch_on(&self) -> Result<(), Error> {
        let url = self
            .base_url
            .join(&format!("devices/{}/commands", self.device_id))?;
        let body = json!({
            "commands": [{ "capability": "switch", "command": "on" }],
        });

        debug!(url = %url, "issuing cloud switch command");
        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.bearer()?)
            .json(&body)
            .timeout(COMMAND_TIMEOUT)
            .send()
            .await
            .map_err(Error::CloudTransport)?;

        let status = resp.status();
        if status.is_success() {
            info!(status = status.as_u16(), "cloud switch on accepted");
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::CloudApi {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            })
        }
    }

    fn bearer(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|e| Error::Credential {
                message: format!("token is not header-safe: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Ensure a trailing slash so relative joins append instead of replace.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

// ── Tests ────────────────────────────────────────────────────────────
