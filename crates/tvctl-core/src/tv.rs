// ── TV orchestration ──
//
// State-aware workflows composing the probe, the remote channel, and the
// cloud client. The TV is not modeled as a persistent state machine:
// every action re-derives the power state with a fresh probe, then runs
// a short single-pass sequence with one scoped session.

use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};

use tvctl_api::CloudClient;
use tvctl_api::probe::{self, PollPolicy};
use tvctl_api::remote::{Key, Press, RemoteSession, RetryPolicy, SessionConfig};

use crate::config::{SettingsStore, TokenPrompt, TvConfig, keys};
use crate::error::CoreError;

/// Direction for the volume workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

impl VolumeDirection {
    fn key(self) -> Key {
        match self {
            Self::Up => Key::VolumeUp,
            Self::Down => Key::VolumeDown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Facade over one TV.
///
/// Owns the runtime configuration (including the two mutable credential
/// fields) and the persistence seam. One command per process invocation
/// is the intended usage; concurrent reuse would need synchronization
/// around the credential and token setters.
pub struct Tv<S> {
    config: TvConfig,
    store: S,
    cloud: CloudClient,
}

impl<S: SettingsStore> Tv<S> {
    pub fn new(config: TvConfig, store: S) -> Result<Self, CoreError> {
        let cloud = CloudClient::new(
            &config.cloud_api_url,
            config.cloud_token.clone(),
            config.cloud_device_id.clone(),
        )?;
        Ok(Self {
            config,
            store,
            cloud,
        })
    }

    pub fn config(&self) -> &TvConfig {
        &self.config
    }

    /// Fresh reachability probe of the control port -- never cached.
    pub async fn is_on(&self) -> bool {
        probe::is_reachable(
            &self.config.host,
            self.config.port,
            self.config.timing.probe_timeout,
        )
        .await
    }

    // ── Power ───────────────────────────────────────────────────────

    /// Power the TV on through the cloud, then wait for it to come
    /// online locally.
    ///
    /// The remote channel needs the set already awake, so the cloud
    /// switch is the only off→on path. A TV that accepts the cloud
    /// command but never becomes reachable is a soft failure: logged,
    /// not an error, since the cloud call itself succeeded.
    pub async fn turn_on(&mut self, prompt: &dyn TokenPrompt) -> Result<(), CoreError> {
        if self.is_on().await {
            info!("TV is already on");
            return Ok(());
        }

        self.ensure_cloud_token(prompt).await?;
        self.cloud.switch_on().await?;

        let timing = &self.config.timing;
        let policy = PollPolicy {
            timeout: timing.power_on_wait,
            interval: timing.poll_interval,
            probe_timeout: timing.probe_timeout,
        };
        if !probe::wait_until_reachable(&self.config.host, self.config.port, &policy).await {
            error!("cloud accepted the switch command, but the TV did not come online");
            return Ok(());
        }

        info!("power on command sent");
        Ok(())
    }

    /// Power the TV off over the remote channel.
    pub async fn turn_off(&mut self) -> Result<(), CoreError> {
        if !self.is_on().await {
            info!("TV is already off");
            return Ok(());
        }

        let mut session = self.open_session().await?;
        let result = async {
            session.send_key(Key::Power, Press::Press).await?;
            // The set ignores a release that follows too quickly.
            tokio::time::sleep(self.config.timing.power_debounce).await;
            session.send_key(Key::Power, Press::Release).await
        }
        .await;
        session.close().await;
        result.map_err(CoreError::from)?;

        info!("power off command sent");
        Ok(())
    }

    // ── Volume ──────────────────────────────────────────────────────

    /// Step the volume `steps` times in `direction`.
    ///
    /// Zero steps still probes and opens nothing beyond the session; the
    /// loop simply runs no iterations.
    pub async fn volume(&mut self, direction: VolumeDirection, steps: u32) -> Result<(), CoreError> {
        if !self.is_on().await {
            info!("TV is off");
            return Ok(());
        }

        let key = direction.key();
        let delay = self.config.timing.key_repeat_delay;
        let mut session = self.open_session().await?;
        let result = async {
            for _ in 0..steps {
                session.send_key(key, Press::Click).await?;
                // The set drops keys repeated faster than this.
                tokio::time::sleep(delay).await;
            }
            Ok::<(), tvctl_api::Error>(())
        }
        .await;
        session.close().await;
        result.map_err(CoreError::from)?;

        info!(direction = direction.as_str(), steps, "volume command sent");
        Ok(())
    }

    /// Toggle mute with a single key press.
    pub async fn toggle_mute(&mut self) -> Result<(), CoreError> {
        if !self.is_on().await {
            info!("TV is off");
            return Ok(());
        }

        let mut session = self.open_session().await?;
        let result = session.send_key(Key::Mute, Press::Click).await;
        session.close().await;
        result.map_err(CoreError::from)?;

        info!("mute toggled");
        Ok(())
    }

    // ── Cloud credential lifecycle ──────────────────────────────────

    /// Validate the cloud credential, prompting for and persisting a
    /// replacement if it is rejected.
    ///
    /// An empty replacement is fatal, as is a replacement the cloud
    /// still rejects.
    pub async fn ensure_cloud_token(&mut self, prompt: &dyn TokenPrompt) -> Result<(), CoreError> {
        let (ok, detail) = self.cloud.ping().await;
        if ok {
            info!(%detail, "cloud token is valid");
            return Ok(());
        }
        warn!(%detail, "cloud token invalid or expired");

        let replacement = prompt.prompt(&detail)?.trim().to_owned();
        if replacement.is_empty() {
            return Err(CoreError::Credential {
                message: "empty token is not allowed".into(),
            });
        }
        self.set_cloud_token(SecretString::from(replacement))?;

        let (ok, detail) = self.cloud.ping().await;
        if !ok {
            return Err(CoreError::Credential {
                message: format!("token still invalid: {detail}"),
            });
        }

        info!("cloud token updated");
        Ok(())
    }

    /// Discard the current cloud credential and run the ensure cycle,
    /// forcing the prompt path even if the stored token was valid.
    pub async fn renew_cloud_token(&mut self, prompt: &dyn TokenPrompt) -> Result<(), CoreError> {
        self.config.cloud_token = SecretString::from(String::new());
        self.cloud.set_token(self.config.cloud_token.clone());
        self.ensure_cloud_token(prompt).await
    }

    // ── Session plumbing ────────────────────────────────────────────

    /// Open the scoped session for one action, capturing and persisting
    /// a freshly issued pairing token before handing it out.
    async fn open_session(&mut self) -> Result<RemoteSession, CoreError> {
        let timing = &self.config.timing;
        let session_config = SessionConfig {
            host: self.config.host.clone(),
            port: self.config.port,
            app_name: self.config.app_name.clone(),
            client_id: self.config.client_id.clone(),
            token: self.config.pairing_token.clone(),
            retry: RetryPolicy {
                attempts: timing.connect_attempts,
                delay: timing.connect_retry_delay,
            },
            handshake_timeout: timing.handshake_timeout,
        };

        let session = RemoteSession::open(&session_config).await?;

        if self.config.pairing_token.is_none() {
            if let Some(token) = session.issued_token() {
                self.set_pairing_token(token.to_owned())?;
            }
        }

        Ok(session)
    }

    /// Store and persist the pairing token issued during a handshake.
    fn set_pairing_token(&mut self, token: String) -> Result<(), CoreError> {
        self.store.set(keys::PAIRING_TOKEN, &token)?;
        info!("pairing token saved to settings");
        self.config.pairing_token = Some(token);
        Ok(())
    }

    /// Store and persist a replacement cloud credential.
    fn set_cloud_token(&mut self, token: SecretString) -> Result<(), CoreError> {
        self.store.set(keys::CLOUD_TOKEN, token.expose_secret())?;
        info!("cloud token saved to settings");
        self.config.cloud_token = token.clone();
        self.cloud.set_token(token);
        Ok(())
    }
}
