//! TCP reachability probe for the TV's control port.
//!
//! A successful connect on the remote-channel port is the proxy for
//! "powered on and networked". Results are never cached -- every caller
//! gets a fresh probe.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;
use tracing::trace;

/// Default per-probe connect deadline.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Fixed-interval polling configuration for [`wait_until_reachable`].
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Overall deadline. Default: 60s.
    pub timeout: Duration,

    /// Delay between probes. Default: 1s.
    pub interval: Duration,

    /// Per-probe connect deadline. Default: 1s.
    pub probe_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            interval: Duration::from_secs(1),
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

/// Attempt a transport-level connection to `host:port`.
///
/// Returns `true` on success and `false` on any connection error
/// (refused, timed out, host unreachable) -- never errors.
pub async fn is_reachable(host: &str, port: u16, timeout: Duration) -> bool {
    match time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            trace!(host, port, error = %e, "probe failed");
            false
        }
        Err(_) => {
            trace!(host, port, "probe timed out");
            false
        }
    }
}

/// Poll [`is_reachable`] at fixed intervals until it succeeds or the
/// deadline elapses. Returns whether the device became reachable.
pub async fn wait_until_reachable(host: &str, port: u16, policy: &PollPolicy) -> bool {
    let started = time::Instant::now();
    while started.elapsed() < policy.timeout {
        if is_reachable(host, port, policy.probe_timeout).await {
            return true;
        }
        time::sleep(policy.interval).await;
    }
    false
}

// ── Tests ────────────────────────────────────────────────────────────
