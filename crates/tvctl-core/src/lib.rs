//! Orchestration layer between `tvctl-api` and the CLI.
//!
//! This crate owns the state-aware workflows and the runtime
//! configuration model:
//!
//! - **[`Tv`]** — facade over the reachability probe, the remote channel,
//!   and the cloud client. Each action re-derives the power state with a
//!   fresh probe, opens at most one scoped session, and closes it before
//!   returning.
//!
//! - **[`TvConfig`]** — runtime configuration value object. Constructed
//!   once at startup by the settings layer and handed in; the core never
//!   reads config files itself.
//!
//! - **[`SettingsStore`]** / **[`TokenPrompt`]** — injected seams for
//!   durable persistence of renewed tokens and for interactive credential
//!   replacement, so the core stays testable without a terminal or disk.

pub mod config;
pub mod error;
pub mod tv;

pub use config::{SettingsStore, TokenPrompt, TvConfig, Timing, keys};
pub use error::CoreError;
pub use tv::{Tv, VolumeDirection};
