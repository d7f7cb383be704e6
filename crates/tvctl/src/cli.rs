//! Clap derive structures for the `tvctl` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tvctl_core::VolumeDirection;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tvctl -- remote control for a Samsung TV from the command line
#[derive(Debug, Parser)]
#[command(
    name = "tvctl",
    version,
    about = "Control a Samsung TV over the local network and SmartThings",
    long_about = "Drives a Samsung TV over its local WebSocket remote channel.\n\n\
        When the set is unreachable, power-on falls back to the SmartThings\n\
        cloud API and waits for the TV to come online.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the settings file
    #[arg(long, env = "TVCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Power the TV on (falls back to SmartThings when it is off)
    On,

    /// Power the TV off over the remote channel
    Off,

    /// Step the volume up or down
    #[command(alias = "volume")]
    Vol(VolArgs),

    /// Toggle mute
    Mute,

    /// SmartThings token operations
    Token(TokenArgs),

    /// Manage the settings file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Volume ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VolArgs {
    /// Direction to move the volume
    #[arg(value_enum)]
    pub direction: VolDirection,

    /// Number of steps
    #[arg(default_value = "1")]
    pub steps: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VolDirection {
    Up,
    Down,
}

impl From<VolDirection> for VolumeDirection {
    fn from(direction: VolDirection) -> Self {
        match direction {
            VolDirection::Up => Self::Up,
            VolDirection::Down => Self::Down,
        }
    }
}

// ── Token ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Validate the stored token, prompting for a replacement if invalid
    Check,

    /// Discard the stored token and prompt for a new one
    Renew,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the settings file with guided setup
    Init,

    /// Display current settings (secrets redacted)
    Show,

    /// Set a single settings key
    Set {
        /// Settings key (e.g. "address", "cloud_token")
        key: String,

        /// Value to set (empty clears optional keys)
        value: String,
    },

    /// Print the settings file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
