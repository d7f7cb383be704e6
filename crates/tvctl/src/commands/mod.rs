//! Command handlers.

pub mod config_cmd;
pub mod token;

use tvctl_config::FileStore;
use tvctl_core::Tv;

use crate::cli::Command;
use crate::error::CliError;
use crate::prompt::TerminalPrompt;

/// Dispatch a device-facing command to the orchestrator.
pub async fn dispatch(command: Command, tv: &mut Tv<FileStore>) -> Result<(), CliError> {
    match command {
        Command::On => {
            tv.turn_on(&TerminalPrompt).await?;
            Ok(())
        }
        Command::Off => {
            tv.turn_off().await?;
            Ok(())
        }
        Command::Vol(args) => {
            tv.volume(args.direction.into(), args.steps).await?;
            Ok(())
        }
        Command::Mute => {
            tv.toggle_mute().await?;
            Ok(())
        }
        Command::Token(args) => token::handle(args, tv).await,
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before the TV is built")
        }
    }
}
