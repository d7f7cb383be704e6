//! SmartThings token subcommand handlers.

use tracing::info;

use tvctl_config::FileStore;
use tvctl_core::Tv;

use crate::cli::{TokenArgs, TokenCommand};
use crate::error::CliError;
use crate::prompt::TerminalPrompt;

pub async fn handle(args: TokenArgs, tv: &mut Tv<FileStore>) -> Result<(), CliError> {
    match args.command {
        TokenCommand::Check => {
            info!("checking cloud token");
            tv.ensure_cloud_token(&TerminalPrompt).await?;
        }
        TokenCommand::Renew => {
            tv.renew_cloud_token(&TerminalPrompt).await?;
        }
    }
    Ok(())
}
