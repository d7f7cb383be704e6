mod cli;
mod commands;
mod error;
mod prompt;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tvctl_config::FileStore;
use tvctl_core::Tv;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    // Progress and confirmations are reported at info, so that is the
    // default; --quiet keeps errors only.
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands work on the settings file directly
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "tvctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands drive the TV
        cmd => {
            let path = commands::config_cmd::settings_path(&cli.global);
            let settings = tvctl_config::load_settings_from(&path)
                .map_err(|e| error::from_config(e, &path))?;
            let store = FileStore::new(&path);
            let config =
                tvctl_config::resolve(&settings, &store).map_err(|e| error::from_config(e, &path))?;
            let mut tv = Tv::new(config, store)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut tv).await
        }
    }
}
