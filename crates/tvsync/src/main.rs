mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tvsync_api::{ApiClient, TransportConfig};
use tvsync_core::Inventory;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
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
        // Completions never need a token.
        Some(Command::Completions(args)) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "tvsync", &mut std::io::stdout());
            Ok(())
        }
        Some(cmd) => {
            let inventory = connect(&cli.global).await?;
            commands::dispatch(cmd, &inventory, &cli.global).await
        }
        None => {
            let inventory = connect(&cli.global).await?;
            commands::menu::run(&inventory, &cli.global).await
        }
    }
}

/// Build the client from config + flags and verify the token before
/// anything else runs.
async fn connect(global: &cli::GlobalOpts) -> Result<Inventory, CliError> {
    let config = config::load_config(global)?;
    let token = config::resolve_token(global, &config)?;

    let transport = TransportConfig {
        timeout: std::time::Duration::from_secs(config.timeout),
    };
    let client =
        ApiClient::from_token(&config.base_url, &token, &transport).map_err(|e| {
            CliError::Validation {
                field: "base-url".into(),
                reason: e.to_string(),
            }
        })?;

    let inventory = Inventory::new(client);
    let token_valid = inventory.authorize().await.map_err(CliError::from)?;
    if !token_valid {
        return Err(CliError::AuthFailed {
            message: "the service reports the token as invalid".into(),
        });
    }
    output::success("Authorization OK");
    Ok(inventory)
}
