//! callkeep-push CLI entry point

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::info;

use callkeep_push::cli::{
    app::{load_merged_config, run_push, PushOptions, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    init_logging,
    presenter::Presenter,
};
use callkeep_push::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let mut presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Nothing to send without a device and a caller
    let Some((token, caller_id)) = cli.push_target() else {
        let _ = Cli::command().write_help(&mut io::stderr());
        return ExitCode::SUCCESS;
    };

    let config = load_merged_config(cli.to_config(), &presenter).await;

    // Subscriber lives until main returns
    let _log_guard = init_logging(config.log_level_or_default());
    info!("try push");

    let options = PushOptions::from_config(&config, token, caller_id);
    run_push(options, &mut presenter).await
}
