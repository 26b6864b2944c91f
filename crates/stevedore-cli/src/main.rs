//! Stevedore CLI binary entrypoint.
//!
//! This is the main entry point for the `stevedore` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stevedore_cli::cli::{Cli, Commands, Format};
use stevedore_cli::commands::{
    HealthCommand, ListCommand, PauseCommand, ShowCommand, StartCommand, TerminateCommand,
    UnpauseCommand,
};
use stevedore_cli::error::{report_failure, CliError};
use stevedore_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Argument errors exit 1 with usage guidance, before any connection;
    // help and version are not errors.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // One command per invocation, one sequential chain of calls
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let format = OutputFormat::new(Format::from_json_flag(cli.json));
    let action = cli.command.action();

    match runtime.block_on(run(cli, &format)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&format, action, &e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, format: &OutputFormat) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Health => {
            HealthCommand::new(&cli.service)
                .execute(&mut stdout, format)
                .await
        }
        Commands::Start(ref args) => {
            StartCommand::new(&cli.service)
                .execute(&mut stdout, format, args)
                .await
        }
        Commands::List => {
            ListCommand::new(&cli.service)
                .execute(&mut stdout, format)
                .await
        }
        Commands::Show { ref id } => {
            ShowCommand::new(&cli.service)
                .execute(&mut stdout, format, id)
                .await
        }
        Commands::Pause { ref id } => {
            PauseCommand::new(&cli.service)
                .execute(&mut stdout, format, id)
                .await
        }
        Commands::Unpause { ref id } => {
            UnpauseCommand::new(&cli.service)
                .execute(&mut stdout, format, id)
                .await
        }
        Commands::Terminate { ref id } => {
            TerminateCommand::new(&cli.service)
                .execute(&mut stdout, format, id)
                .await
        }
    }
}
