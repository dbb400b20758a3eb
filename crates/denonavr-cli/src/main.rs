mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use denonavr_core::{AvrConnector, CacheMode, CoreError, HostCache, bootstrap, resolve_host};

use crate::cli::{Cli, Command};
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(code);
        }
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
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        // Completions never touch the network
        Some(Command::Completions(args)) => {
            use clap::CommandFactory;

            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "denonavr-cli", &mut std::io::stdout());
            Ok(exit_code::SUCCESS)
        }

        // Pure discovery bypasses host resolution entirely
        Some(Command::Discover) => {
            let connector = AvrConnector::new();
            commands::discover::handle(&connector).await
        }

        // Everything else runs against a bootstrapped session
        command => {
            let connector = AvrConnector::new();
            let cache = HostCache::from_env();
            let cache_mode = CacheMode::from(cli.global.host_cache);

            let resolved = match resolve_host(
                &connector,
                cli.global.host.as_deref(),
                cache_mode,
                &cache,
            )
            .await
            {
                Ok(resolved) => resolved,
                Err(CoreError::MultipleReceivers { receivers }) => {
                    // The disambiguation list still goes to stdout before
                    // the failure is reported.
                    for receiver in &receivers {
                        println!("{}", output::receiver_line(receiver));
                    }
                    return Err(CliError::MultipleReceivers {
                        count: receivers.len(),
                    });
                }
                Err(err) => return Err(err.into()),
            };

            let mut session = bootstrap(&connector, resolved, cache_mode, &cache).await?;
            tracing::debug!(host = %session.host, command = ?command, "session bootstrapped");

            match command {
                None => commands::status::handle(&session),
                Some(Command::Shell) => commands::shell::handle(&mut session).await,
                Some(Command::Device(device_command)) => {
                    commands::dispatch(&mut session, device_command).await
                }
                Some(Command::Discover | Command::Completions(_)) => unreachable!(),
            }
        }
    }
}
