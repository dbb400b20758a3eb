//! Interactive shell: re-uses the bootstrapped session for a sequence of
//! commands without re-resolving the host each time.

use std::io::{self, BufRead, Write};

use clap::Parser;

use denonavr_core::{DeviceClient, Session};

use crate::cli::{ReplCommand, ReplLine};
use crate::commands;
use crate::error::{CliError, exit_code};

pub async fn handle<C: DeviceClient>(session: &mut Session<C>) -> Result<i32, CliError> {
    eprintln!(
        "Connected to {}. 'help' lists commands, 'exit' leaves.",
        session.host
    );

    let mut line = String::new();
    loop {
        eprint!("avr> ");
        io::stderr().flush()?;

        line.clear();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match ReplLine::try_parse_from(tokens) {
            Ok(repl) => match repl.command {
                ReplCommand::Exit => break,
                ReplCommand::Status => {
                    commands::status::handle(session)?;
                }
                ReplCommand::Device(command) => {
                    // Command failures are reported and the shell keeps
                    // going; only session-level I/O errors end it.
                    if let Err(err) = commands::dispatch(session, command).await {
                        eprintln!("{:?}", miette::Report::new(err));
                    }
                }
            },
            Err(err) => {
                let _ = err.print();
            }
        }
    }
    Ok(exit_code::SUCCESS)
}
