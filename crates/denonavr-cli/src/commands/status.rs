//! Default (no subcommand) status summary.

use denonavr_core::{DeviceClient, Session};

use crate::error::{CliError, exit_code};
use crate::output;

pub fn handle<C: DeviceClient>(session: &Session<C>) -> Result<i32, CliError> {
    println!("{}", output::status_line(session.snapshot()));
    Ok(exit_code::SUCCESS)
}
