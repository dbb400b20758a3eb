//! Pure discovery: enumerate receivers, print them, and stop.

use denonavr_core::DeviceConnector;

use crate::error::{CliError, exit_code};
use crate::output;

/// Print every discovered receiver, one per line, in discovery order.
/// Finding nothing is reported on stderr with a distinct exit status, not
/// treated as a usage error like it is for ordinary commands.
pub async fn handle<F: DeviceConnector>(connector: &F) -> Result<i32, CliError> {
    let receivers = connector.discover().await.map_err(CliError::from)?;

    if receivers.is_empty() {
        eprintln!("No receivers discovered");
        return Ok(exit_code::GENERAL);
    }
    for receiver in &receivers {
        println!("{}", output::receiver_line(receiver));
    }
    Ok(exit_code::SUCCESS)
}
