//! Command dispatch: one module per controllable attribute, each exposing a
//! testable `apply` state machine and a thin `handle` that prints.

pub mod discover;
pub mod input;
pub mod mute;
pub mod power;
pub mod shell;
pub mod sound_mode;
pub mod status;
pub mod volume;

use denonavr_core::{DeviceClient, Session};

use crate::cli::DeviceCommand;
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch<C: DeviceClient>(
    session: &mut Session<C>,
    command: DeviceCommand,
) -> Result<i32, CliError> {
    match command {
        DeviceCommand::Input(args) => input::handle(session, args).await,
        DeviceCommand::Mute(args) => mute::handle(session, args).await,
        DeviceCommand::Power(args) => power::handle(session, args).await,
        DeviceCommand::Volume(args) => volume::handle(session, args).await,
        DeviceCommand::SoundMode(args) => sound_mode::handle(session, args).await,
    }
}
