//! Mute command handler.

use denonavr_core::{DeviceClient, Session};

use crate::cli::{MuteArgs, Switch};
use crate::error::{CliError, exit_code};

pub async fn handle<C: DeviceClient>(
    session: &mut Session<C>,
    args: MuteArgs,
) -> Result<i32, CliError> {
    let muted = apply(&mut session.client, args.new_state).await?;
    println!("{muted}");
    Ok(exit_code::SUCCESS)
}

async fn apply<C: DeviceClient>(avr: &mut C, action: Option<Switch>) -> Result<bool, CliError> {
    if let Some(action) = action {
        let mute = match action {
            Switch::On => true,
            Switch::Off => false,
            Switch::Toggle => !avr.snapshot().muted,
        };
        avr.set_mute(mute).await?;
        avr.refresh().await?;
    }
    Ok(avr.snapshot().muted)
}
