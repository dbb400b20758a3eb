//! Volume command handler.
//!
//! `up`/`down` with a magnitude are relative adjustments expressed as an
//! absolute set against the pre-mutation value; without a magnitude they use
//! the device's own single-step commands.

use denonavr_core::{DeviceClient, Session};

use crate::cli::{VolumeAction, VolumeArgs};
use crate::error::{CliError, exit_code};

pub async fn handle<C: DeviceClient>(
    session: &mut Session<C>,
    args: VolumeArgs,
) -> Result<i32, CliError> {
    let volume = apply(&mut session.client, args.action, args.value).await?;
    println!("{volume:.1}");
    Ok(exit_code::SUCCESS)
}

async fn apply<C: DeviceClient>(
    avr: &mut C,
    action: Option<VolumeAction>,
    value: Option<f64>,
) -> Result<f64, CliError> {
    if let Some(action) = action {
        match (action, value) {
            (VolumeAction::Set, Some(value)) => avr.set_volume(value).await?,
            (VolumeAction::Set, None) => return Err(CliError::MissingVolume),
            (VolumeAction::Up, Some(step)) => {
                let target = avr.snapshot().volume + step;
                avr.set_volume(target).await?;
            }
            (VolumeAction::Down, Some(step)) => {
                let target = avr.snapshot().volume - step;
                avr.set_volume(target).await?;
            }
            (VolumeAction::Up, None) => avr.volume_up().await?,
            (VolumeAction::Down, None) => avr.volume_down().await?,
        }
        avr.refresh().await?;
    }
    // Post-refresh device value: may differ from the request if the device
    // clamps or rounds it.
    Ok(avr.snapshot().volume)
}
