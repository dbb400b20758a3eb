//! Sound-mode command handler.
//!
//! The only attribute whose selection is confirmed by polling: the device
//! applies sound-mode changes noticeably late, so after staging the request
//! we re-read until the reported mode matches or the budget runs out. An
//! exhausted poll is reported through the exit code, never as a crash.

use denonavr_core::{DeviceClient, Session, wait_for_update};

use crate::cli::SoundModeArgs;
use crate::error::{CliError, exit_code};

enum Outcome {
    List(Vec<String>),
    Current(String),
    Selected { observed: String, confirmed: bool },
}

pub async fn handle<C: DeviceClient>(
    session: &mut Session<C>,
    args: SoundModeArgs,
) -> Result<i32, CliError> {
    match apply(&mut session.client, args.list, args.new_mode.as_deref()).await? {
        Outcome::List(modes) => {
            for mode in modes {
                println!("{mode}");
            }
            Ok(exit_code::SUCCESS)
        }
        Outcome::Current(mode) => {
            println!("{mode}");
            Ok(exit_code::SUCCESS)
        }
        Outcome::Selected {
            observed,
            confirmed,
        } => {
            println!("{observed}");
            Ok(if confirmed {
                exit_code::SUCCESS
            } else {
                exit_code::GENERAL
            })
        }
    }
}

async fn apply<C: DeviceClient>(
    avr: &mut C,
    list: bool,
    target: Option<&str>,
) -> Result<Outcome, CliError> {
    if list {
        return Ok(Outcome::List(avr.snapshot().sound_mode_list.clone()));
    }
    if let Some(mode) = target {
        avr.set_sound_mode(mode).await?;
        let confirmed = wait_for_update(avr, |snapshot| snapshot.sound_mode == mode).await?;
        return Ok(Outcome::Selected {
            observed: avr.snapshot().sound_mode.clone(),
            confirmed,
        });
    }
    Ok(Outcome::Current(avr.snapshot().sound_mode.clone()))
}
