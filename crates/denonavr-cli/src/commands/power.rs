//! Power command handler.

use denonavr_core::{DeviceClient, Power, Session};

use crate::cli::{PowerArgs, Switch};
use crate::error::{CliError, exit_code};

pub async fn handle<C: DeviceClient>(
    session: &mut Session<C>,
    args: PowerArgs,
) -> Result<i32, CliError> {
    let power = apply(&mut session.client, args.new_state).await?;
    println!("{power}");
    Ok(exit_code::SUCCESS)
}

/// Stage the requested power change and re-read the result. With no action,
/// just report the current state.
async fn apply<C: DeviceClient>(avr: &mut C, action: Option<Switch>) -> Result<Power, CliError> {
    if let Some(action) = action {
        // Toggle resolves against the snapshot as it was before any
        // mutation is issued.
        let turn_on = match action {
            Switch::On => true,
            Switch::Off => false,
            Switch::Toggle => !avr.snapshot().power.is_on(),
        };
        if turn_on {
            avr.power_on().await?;
        } else {
            avr.power_off().await?;
        }
        avr.refresh().await?;
    }
    Ok(avr.snapshot().power)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use denonavr_core::DeviceConnector;
    use denonavr_core::mock::{MockAvr, MockConnector};

    use super::*;

    async fn avr_with_power(power: Power) -> MockAvr {
        let mut connector = MockConnector::new();
        connector.initial.power = power;
        let mut avr = connector.open("mocked-host");
        avr.setup().await.unwrap();
        avr.refresh().await.unwrap();
        avr
    }

    #[tokio::test]
    async fn no_action_prints_current_state() {
        let mut avr = avr_with_power(Power::On).await;
        assert_eq!(apply(&mut avr, None).await.unwrap(), Power::On);
    }

    #[tokio::test]
    async fn off_from_on() {
        let mut avr = avr_with_power(Power::On).await;
        assert_eq!(apply(&mut avr, Some(Switch::Off)).await.unwrap(), Power::Off);
    }

    #[tokio::test]
    async fn on_from_off() {
        let mut avr = avr_with_power(Power::Off).await;
        assert_eq!(apply(&mut avr, Some(Switch::On)).await.unwrap(), Power::On);
    }

    #[tokio::test]
    async fn toggle_flips_both_ways() {
        let mut avr = avr_with_power(Power::On).await;
        assert_eq!(
            apply(&mut avr, Some(Switch::Toggle)).await.unwrap(),
            Power::Off
        );

        let mut avr = avr_with_power(Power::Off).await;
        assert_eq!(
            apply(&mut avr, Some(Switch::Toggle)).await.unwrap(),
            Power::On
        );
    }

    #[tokio::test]
    async fn idempotent_requests_are_still_issued() {
        let mut avr = avr_with_power(Power::On).await;
        assert_eq!(apply(&mut avr, Some(Switch::On)).await.unwrap(), Power::On);
    }
}
