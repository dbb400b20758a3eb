//! Input command handler.

use denonavr_core::{DeviceClient, Session};

use crate::cli::InputArgs;
use crate::error::{CliError, exit_code};

enum Outcome {
    List(Vec<String>),
    Value(String),
}

pub async fn handle<C: DeviceClient>(
    session: &mut Session<C>,
    args: InputArgs,
) -> Result<i32, CliError> {
    match apply(&mut session.client, args.list, args.new_input.as_deref()).await? {
        Outcome::List(inputs) => {
            for input in inputs {
                println!("{input}");
            }
        }
        Outcome::Value(value) => println!("{value}"),
    }
    Ok(exit_code::SUCCESS)
}

async fn apply<C: DeviceClient>(
    avr: &mut C,
    list: bool,
    target: Option<&str>,
) -> Result<Outcome, CliError> {
    // --list wins over a target: no mutation is attempted.
    if list {
        return Ok(Outcome::List(avr.snapshot().input_func_list.clone()));
    }
    if let Some(input) = target {
        avr.set_input(input).await?;
        // There is no way to wait for the switch to actually happen, but the
        // device validates the input name internally, so echo the request.
        return Ok(Outcome::Value(input.to_string()));
    }
    Ok(Outcome::Value(avr.snapshot().input_func.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use denonavr_core::DeviceConnector;
    use denonavr_core::mock::MockConnector;

    use super::*;

    async fn setup() -> (MockConnector, denonavr_core::mock::MockAvr) {
        let connector = MockConnector::new();
        let mut avr = connector.open("mocked-host");
        avr.setup().await.unwrap();
        avr.refresh().await.unwrap();
        (connector, avr)
    }

    #[tokio::test]
    async fn no_arguments_prints_current_input() {
        let (_connector, mut avr) = setup().await;
        let outcome = apply(&mut avr, false, None).await.unwrap();
        assert!(matches!(outcome, Outcome::Value(v) if v == "Game"));
    }

    #[tokio::test]
    async fn list_prints_device_order() {
        let (_connector, mut avr) = setup().await;
        let outcome = apply(&mut avr, true, None).await.unwrap();
        match outcome {
            Outcome::List(inputs) => assert_eq!(inputs, vec!["AUX", "Game", "TV Audio"]),
            Outcome::Value(_) => panic!("expected a list"),
        }
    }

    #[tokio::test]
    async fn list_takes_precedence_over_a_target() {
        let (connector, mut avr) = setup().await;
        let outcome = apply(&mut avr, true, Some("TV Audio")).await.unwrap();
        assert!(matches!(outcome, Outcome::List(_)));
        assert_eq!(connector.state().selected_input, None);
    }

    #[tokio::test]
    async fn target_is_selected_and_echoed_unconfirmed() {
        let (connector, mut avr) = setup().await;
        let outcome = apply(&mut avr, false, Some("TV Audio")).await.unwrap();
        assert!(matches!(outcome, Outcome::Value(v) if v == "TV Audio"));
        assert_eq!(
            connector.state().selected_input.as_deref(),
            Some("TV Audio")
        );
        // No confirmation refresh: the snapshot still shows the old input.
        assert_eq!(avr.snapshot().input_func, "Game");
    }
}
