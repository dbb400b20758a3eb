//! Bounded-retry confirmation polling.
//!
//! Some mutations (sound-mode selection in practice) take effect a while
//! after the device acknowledges them. The poller re-reads the snapshot
//! until a caller-supplied predicate holds or the fixed budget runs out.
//! Exhaustion is an outcome, not an error: callers decide how to surface it.

use std::time::Duration;

use tracing::trace;

use crate::device::{AttributeSnapshot, DeviceClient, DeviceError};

/// Fixed attempt budget. No backoff, no jitter, no early cancellation.
pub const CONFIRM_ATTEMPTS: u32 = 20;

/// Pause between attempts, to avoid hammering the device.
pub const CONFIRM_INTERVAL: Duration = Duration::from_millis(200);

/// Refresh until `confirmed` holds against a freshly refreshed snapshot.
///
/// Returns `Ok(true)` as soon as the predicate passes, `Ok(false)` when the
/// budget is exhausted. Refresh failures propagate.
pub async fn wait_for_update<C, P>(client: &mut C, mut confirmed: P) -> Result<bool, DeviceError>
where
    C: DeviceClient,
    P: FnMut(&AttributeSnapshot) -> bool,
{
    for attempt in 1..=CONFIRM_ATTEMPTS {
        client.refresh().await?;
        if confirmed(client.snapshot()) {
            trace!(attempt, "state change confirmed");
            return Ok(true);
        }
        tokio::time::sleep(CONFIRM_INTERVAL).await;
    }
    Ok(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::device::{DeviceConnector, Power};
    use crate::mock::{MockAvr, MockConnector};

    async fn ready_client(connector: &MockConnector) -> MockAvr {
        let mut client = connector.open("mocked-host");
        client.setup().await.unwrap();
        client.refresh().await.unwrap();
        connector.state().refresh_calls = 0;
        client
    }

    #[tokio::test(start_paused = true)]
    async fn confirms_on_the_first_attempt_when_state_matches() {
        let connector = MockConnector::new();
        let mut client = ready_client(&connector).await;

        let ok = wait_for_update(&mut client, |s| s.power == Power::On)
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(connector.state().refresh_calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn staged_change_is_confirmed_after_one_refresh() {
        let connector = MockConnector::new();
        let mut client = ready_client(&connector).await;

        client.set_sound_mode("MOVIE").await.unwrap();
        let ok = wait_for_update(&mut client, |s| s.sound_mode == "MOVIE")
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(connector.state().refresh_calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_exactly_the_fixed_budget() {
        let connector = MockConnector::new();
        let mut client = ready_client(&connector).await;

        let ok = wait_for_update(&mut client, |s| s.sound_mode == "NEVER")
            .await
            .unwrap();
        assert!(!ok);
        assert_eq!(connector.state().refresh_calls, CONFIRM_ATTEMPTS as usize);
    }
}
