//! Scriptable in-memory device for tests.
//!
//! Mirrors the real receiver's staging behavior: mutations land in a pending
//! set and only reach the snapshot on the next `refresh()`. The connector
//! records how many clients were opened so tests can assert that a code path
//! made exactly the connections it should have — no process-global state.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::device::{
    AttributeSnapshot, DeviceClient, DeviceConnector, DeviceDescriptor, DeviceError, Power,
};

/// Counters and records shared between a connector and the clients it opens.
#[derive(Debug, Default)]
pub struct MockState {
    /// Clients created via `open()`.
    pub instances: usize,
    pub setup_calls: usize,
    pub refresh_calls: usize,
    pub discover_calls: usize,
    /// Last input requested via `set_input`. Input selection is recorded but
    /// never applied to the snapshot, matching the real device's opaque
    /// handling of input switches.
    pub selected_input: Option<String>,
}

/// Connector whose clients only ever connect to `reachable`.
pub struct MockConnector {
    pub reachable: String,
    pub initial: AttributeSnapshot,
    pub discovery: Vec<DeviceDescriptor>,
    state: Rc<RefCell<MockState>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            reachable: "mocked-host".into(),
            initial: initial_snapshot(),
            discovery: Vec::new(),
            state: Rc::default(),
        }
    }

    pub fn with_discovery(descriptors: Vec<DeviceDescriptor>) -> Self {
        Self {
            discovery: descriptors,
            ..Self::new()
        }
    }

    pub fn state(&self) -> RefMut<'_, MockState> {
        self.state.borrow_mut()
    }

    pub fn instances(&self) -> usize {
        self.state.borrow().instances
    }
}

impl DeviceConnector for MockConnector {
    type Client = MockAvr;

    async fn discover(&self) -> Result<Vec<DeviceDescriptor>, DeviceError> {
        self.state.borrow_mut().discover_calls += 1;
        Ok(self.discovery.clone())
    }

    fn open(&self, host: &str) -> MockAvr {
        self.state.borrow_mut().instances += 1;
        MockAvr {
            host: host.to_string(),
            reachable: self.reachable.clone(),
            initial: self.initial.clone(),
            ready: false,
            snapshot: AttributeSnapshot::default(),
            pending_snapshot: None,
            staged: Staged::default(),
            state: Rc::clone(&self.state),
        }
    }
}

#[derive(Debug, Default)]
struct Staged {
    power: Option<Power>,
    muted: Option<bool>,
    volume: Option<f64>,
    sound_mode: Option<String>,
}

/// In-memory device client with staged-mutation semantics.
#[derive(Debug)]
pub struct MockAvr {
    host: String,
    reachable: String,
    initial: AttributeSnapshot,
    ready: bool,
    snapshot: AttributeSnapshot,
    pending_snapshot: Option<AttributeSnapshot>,
    staged: Staged,
    state: Rc<RefCell<MockState>>,
}

impl MockAvr {
    fn unreachable(&self) -> DeviceError {
        DeviceError::Network {
            host: self.host.clone(),
            reason: "connection refused".into(),
        }
    }
}

impl DeviceClient for MockAvr {
    async fn setup(&mut self) -> Result<(), DeviceError> {
        self.state.borrow_mut().setup_calls += 1;
        if self.host != self.reachable {
            return Err(self.unreachable());
        }
        assert!(!self.ready, "setup() called twice on the same client");
        self.ready = true;
        // The initial attributes become visible on the first refresh, like
        // the real device.
        self.pending_snapshot = Some(self.initial.clone());
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), DeviceError> {
        assert!(self.ready, "refresh() before setup()");
        self.state.borrow_mut().refresh_calls += 1;
        if let Some(snapshot) = self.pending_snapshot.take() {
            self.snapshot = snapshot;
        }
        let staged = std::mem::take(&mut self.staged);
        if let Some(power) = staged.power {
            self.snapshot.power = power;
        }
        if let Some(muted) = staged.muted {
            self.snapshot.muted = muted;
        }
        if let Some(volume) = staged.volume {
            self.snapshot.volume = volume;
        }
        if let Some(sound_mode) = staged.sound_mode {
            self.snapshot.sound_mode = sound_mode;
        }
        Ok(())
    }

    fn snapshot(&self) -> &AttributeSnapshot {
        &self.snapshot
    }

    async fn power_on(&mut self) -> Result<(), DeviceError> {
        self.staged.power = Some(Power::On);
        Ok(())
    }

    async fn power_off(&mut self) -> Result<(), DeviceError> {
        self.staged.power = Some(Power::Off);
        Ok(())
    }

    async fn set_mute(&mut self, mute: bool) -> Result<(), DeviceError> {
        self.staged.muted = Some(mute);
        Ok(())
    }

    async fn set_volume(&mut self, volume_db: f64) -> Result<(), DeviceError> {
        self.staged.volume = Some(volume_db);
        Ok(())
    }

    async fn volume_up(&mut self) -> Result<(), DeviceError> {
        self.staged.volume = Some(self.snapshot.volume + 0.5);
        Ok(())
    }

    async fn volume_down(&mut self) -> Result<(), DeviceError> {
        self.staged.volume = Some(self.snapshot.volume - 0.5);
        Ok(())
    }

    async fn set_input(&mut self, input: &str) -> Result<(), DeviceError> {
        self.state.borrow_mut().selected_input = Some(input.to_string());
        Ok(())
    }

    async fn set_sound_mode(&mut self, mode: &str) -> Result<(), DeviceError> {
        // Unknown modes are silently dropped by the device; the staged value
        // never materializes and confirmation polling runs out its budget.
        if self.snapshot.sound_mode_list.iter().any(|m| m == mode) {
            self.staged.sound_mode = Some(mode.to_string());
        }
        Ok(())
    }
}

/// The canonical mocked device state used across the test suite.
pub fn initial_snapshot() -> AttributeSnapshot {
    AttributeSnapshot {
        power: Power::On,
        muted: false,
        volume: -45.5,
        input_func: "Game".into(),
        input_func_list: vec!["AUX".into(), "Game".into(), "TV Audio".into()],
        sound_mode: "MCH STEREO".into(),
        sound_mode_list: vec![
            "DIRECT".into(),
            "MCH STEREO".into(),
            "MOVIE".into(),
            "MUSIC".into(),
        ],
    }
}

/// Descriptor fixture helper.
pub fn descriptor(host: &str, friendly_name: &str, model: &str, serial: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        host: host.to_string(),
        manufacturer: "Mocker".into(),
        model_name: model.to_string(),
        serial_number: serial.to_string(),
        friendly_name: friendly_name.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mutations_stay_invisible_until_refresh() {
        let connector = MockConnector::new();
        let mut avr = connector.open("mocked-host");
        avr.setup().await.unwrap();
        avr.refresh().await.unwrap();

        avr.set_mute(true).await.unwrap();
        assert!(!avr.snapshot().muted);
        avr.refresh().await.unwrap();
        assert!(avr.snapshot().muted);
    }

    #[tokio::test]
    async fn setup_rejects_unknown_hosts() {
        let connector = MockConnector::new();
        let mut avr = connector.open("somewhere-else");
        let err = avr.setup().await.unwrap_err();
        assert!(matches!(err, DeviceError::Network { .. }));
        assert_eq!(connector.instances(), 1);
    }
}
