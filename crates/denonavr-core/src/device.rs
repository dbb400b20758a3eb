//! The device-client boundary: the attribute snapshot, the trait the rest of
//! the core programs against, and the connector factory that creates clients
//! (and that test doubles wrap to count connections).

use std::fmt;

use thiserror::Error;

/// Errors crossing the device boundary.
///
/// `Network` is recoverable in exactly one place (a cached host that no
/// longer answers falls through to discovery); everywhere else both variants
/// abort the invocation.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("cannot reach receiver at {host}: {reason}")]
    Network { host: String, reason: String },

    #[error("receiver at {host} sent an invalid response: {reason}")]
    Protocol { host: String, reason: String },
}

/// Main-zone power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

impl Power {
    /// Map the device's raw power string (`ON`, `STANDBY`, `OFF`).
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("ON") {
            Self::On
        } else {
            Self::Off
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "ON",
            Self::Off => "OFF",
        })
    }
}

/// One wholesale read of the receiver's controllable attributes.
///
/// Values are only trustworthy immediately after a refresh: every mutation
/// is staged on the device and invisible until the next refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSnapshot {
    pub power: Power,
    pub muted: bool,
    /// Main zone volume in dB.
    pub volume: f64,
    pub input_func: String,
    /// Selectable inputs, in device-reported order.
    pub input_func_list: Vec<String>,
    pub sound_mode: String,
    /// Selectable sound modes, in device-reported order.
    pub sound_mode_list: Vec<String>,
}

impl Default for AttributeSnapshot {
    fn default() -> Self {
        Self {
            power: Power::Off,
            muted: false,
            volume: 0.0,
            input_func: String::new(),
            input_func_list: Vec::new(),
            sound_mode: String::new(),
            sound_mode_list: Vec::new(),
        }
    }
}

/// A receiver reported by network discovery. Immutable; lives for one
/// discovery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub host: String,
    pub manufacturer: String,
    pub model_name: String,
    pub serial_number: String,
    pub friendly_name: String,
}

/// A live connection to one receiver.
///
/// `setup()` is one-shot; `refresh()` may be repeated freely. All mutations
/// are fire-and-forget: their effect shows up in the snapshot only after the
/// next `refresh()`.
#[allow(async_fn_in_trait)]
pub trait DeviceClient {
    async fn setup(&mut self) -> Result<(), DeviceError>;

    async fn refresh(&mut self) -> Result<(), DeviceError>;

    /// The attributes read by the most recent `refresh()`.
    fn snapshot(&self) -> &AttributeSnapshot;

    async fn power_on(&mut self) -> Result<(), DeviceError>;
    async fn power_off(&mut self) -> Result<(), DeviceError>;
    async fn set_mute(&mut self, mute: bool) -> Result<(), DeviceError>;
    async fn set_volume(&mut self, volume_db: f64) -> Result<(), DeviceError>;
    async fn volume_up(&mut self) -> Result<(), DeviceError>;
    async fn volume_down(&mut self) -> Result<(), DeviceError>;
    async fn set_input(&mut self, input: &str) -> Result<(), DeviceError>;
    async fn set_sound_mode(&mut self, mode: &str) -> Result<(), DeviceError>;
}

/// Factory for device clients plus network discovery.
///
/// The indirection exists so callers create at most one client per
/// invocation through a single choke point, and so tests can count exactly
/// how many connections a given code path makes.
#[allow(async_fn_in_trait)]
pub trait DeviceConnector {
    type Client: DeviceClient;

    /// Enumerate receivers on the local network, in discovery order.
    async fn discover(&self) -> Result<Vec<DeviceDescriptor>, DeviceError>;

    /// Create an unconnected client for `host`. Does no I/O.
    fn open(&self, host: &str) -> Self::Client;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_display_matches_device_vocabulary() {
        assert_eq!(Power::On.to_string(), "ON");
        assert_eq!(Power::Off.to_string(), "OFF");
    }

    #[test]
    fn power_from_raw_treats_standby_as_off() {
        assert_eq!(Power::from_raw("ON"), Power::On);
        assert_eq!(Power::from_raw("on"), Power::On);
        assert_eq!(Power::from_raw("STANDBY"), Power::Off);
        assert_eq!(Power::from_raw("OFF"), Power::Off);
    }
}
