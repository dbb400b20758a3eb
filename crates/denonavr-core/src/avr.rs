// ── Real-device binding ──
//
// Implements the device traits on top of `denonavr-api`, converting its
// status documents into the core snapshot and its errors into the core
// taxonomy.

use denonavr_api::{ApiError, AvrClient, ZoneStatus};

use crate::device::{
    AttributeSnapshot, DeviceClient, DeviceConnector, DeviceDescriptor, DeviceError, Power,
};

/// Connector backed by SSDP discovery and the receiver HTTP interface.
#[derive(Debug, Default)]
pub struct AvrConnector;

impl AvrConnector {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceConnector for AvrConnector {
    type Client = Avr;

    async fn discover(&self) -> Result<Vec<DeviceDescriptor>, DeviceError> {
        let found = denonavr_api::discover().await.map_err(DeviceError::from)?;
        Ok(found
            .into_iter()
            .map(|device| DeviceDescriptor {
                host: device.host,
                manufacturer: device.manufacturer,
                model_name: device.model_name,
                serial_number: device.serial_number,
                friendly_name: device.friendly_name,
            })
            .collect())
    }

    fn open(&self, host: &str) -> Avr {
        Avr {
            inner: AvrClient::new(host),
            snapshot: AttributeSnapshot::default(),
        }
    }
}

/// A receiver session client: the HTTP client plus the last refreshed
/// snapshot in core terms.
pub struct Avr {
    inner: AvrClient,
    snapshot: AttributeSnapshot,
}

impl DeviceClient for Avr {
    async fn setup(&mut self) -> Result<(), DeviceError> {
        self.inner.setup().await.map_err(DeviceError::from)
    }

    async fn refresh(&mut self) -> Result<(), DeviceError> {
        let status = self.inner.update().await.map_err(DeviceError::from)?;
        self.snapshot = snapshot_from(status);
        Ok(())
    }

    fn snapshot(&self) -> &AttributeSnapshot {
        &self.snapshot
    }

    async fn power_on(&mut self) -> Result<(), DeviceError> {
        self.inner.power_on().await.map_err(DeviceError::from)
    }

    async fn power_off(&mut self) -> Result<(), DeviceError> {
        self.inner.power_off().await.map_err(DeviceError::from)
    }

    async fn set_mute(&mut self, mute: bool) -> Result<(), DeviceError> {
        self.inner.set_mute(mute).await.map_err(DeviceError::from)
    }

    async fn set_volume(&mut self, volume_db: f64) -> Result<(), DeviceError> {
        self.inner
            .set_volume(volume_db)
            .await
            .map_err(DeviceError::from)
    }

    async fn volume_up(&mut self) -> Result<(), DeviceError> {
        self.inner.volume_up().await.map_err(DeviceError::from)
    }

    async fn volume_down(&mut self) -> Result<(), DeviceError> {
        self.inner.volume_down().await.map_err(DeviceError::from)
    }

    async fn set_input(&mut self, input: &str) -> Result<(), DeviceError> {
        self.inner.set_input(input).await.map_err(DeviceError::from)
    }

    async fn set_sound_mode(&mut self, mode: &str) -> Result<(), DeviceError> {
        self.inner
            .set_sound_mode(mode)
            .await
            .map_err(DeviceError::from)
    }
}

fn snapshot_from(status: &ZoneStatus) -> AttributeSnapshot {
    AttributeSnapshot {
        power: Power::from_raw(&status.power),
        muted: status.muted,
        volume: status.volume,
        input_func: status.input_func.clone(),
        input_func_list: status.input_func_list.clone(),
        sound_mode: status.sound_mode.clone(),
        sound_mode_list: status.sound_mode_list.clone(),
    }
}

impl From<ApiError> for DeviceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network { host, source } => DeviceError::Network {
                host,
                reason: source.to_string(),
            },
            ApiError::InvalidHost { host, source } => DeviceError::Network {
                host,
                reason: source.to_string(),
            },
            ApiError::Protocol { host, reason } => DeviceError::Protocol { host, reason },
            ApiError::Discovery { source } => DeviceError::Network {
                host: "239.255.255.250".into(),
                reason: source.to_string(),
            },
        }
    }
}
