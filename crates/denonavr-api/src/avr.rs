// ── Receiver HTTP client ──
//
// Wraps `reqwest::Client` with the receiver's `/goform/` URL scheme. Status
// endpoints return XML; the command endpoint accepts the serial-protocol
// command as its raw query string and returns nothing of interest. Every
// mutation here is staged on the device: callers must re-fetch the status
// document to observe its effect.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::status::{DeviceInfo, StatusError, ZoneStatus};

/// Port of the receiver's HTTP control interface.
const CONTROL_PORT: u16 = 8080;

const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

const DEVICE_INFO_PATH: &str = "Deviceinfo.xml";
const ZONE_STATUS_PATH: &str = "formMainZone_MainZoneXmlStatus.xml";
const COMMAND_PATH: &str = "formiPhoneAppDirect.xml";

/// HTTP client for a single receiver.
///
/// `setup()` must succeed exactly once before anything else is called;
/// `update()` may be repeated freely and replaces the whole cached status.
pub struct AvrClient {
    http: reqwest::Client,
    host: String,
    base: Option<Url>,
    info: Option<DeviceInfo>,
    status: Option<ZoneStatus>,
}

impl AvrClient {
    /// Create a client for `host` using the standard control port.
    pub fn new(host: &str) -> Self {
        Self {
            http: http_client(),
            host: host.to_string(),
            base: None,
            info: None,
            status: None,
        }
    }

    /// Create a client with an explicit base URL (tests point this at a
    /// local mock server).
    pub fn with_base(host: &str, base: Url) -> Self {
        Self {
            http: http_client(),
            host: host.to_string(),
            base: Some(base),
            info: None,
            status: None,
        }
    }

    /// The host this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Device info captured by `setup()`.
    pub fn info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }

    /// The status captured by the most recent `update()`.
    pub fn status(&self) -> Option<&ZoneStatus> {
        self.status.as_ref()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Verify the receiver is reachable and capture its device info.
    ///
    /// One-shot: calling this twice on the same instance is a logic error.
    pub async fn setup(&mut self) -> Result<(), ApiError> {
        debug_assert!(self.info.is_none(), "setup() called twice");
        let body = self.fetch(DEVICE_INFO_PATH).await?;
        let info = DeviceInfo::from_xml(&body).map_err(|e| self.protocol(e))?;
        debug!(host = %self.host, model = %info.model_name, "receiver setup complete");
        self.info = Some(info);
        Ok(())
    }

    /// Re-read the full main-zone status snapshot.
    pub async fn update(&mut self) -> Result<&ZoneStatus, ApiError> {
        let body = self.fetch(ZONE_STATUS_PATH).await?;
        let status = ZoneStatus::from_xml(&body).map_err(|e| self.protocol(e))?;
        Ok(self.status.insert(status))
    }

    // ── Staged mutations ─────────────────────────────────────────────

    pub async fn power_on(&self) -> Result<(), ApiError> {
        self.command("PWON").await
    }

    pub async fn power_off(&self) -> Result<(), ApiError> {
        self.command("PWSTANDBY").await
    }

    pub async fn set_mute(&self, mute: bool) -> Result<(), ApiError> {
        self.command(if mute { "MUON" } else { "MUOFF" }).await
    }

    pub async fn set_input(&self, input: &str) -> Result<(), ApiError> {
        self.command(&format!("SI{input}")).await
    }

    pub async fn set_volume(&self, volume_db: f64) -> Result<(), ApiError> {
        self.command(&volume_command(volume_db)).await
    }

    pub async fn volume_up(&self) -> Result<(), ApiError> {
        self.command("MVUP").await
    }

    pub async fn volume_down(&self) -> Result<(), ApiError> {
        self.command("MVDOWN").await
    }

    pub async fn set_sound_mode(&self, mode: &str) -> Result<(), ApiError> {
        self.command(&format!("MS{mode}")).await
    }

    // ── Transport ────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = match &self.base {
            Some(base) => base.join(&format!("goform/{path}")),
            None => Url::parse(&format!(
                "http://{}:{}/goform/{}",
                self.host, CONTROL_PORT, path
            )),
        };
        joined.map_err(|source| ApiError::InvalidHost {
            host: self.host.clone(),
            source,
        })
    }

    async fn fetch(&self, path: &str) -> Result<String, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        if !response.status().is_success() {
            return Err(ApiError::Protocol {
                host: self.host.clone(),
                reason: format!("HTTP {} for {path}", response.status()),
            });
        }
        response.text().await.map_err(|e| self.transport(e))
    }

    async fn command(&self, cmd: &str) -> Result<(), ApiError> {
        let mut url = self.endpoint(COMMAND_PATH)?;
        url.set_query(Some(cmd));
        debug!(host = %self.host, %cmd, "sending command");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        if !response.status().is_success() {
            return Err(ApiError::Protocol {
                host: self.host.clone(),
                reason: format!("HTTP {} for command {cmd}", response.status()),
            });
        }
        Ok(())
    }

    fn transport(&self, source: reqwest::Error) -> ApiError {
        // Anything short of a well-formed-but-broken payload counts as the
        // receiver being unreachable.
        if source.is_decode() {
            ApiError::Protocol {
                host: self.host.clone(),
                reason: source.to_string(),
            }
        } else {
            ApiError::Network {
                host: self.host.clone(),
                source,
            }
        }
    }

    fn protocol(&self, source: StatusError) -> ApiError {
        ApiError::Protocol {
            host: self.host.clone(),
            reason: source.to_string(),
        }
    }
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Encode a dB volume as an `MV` command.
///
/// The device scale is offset by 80 (`MV80` is 0.0 dB) and moves in half-dB
/// steps; a half step is encoded as a trailing `5` digit (`MV345` is
/// -45.5 dB).
fn volume_command(volume_db: f64) -> String {
    let level = ((volume_db + 80.0) * 2.0).round() / 2.0;
    let whole = level.floor();
    #[allow(clippy::cast_possible_truncation)]
    let whole = whole as i64;
    if (level - level.floor()).abs() < f64::EPSILON {
        format!("MV{whole:02}")
    } else {
        format!("MV{whole:02}5")
    }
}
