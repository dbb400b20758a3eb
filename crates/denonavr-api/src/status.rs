// ── XML status documents ──
//
// The receiver wraps every scalar in a `<value>` child element and repeats
// `<value>` for list payloads, so the serde structs mirror that envelope
// before flattening into the public types.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("unparseable {field}: {value:?}")]
    Field { field: &'static str, value: String },
}

// ── Device info (setup) ─────────────────────────────────────────────

/// Parsed `/goform/Deviceinfo.xml` payload.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub model_name: String,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeviceInfoXml {
    model_name: String,
    serial_number: Option<String>,
    mac_address: Option<String>,
}

impl DeviceInfo {
    pub fn from_xml(xml: &str) -> Result<Self, StatusError> {
        let raw: DeviceInfoXml = quick_xml::de::from_str(xml)?;
        Ok(Self {
            model_name: raw.model_name,
            serial_number: raw.serial_number,
            mac_address: raw.mac_address,
        })
    }
}

// ── Main zone status (refresh) ──────────────────────────────────────

/// One full main-zone snapshot as reported by
/// `/goform/formMainZone_MainZoneXmlStatus.xml`.
///
/// `power` is the raw device state (`ON` or `STANDBY`); volume is the
/// relative dB display value.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStatus {
    pub power: String,
    pub muted: bool,
    pub volume: f64,
    pub input_func: String,
    pub input_func_list: Vec<String>,
    pub sound_mode: String,
    pub sound_mode_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ValueTag {
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValueList {
    #[serde(default)]
    value: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneStatusXml {
    power: ValueTag,
    input_func_select: ValueTag,
    master_volume: ValueTag,
    mute: ValueTag,
    surr_mode: ValueTag,
    #[serde(default)]
    input_func_list: ValueList,
    #[serde(default)]
    surr_mode_list: ValueList,
}

impl ZoneStatus {
    pub fn from_xml(xml: &str) -> Result<Self, StatusError> {
        let raw: ZoneStatusXml = quick_xml::de::from_str(xml)?;

        let volume = raw.master_volume.value.trim();
        let volume: f64 = volume.parse().map_err(|_| StatusError::Field {
            field: "MasterVolume",
            value: volume.to_string(),
        })?;

        let muted = match raw.mute.value.to_ascii_lowercase().as_str() {
            "on" => true,
            "off" => false,
            _ => {
                return Err(StatusError::Field {
                    field: "Mute",
                    value: raw.mute.value,
                });
            }
        };

        Ok(Self {
            power: raw.power.value.trim().to_ascii_uppercase(),
            muted,
            volume,
            input_func: raw.input_func_select.value,
            input_func_list: raw.input_func_list.value,
            sound_mode: raw.surr_mode.value.trim().to_string(),
            sound_mode_list: raw.surr_mode_list.value,
        })
    }
}
