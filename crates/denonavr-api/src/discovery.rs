// ── SSDP discovery ──
//
// One M-SEARCH burst for UPnP MediaRenderer devices, then a description
// fetch per unique responder to weed out non-Denon/Marantz hardware.
// Responders are reported in first-response order.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout};
use tracing::{debug, trace};
use url::Url;

use crate::error::ApiError;

const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";
const SEARCH_TARGET: &str = "urn:schemas-upnp-org:device:MediaRenderer:1";
const DEFAULT_WINDOW: Duration = Duration::from_secs(2);

/// A receiver found on the local network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub host: String,
    pub manufacturer: String,
    pub model_name: String,
    pub serial_number: String,
    pub friendly_name: String,
}

/// Discover Denon/Marantz receivers with the default response window.
pub async fn discover() -> Result<Vec<DiscoveredDevice>, ApiError> {
    discover_with_timeout(DEFAULT_WINDOW).await
}

/// Discover receivers, collecting SSDP responses for `window`.
pub async fn discover_with_timeout(window: Duration) -> Result<Vec<DiscoveredDevice>, ApiError> {
    let locations = search(window).await?;
    debug!(candidates = locations.len(), "SSDP search finished");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_default();

    let mut found = Vec::new();
    for location in locations {
        match describe(&http, &location).await {
            Some(device) => found.push(device),
            None => trace!(%location, "skipping non-receiver responder"),
        }
    }
    Ok(found)
}

/// Send one M-SEARCH and collect unique `LOCATION` URLs until the window
/// closes.
async fn search(window: Duration) -> Result<Vec<String>, ApiError> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(|source| ApiError::Discovery { source })?;

    let request = format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {SSDP_MULTICAST_ADDR}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: 2\r\n\
         ST: {SEARCH_TARGET}\r\n\
         \r\n"
    );
    socket
        .send_to(request.as_bytes(), SSDP_MULTICAST_ADDR)
        .await
        .map_err(|source| ApiError::Discovery { source })?;

    let deadline = Instant::now() + window;
    let mut seen = HashSet::new();
    let mut locations = Vec::new();
    let mut buf = [0u8; 2048];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match timeout(remaining, socket.recv_from(&mut buf)).await {
            Err(_) => break,
            Ok(Err(source)) => return Err(ApiError::Discovery { source }),
            Ok(Ok((len, peer))) => {
                let Ok(text) = std::str::from_utf8(&buf[..len]) else {
                    continue;
                };
                if let Some(location) = parse_ssdp_response(text) {
                    trace!(%peer, %location, "SSDP response");
                    if seen.insert(location.clone()) {
                        locations.push(location);
                    }
                }
            }
        }
    }
    Ok(locations)
}

/// Extract the `LOCATION` header from a `200 OK` SSDP response.
fn parse_ssdp_response(text: &str) -> Option<String> {
    let mut lines = text.lines();
    let status = lines.next()?;
    if !status.contains("200") {
        return None;
    }
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

// ── UPnP description ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DescriptionXml {
    device: DescribedDevice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribedDevice {
    friendly_name: String,
    manufacturer: String,
    model_name: String,
    serial_number: Option<String>,
}

/// Fetch and parse a UPnP description, returning the device when it is a
/// Denon/Marantz receiver. Unreachable or foreign responders are skipped,
/// not errors: discovery reports what it can positively identify.
async fn describe(http: &reqwest::Client, location: &str) -> Option<DiscoveredDevice> {
    let url = Url::parse(location).ok()?;
    let host = url.host_str()?.to_string();

    let body = http.get(url).send().await.ok()?.text().await.ok()?;
    let description: DescriptionXml = quick_xml::de::from_str(&body).ok()?;
    let device = description.device;

    if !is_receiver_manufacturer(&device.manufacturer) {
        return None;
    }
    Some(DiscoveredDevice {
        host,
        manufacturer: device.manufacturer,
        model_name: device.model_name,
        serial_number: device.serial_number.unwrap_or_default(),
        friendly_name: device.friendly_name,
    })
}

fn is_receiver_manufacturer(manufacturer: &str) -> bool {
    let lower = manufacturer.to_ascii_lowercase();
    lower.contains("denon") || lower.contains("marantz")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_location_header() {
        let response = "HTTP/1.1 200 OK\r\n\
             CACHE-CONTROL: max-age=180\r\n\
             LOCATION: http://192.168.1.20:8080/description.xml\r\n\
             ST: urn:schemas-upnp-org:device:MediaRenderer:1\r\n\
             USN: uuid:5f9ec1b3\r\n\r\n";
        assert_eq!(
            parse_ssdp_response(response).as_deref(),
            Some("http://192.168.1.20:8080/description.xml")
        );
    }

    #[test]
    fn location_header_is_case_insensitive() {
        let response = "HTTP/1.1 200 OK\r\nlocation: http://10.0.0.5/desc.xml\r\n\r\n";
        assert_eq!(
            parse_ssdp_response(response).as_deref(),
            Some("http://10.0.0.5/desc.xml")
        );
    }

    #[test]
    fn rejects_notify_messages() {
        let notify = "NOTIFY * HTTP/1.1\r\nLOCATION: http://10.0.0.5/desc.xml\r\n\r\n";
        assert_eq!(parse_ssdp_response(notify), None);
    }

    #[test]
    fn description_filtering() {
        assert!(is_receiver_manufacturer("Denon"));
        assert!(is_receiver_manufacturer("Marantz America"));
        assert!(!is_receiver_manufacturer("Sonos, Inc."));
    }

    #[test]
    fn description_xml_parses() {
        let xml = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:MediaRenderer:1</deviceType>
    <friendlyName>Living Room</friendlyName>
    <manufacturer>Denon</manufacturer>
    <modelName>AVR-X1600H</modelName>
    <serialNumber>ADN1234567890</serialNumber>
  </device>
</root>"#;
        let parsed: DescriptionXml = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.device.friendly_name, "Living Room");
        assert_eq!(parsed.device.manufacturer, "Denon");
    }
}
