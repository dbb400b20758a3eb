//! Control client for Denon and Marantz network AV receivers.
//!
//! The receivers expose a plain HTTP interface on the local network: XML
//! status documents under `/goform/`, and a fire-and-forget command channel
//! (`formiPhoneAppDirect.xml`) that accepts the same terse commands as the
//! serial protocol (`PWON`, `MV455`, `SIGAME`, ...). Commands are staged on
//! the device: their effect only becomes observable through a subsequent
//! status fetch.
//!
//! Discovery is SSDP: an M-SEARCH for `MediaRenderer` devices, followed by a
//! UPnP description fetch to filter for Denon/Marantz hardware.

mod avr;
mod discovery;
mod error;
mod status;

pub use avr::AvrClient;
pub use discovery::{DiscoveredDevice, discover, discover_with_timeout};
pub use error::ApiError;
pub use status::{DeviceInfo, StatusError, ZoneStatus};
