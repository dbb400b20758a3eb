// ── Core error type ──
//
// Consumers never see reqwest or XML parse failures directly; the device
// layer folds those into `DeviceError` first.

use thiserror::Error;

use crate::cache::CacheError;
use crate::device::{DeviceDescriptor, DeviceError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("autodiscovery found no receivers")]
    NoReceivers,

    /// Carries the full descriptor list so the caller can print the
    /// disambiguation lines before reporting the failure.
    #[error("autodiscovery found multiple receivers")]
    MultipleReceivers { receivers: Vec<DeviceDescriptor> },

    #[error(transparent)]
    Cache(#[from] CacheError),
}
