//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text, plus the exit-code mapping used by `main`.

use miette::Diagnostic;
use thiserror::Error;

use denonavr_core::{CacheError, CoreError, DeviceError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// Runtime failures, plus the two reported-not-crashed outcomes: a pure
    /// discover call that found nothing and an exhausted confirmation poll.
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("cannot reach receiver at {host}: {reason}")]
    #[diagnostic(
        code(denonavr::network),
        help("Check that the receiver is powered on and reachable on the local network.")
    )]
    Network { host: String, reason: String },

    #[error("receiver at {host} sent an invalid response: {reason}")]
    #[diagnostic(code(denonavr::protocol))]
    Protocol { host: String, reason: String },

    #[error("autodiscovery found no receivers")]
    #[diagnostic(
        code(denonavr::no_receivers),
        help("Power on the receiver, or supply --host explicitly.")
    )]
    NoReceivers,

    #[error("autodiscovery found multiple receivers")]
    #[diagnostic(
        code(denonavr::multiple_receivers),
        help("Select one of the {count} receivers listed above via --host.")
    )]
    MultipleReceivers { count: usize },

    #[error("new volume needs to be provided for the 'set' action")]
    #[diagnostic(code(denonavr::usage))]
    MissingVolume,

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoReceivers | Self::MultipleReceivers { .. } | Self::MissingVolume => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<DeviceError> for CliError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::Network { host, reason } => Self::Network { host, reason },
            DeviceError::Protocol { host, reason } => Self::Protocol { host, reason },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Device(device) => device.into(),
            CoreError::NoReceivers => Self::NoReceivers,
            // The caller is expected to have printed the descriptor list
            // already; only the count survives into the diagnostic.
            CoreError::MultipleReceivers { receivers } => Self::MultipleReceivers {
                count: receivers.len(),
            },
            CoreError::Cache(cache) => Self::Cache(cache),
        }
    }
}
