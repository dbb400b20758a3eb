//! Core logic for denonavr-cli: decide which receiver to talk to, turn the
//! decision into a live refreshed session, and confirm state changes that
//! the device applies asynchronously.
//!
//! Everything here is generic over the [`DeviceClient`] / [`DeviceConnector`]
//! traits; [`AvrConnector`] binds them to the real HTTP client from
//! `denonavr-api`. Tests substitute the connector to count connections and
//! script device behavior without any process-global state.

mod avr;
pub mod cache;
pub mod device;
mod error;
pub mod poll;
pub mod resolve;
pub mod session;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use avr::{Avr, AvrConnector};
pub use cache::{CACHE_FILE_NAME, CacheError, CacheMode, HostCache};
pub use device::{
    AttributeSnapshot, DeviceClient, DeviceConnector, DeviceDescriptor, DeviceError, Power,
};
pub use error::CoreError;
pub use poll::{CONFIRM_ATTEMPTS, CONFIRM_INTERVAL, wait_for_update};
pub use resolve::{ResolvedHost, resolve_host};
pub use session::{Session, bootstrap};
