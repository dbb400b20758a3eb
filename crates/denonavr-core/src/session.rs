//! Session bootstrap: turn a resolved host into a live, refreshed device
//! session and persist the winning host.

use tracing::debug;

use crate::cache::{CacheMode, HostCache};
use crate::device::{DeviceClient, DeviceConnector};
use crate::error::CoreError;
use crate::resolve::ResolvedHost;

/// A live, refreshed connection to one receiver. Owned exclusively by the
/// invocation; nothing outlives it except the cached host.
#[derive(Debug)]
pub struct Session<C> {
    pub host: String,
    pub client: C,
}

impl<C: DeviceClient> Session<C> {
    pub fn snapshot(&self) -> &crate::device::AttributeSnapshot {
        self.client.snapshot()
    }
}

/// Bootstrap a session from a resolver outcome.
///
/// A client carried over from cache validation is reused as-is; otherwise
/// one is created and set up here (network failure is fatal at this point —
/// the host was explicit or freshly discovered). Exactly one refresh runs
/// before the session is handed out, so the snapshot reflects the device
/// before any command executes. Finally the winning host is written back to
/// the cache unless caching is off — `reset` rewrites by simply having
/// forced rediscovery.
pub async fn bootstrap<F: DeviceConnector>(
    connector: &F,
    resolved: ResolvedHost<F::Client>,
    cache_mode: CacheMode,
    cache: &HostCache,
) -> Result<Session<F::Client>, CoreError> {
    let ResolvedHost { host, client } = resolved;

    let mut client = match client {
        Some(client) => client,
        None => {
            let mut client = connector.open(&host);
            client.setup().await?;
            client
        }
    };

    client.refresh().await?;

    if cache_mode != CacheMode::Off {
        cache.write(&host)?;
        debug!(%host, path = %cache.path().display(), "host cache updated");
    }

    Ok(Session { host, client })
}
