//! Host resolution: explicit host → cached host → network discovery.
//!
//! The fallback chain never creates more than one *surviving* connection:
//! a cached host that validates carries its live client forward so the
//! bootstrapper does not reconnect.

use tracing::{debug, warn};

use crate::cache::{CacheMode, HostCache};
use crate::device::{DeviceClient, DeviceConnector, DeviceError};
use crate::error::CoreError;

/// Resolver outcome: the host to use and, when cache validation already
/// connected, the live client to reuse.
#[derive(Debug)]
pub struct ResolvedHost<C> {
    pub host: String,
    pub client: Option<C>,
}

/// Decide which receiver this invocation talks to.
///
/// An explicit host is adopted verbatim with no I/O. Otherwise the cache is
/// consulted (mode `on` only) and validated by actually connecting; a
/// network-class failure there is downgraded to a diagnostic and discovery
/// takes over. Discovery must find exactly one receiver: zero or several are
/// usage-level errors, the latter carrying the descriptor list for the
/// caller to print.
pub async fn resolve_host<F: DeviceConnector>(
    connector: &F,
    explicit: Option<&str>,
    cache_mode: CacheMode,
    cache: &HostCache,
) -> Result<ResolvedHost<F::Client>, CoreError> {
    if let Some(host) = explicit {
        debug!(%host, "using explicitly supplied host");
        return Ok(ResolvedHost {
            host: host.to_string(),
            client: None,
        });
    }

    if cache_mode == CacheMode::On {
        if let Some(host) = cache.read()? {
            let mut client = connector.open(&host);
            match client.setup().await {
                Ok(()) => {
                    debug!(%host, "cached host validated");
                    return Ok(ResolvedHost {
                        host,
                        client: Some(client),
                    });
                }
                Err(DeviceError::Network { .. }) => {
                    warn!("cached host {host} failed to connect, ignoring");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    let mut receivers = connector.discover().await?;
    match receivers.len() {
        0 => Err(CoreError::NoReceivers),
        1 => {
            let host = receivers.remove(0).host;
            debug!(%host, "adopted the single discovered receiver");
            Ok(ResolvedHost { host, client: None })
        }
        _ => Err(CoreError::MultipleReceivers { receivers }),
    }
}
