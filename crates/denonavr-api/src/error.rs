// ── API error types ──
//
// Network-class errors (receiver unreachable) are kept distinct from
// protocol-class errors (receiver reachable but talking nonsense): callers
// recover from the former in some paths, never from the latter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach receiver at {host}: {source}")]
    Network {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {host}: {reason}")]
    Protocol { host: String, reason: String },

    #[error("invalid receiver host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("discovery failed: {source}")]
    Discovery {
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Whether this error means the receiver could not be reached at all
    /// (as opposed to a malformed exchange with a reachable one).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::InvalidHost { .. })
    }
}
