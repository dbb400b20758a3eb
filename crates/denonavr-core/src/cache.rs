//! On-disk host cache: one trimmed hostname at a well-known path, so repeat
//! invocations skip autodiscovery.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// File name under the cache base directory.
pub const CACHE_FILE_NAME: &str = "denonavr-cli.host";

/// Whether the cache is consulted, written, or invalidated this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    Off,
    #[default]
    On,
    /// Ignore any cached value, rediscover, and overwrite.
    Reset,
}

#[derive(Debug, Error)]
#[error("host cache {}: {source}", path.display())]
pub struct CacheError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Reads and writes the single cached receiver hostname. Filesystem only;
/// a missing file is the normal "no cache" state, not an error.
#[derive(Debug, Clone)]
pub struct HostCache {
    path: PathBuf,
}

impl HostCache {
    /// Cache at the standard location: `$XDG_CACHE_HOME` when set and
    /// non-empty, otherwise `~/.cache`.
    pub fn from_env() -> Self {
        let base = base_dir(std::env::var_os("XDG_CACHE_HOME"), home_dir());
        Self {
            path: base.join(CACHE_FILE_NAME),
        }
    }

    /// Cache at an explicit file path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached host, or `None` when no cache file exists (or it holds
    /// nothing but whitespace).
    pub fn read(&self) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let host = contents.trim();
                Ok((!host.is_empty()).then(|| host.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.error(source)),
        }
    }

    /// Persist `host`, overwriting any prior value. Parent directories are
    /// created as needed.
    pub fn write(&self, host: &str) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.error(source))?;
        }
        fs::write(&self.path, format!("{host}\n")).map_err(|source| self.error(source))
    }

    fn error(&self, source: io::Error) -> CacheError {
        CacheError {
            path: self.path.clone(),
            source,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Resolve the cache base directory from an `XDG_CACHE_HOME` override and
/// the home directory, degrading to a relative `.cache` when neither exists.
fn base_dir(xdg_cache_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match xdg_cache_home {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home
            .map(|home| home.join(".cache"))
            .unwrap_or_else(|| PathBuf::from(".cache")),
    }
}
