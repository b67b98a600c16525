//! Error types for scanner configuration.
//!
//! Scanning never fails; only turning user-supplied settings into a
//! [`ScanConfig`](crate::config::ScanConfig) can.

use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a scanner configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Strategy name is neither `word` nor `vector`.
    #[error("unknown scan strategy: {0:?} (expected \"word\" or \"vector\")")]
    UnknownStrategy(String),

    /// Chunk size parsed but is not a supported machine word width.
    #[error("unsupported chunk size {0}: expected 4 or 8")]
    UnsupportedChunkSize(usize),

    /// Chunk size is not a number at all.
    #[error("invalid chunk size {value:?}")]
    InvalidChunkSize {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Lane backend name is neither `native` nor `portable`.
    #[error("unknown lane backend: {0:?} (expected \"native\" or \"portable\")")]
    UnknownLaneBackend(String),

    /// Bit-scan name is neither `native` nor `portable`.
    #[error("unknown bit scan: {0:?} (expected \"native\" or \"portable\")")]
    UnknownBitScan(String),

    /// A configuration key held a malformed value.
    #[error("invalid value for {key}")]
    Env {
        key: &'static str,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Attach the configuration key that produced this error.
    pub fn for_key(self, key: &'static str) -> Self {
        Self::Env {
            key,
            source: Box::new(self),
        }
    }
}
